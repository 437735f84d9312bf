pub struct Env {
    pub ip: String,
    pub port: u16,
    pub workers: usize,
    /// Origin allowed by CORS; any origin when unset.
    pub frontend_url: Option<String>,
}

impl Env {
    fn new() -> Self {
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        let workers = std::env::var("WORKERS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<usize>()
            .expect("WORKERS must be a valid usize integer");
        let frontend_url = std::env::var("FRONTEND_URL").ok().filter(|url| !url.is_empty());

        Env { ip, port, workers, frontend_url }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
