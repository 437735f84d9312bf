use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::LazyLock;

use image_gallery::{api, configs, constants};

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    LazyLock::force(&ENV);
    let image_service = web::Data::new(configs::build_image_service());

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(configs::cors(ENV.frontend_url.as_deref()))
            .wrap(Logger::default())
            .app_data(image_service.clone())
            .configure(image_gallery::configure)
            .default_service(web::to(api::route_not_found))
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .run()
    .await
}
