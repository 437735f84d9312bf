use actix_web::get;
use serde::Serialize;

use crate::api::success;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[get("/health")]
pub async fn health_check() -> success::Success<HealthStatus> {
    success::Success::ok(Some(HealthStatus { status: "OK" })).message("Server is running")
}
