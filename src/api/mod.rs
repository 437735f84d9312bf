pub mod error;
pub mod success;

use actix_web::{HttpRequest, HttpResponse};

/// Fallback for every path that no route claims.
pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, error::Error> {
    log::debug!("No route for {} {}", req.method(), req.path());
    Err(error::Error::not_found("Route not found"))
}
