//! In-memory image hosting: a JSON/multipart HTTP API, the single-page UI it
//! serves, and a typed client for the same API.

use actix_web::web;

pub mod api;
pub mod client;
pub mod configs;
pub mod constants;
pub mod modules;
pub mod utils;

#[cfg(test)]
mod test;

/// Mounts the UI at `/` and every API route under `/api`.
///
/// Unmatched paths are not handled here; register [`api::route_not_found`] as
/// the app's default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::ui::route::configure).service(
        web::scope("/api")
            .configure(modules::health::route::configure)
            .configure(modules::image::route::configure),
    );
}
