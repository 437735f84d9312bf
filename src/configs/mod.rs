use actix_cors::Cors;
use std::sync::Arc;

use crate::modules::image::{ImageRepositoryMemory, ImageService, UploadConfig};

/// The one image store of the process, wrapped in the service the handlers use.
pub fn build_image_service() -> ImageService {
    ImageService::with_dependencies(Arc::new(ImageRepositoryMemory::new()), UploadConfig::default())
}

pub fn cors(frontend_url: Option<&str>) -> Cors {
    let cors = match frontend_url {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "DELETE"]).allow_any_header().max_age(3600)
}
