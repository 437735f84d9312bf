pub mod handle;
pub mod model;
pub mod repository;
pub mod repository_memory;
pub mod route;
pub mod schema;
pub mod service;

pub use model::{NewImage, UploadConfig, UploadRejection};
pub use repository::ImageRepository;
pub use repository_memory::ImageRepositoryMemory;
pub use schema::{ImageEntity, ImageListResponse, ImageMetadata, ImageUploadResponse};
pub use service::ImageService;
