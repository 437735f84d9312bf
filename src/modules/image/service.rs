use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::image::{
    model::{NewImage, UploadConfig},
    repository::ImageRepository,
    schema::{ImageEntity, ImageMetadata},
};

#[derive(Clone)]
pub struct ImageService {
    repo: Arc<dyn ImageRepository + Send + Sync>,
    config: UploadConfig,
}

impl ImageService {
    pub fn with_dependencies(
        repo: Arc<dyn ImageRepository + Send + Sync>,
        config: UploadConfig,
    ) -> Self {
        info!(
            "ImageService initialized (max {} bytes, types: {})",
            config.max_file_size,
            config.allowed_mime_types.join(", ")
        );
        ImageService { repo, config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Runs the upload gate over the complete file, then stores it.
    pub async fn upload_image(&self, image: NewImage) -> Result<ImageMetadata, error::SystemError> {
        self.config
            .check(&image.mime_type, image.content.len())
            .map_err(|rejection| error::SystemError::bad_request(rejection.to_string()))?;

        let entity = self.repo.create(image).await?;
        info!("Stored image {} ({}, {} bytes)", entity.id, entity.mime_type, entity.content.len());
        Ok(ImageMetadata::from(&entity))
    }

    pub async fn list_images(&self) -> Result<Vec<ImageMetadata>, error::SystemError> {
        self.repo.find_all().await
    }

    pub async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        self.repo.exists(id).await
    }

    pub async fn get_image(&self, id: &Uuid) -> Result<Option<ImageEntity>, error::SystemError> {
        self.repo.find_by_id(id).await
    }

    /// `Ok(false)` if the image was already gone when the store was asked to remove it.
    pub async fn delete_image(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!("Deleted image {}", id);
        }
        Ok(deleted)
    }

    pub async fn count(&self) -> Result<usize, error::SystemError> {
        self.repo.count().await
    }

    pub async fn reset(&self) -> Result<(), error::SystemError> {
        self.repo.clear().await
    }
}
