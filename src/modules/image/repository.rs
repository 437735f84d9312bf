use uuid::Uuid;

use crate::{
    api::error,
    modules::image::{
        model::NewImage,
        schema::{ImageEntity, ImageMetadata},
    },
};

#[async_trait::async_trait]
pub trait ImageRepository {
    /// Stores the image under a freshly generated id and returns the full record.
    async fn create(&self, image: NewImage) -> Result<ImageEntity, error::SystemError>;

    /// Metadata of every stored image, in insertion order.
    async fn find_all(&self) -> Result<Vec<ImageMetadata>, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ImageEntity>, error::SystemError>;

    async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError>;

    /// `Ok(false)` when nothing was stored under `id`.
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;

    async fn count(&self) -> Result<usize, error::SystemError>;

    async fn clear(&self) -> Result<(), error::SystemError>;
}
