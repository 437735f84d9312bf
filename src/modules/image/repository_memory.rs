use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::{
    api::error,
    modules::image::{
        model::NewImage,
        repository::ImageRepository,
        schema::{ImageEntity, ImageMetadata},
    },
};

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, ImageEntity>,
    /// Ids in insertion order; kept in step with `records`.
    order: Vec<Uuid>,
}

/// Process-local image store. Nothing survives a restart.
#[derive(Default)]
pub struct ImageRepositoryMemory {
    inner: RwLock<Inner>,
}

impl ImageRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ImageRepository for ImageRepositoryMemory {
    async fn create(&self, image: NewImage) -> Result<ImageEntity, error::SystemError> {
        let entity = ImageEntity {
            id: Uuid::now_v7(),
            filename: image.filename,
            mime_type: image.mime_type,
            content: image.content,
            uploaded_at: chrono::Utc::now(),
        };

        let mut inner = self.inner.write()?;
        inner.order.push(entity.id);
        inner.records.insert(entity.id, entity.clone());

        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<ImageMetadata>, error::SystemError> {
        let inner = self.inner.read()?;
        let images = inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .map(ImageMetadata::from)
            .collect();

        Ok(images)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ImageEntity>, error::SystemError> {
        let inner = self.inner.read()?;
        Ok(inner.records.get(id).cloned())
    }

    async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let inner = self.inner.read()?;
        Ok(inner.records.contains_key(id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut inner = self.inner.write()?;
        if inner.records.remove(id).is_none() {
            return Ok(false);
        }
        inner.order.retain(|stored| stored != id);

        Ok(true)
    }

    async fn count(&self) -> Result<usize, error::SystemError> {
        let inner = self.inner.read()?;
        Ok(inner.records.len())
    }

    async fn clear(&self) -> Result<(), error::SystemError> {
        let mut inner = self.inner.write()?;
        inner.records.clear();
        inner.order.clear();
        Ok(())
    }
}
