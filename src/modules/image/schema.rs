use actix_web::web::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored image, content included
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntity {
    pub id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub content: Bytes,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Image metadata as listed by the API; never carries content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<&ImageEntity> for ImageMetadata {
    fn from(entity: &ImageEntity) -> Self {
        ImageMetadata {
            id: entity.id,
            filename: entity.filename.clone(),
            mime_type: entity.mime_type.clone(),
            uploaded_at: entity.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub image: ImageMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageListResponse {
    pub images: Vec<ImageMetadata>,
}
