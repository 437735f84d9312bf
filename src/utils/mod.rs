use actix_multipart::{Field, Multipart};
use actix_web::web::BytesMut;
use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::{
    api::error,
    modules::image::model::{NewImage, UploadConfig},
};

const UPLOAD_FAILED: &str = "Failed to upload image";

/// Pulls the file sent under `field_name` out of a multipart body.
///
/// The gate's type rules run as soon as the part headers are known; the size
/// rule runs while the body streams in, so an oversized file is dropped after
/// `max_file_size + 1` bytes instead of being buffered whole. `Ok(None)` means
/// the request carried no such file (including bodies that are not multipart).
pub async fn read_upload_field(
    mut payload: Multipart,
    field_name: &str,
    config: &UploadConfig,
) -> Result<Option<NewImage>, error::Error> {
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                log::debug!("Unreadable multipart payload: {}", e);
                return Ok(None);
            }
        };

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| name.to_string());

        let filename = match filename {
            Some(filename) if field.name() == Some(field_name) => filename,
            _ => {
                drain_field(&mut field).await?;
                continue;
            }
        };

        let mime_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        config
            .check_content_type(&mime_type)
            .map_err(|rejection| error::Error::bad_request(rejection.to_string()))?;

        let mut bytes = BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| {
            log::error!("Failed to read upload body: {}", e);
            error::Error::internal_server_error(UPLOAD_FAILED)
        })? {
            config
                .check_size(bytes.len() + chunk.len())
                .map_err(|rejection| error::Error::bad_request(rejection.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(NewImage { filename, mime_type, content: bytes.freeze() }));
    }
}

async fn drain_field(field: &mut Field) -> Result<(), error::Error> {
    while field
        .try_next()
        .await
        .map_err(|e| {
            log::error!("Failed to skip multipart field: {}", e);
            error::Error::internal_server_error(UPLOAD_FAILED)
        })?
        .is_some()
    {}
    Ok(())
}

/// Ids are opaque to clients: anything that is not a stored id, well-formed or
/// not, is simply unknown.
pub fn parse_image_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
