use actix_multipart::Multipart;
use actix_web::{
    delete, get,
    http::header::{self, HeaderValue},
    post, web, HttpResponse,
};

use crate::api::{error, success};
use crate::modules::image::{
    schema::{ImageListResponse, ImageUploadResponse},
    service::ImageService,
};
use crate::utils::{parse_image_id, read_upload_field};

const UPLOAD_FIELD: &str = "image";

#[post("/upload")]
pub async fn upload_image(
    image_service: web::Data<ImageService>,
    payload: Multipart,
) -> Result<success::Success<ImageUploadResponse>, error::Error> {
    let image = read_upload_field(payload, UPLOAD_FIELD, image_service.config())
        .await?
        .ok_or_else(|| error::Error::bad_request("No file uploaded"))?;

    let image = image_service
        .upload_image(image)
        .await
        .map_err(|e| e.or_internal("Failed to upload image"))?;

    Ok(success::Success::created(Some(ImageUploadResponse { image }))
        .message("Image uploaded successfully"))
}

#[get("/images")]
pub async fn list_images(
    image_service: web::Data<ImageService>,
) -> Result<success::Success<ImageListResponse>, error::Error> {
    let images = image_service
        .list_images()
        .await
        .map_err(|e| e.or_internal("Failed to retrieve images"))?;

    Ok(success::Success::ok(Some(ImageListResponse { images })))
}

#[get("/images/{id}")]
pub async fn get_image(
    image_service: web::Data<ImageService>,
    image_id: web::Path<String>,
) -> Result<HttpResponse, error::Error> {
    const FAILED: &str = "Failed to retrieve image";

    let Some(id) = parse_image_id(&image_id) else {
        return Err(error::Error::not_found("Image not found"));
    };

    if !image_service.exists(&id).await.map_err(|e| e.or_internal(FAILED))? {
        return Err(error::Error::not_found("Image not found"));
    }

    // Existence and read are separate store calls; a concurrent delete can land in between.
    let image = image_service
        .get_image(&id)
        .await
        .map_err(|e| e.or_internal(FAILED))?
        .ok_or_else(|| {
            log::error!("Image {} disappeared between existence check and read", id);
            error::Error::internal_server_error(FAILED)
        })?;

    let content_type = HeaderValue::try_from(image.mime_type.as_str()).map_err(|e| {
        log::error!("Stored mime type of {} is not a valid header: {}", id, e);
        error::Error::internal_server_error(FAILED)
    })?;
    let disposition = HeaderValue::try_from(format!("inline; filename=\"{}\"", image.filename))
        .map_err(|e| {
            log::error!("Filename of {} is not a valid header: {}", id, e);
            error::Error::internal_server_error(FAILED)
        })?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type))
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .body(image.content))
}

#[delete("/images/{id}")]
pub async fn delete_image(
    image_service: web::Data<ImageService>,
    image_id: web::Path<String>,
) -> Result<success::Success<()>, error::Error> {
    const FAILED: &str = "Failed to delete image";

    let Some(id) = parse_image_id(&image_id) else {
        return Err(error::Error::not_found("Image not found"));
    };

    if !image_service.exists(&id).await.map_err(|e| e.or_internal(FAILED))? {
        return Err(error::Error::not_found("Image not found"));
    }

    // A concurrent delete of the same id can win the race after the check above.
    if !image_service.delete_image(&id).await.map_err(|e| e.or_internal(FAILED))? {
        log::error!("Image {} passed the existence check but was not deleted", id);
        return Err(error::Error::internal_server_error(FAILED));
    }

    Ok(success::Success::ok(None).message("Image deleted successfully"))
}
