use actix_web::{
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::SystemError;
use crate::configs::build_image_service;
use crate::modules::image::{
    ImageEntity, ImageMetadata, ImageRepository, ImageService, NewImage, UploadConfig,
};

const BOUNDARY: &str = "gallery-test-boundary";

macro_rules! test_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service))
                .configure(crate::configure)
                .default_service(web::to(crate::api::route_not_found)),
        )
        .await
    };
}

fn multipart_body(field: &str, filename: &str, content_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(filename: &str, content_type: &str, content: &[u8]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("image", filename, content_type, content))
}

/// Every store call fails except the existence check.
struct BrokenRepository;

#[async_trait::async_trait]
impl ImageRepository for BrokenRepository {
    async fn create(&self, _image: NewImage) -> Result<ImageEntity, SystemError> {
        Err(SystemError::internal("Storage error"))
    }
    async fn find_all(&self) -> Result<Vec<ImageMetadata>, SystemError> {
        Err(SystemError::internal("Storage error"))
    }
    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<ImageEntity>, SystemError> {
        Err(SystemError::internal("Storage error"))
    }
    async fn exists(&self, _id: &Uuid) -> Result<bool, SystemError> {
        Ok(true)
    }
    async fn delete(&self, _id: &Uuid) -> Result<bool, SystemError> {
        Err(SystemError::LockPoisoned)
    }
    async fn count(&self) -> Result<usize, SystemError> {
        Ok(0)
    }
    async fn clear(&self) -> Result<(), SystemError> {
        Ok(())
    }
}

/// Reports every id as present, yet has nothing to read or delete: the state a
/// concurrent delete leaves behind between the existence check and the action.
struct VanishingRepository;

#[async_trait::async_trait]
impl ImageRepository for VanishingRepository {
    async fn create(&self, _image: NewImage) -> Result<ImageEntity, SystemError> {
        Err(SystemError::internal("Storage error"))
    }
    async fn find_all(&self) -> Result<Vec<ImageMetadata>, SystemError> {
        Ok(Vec::new())
    }
    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<ImageEntity>, SystemError> {
        Ok(None)
    }
    async fn exists(&self, _id: &Uuid) -> Result<bool, SystemError> {
        Ok(true)
    }
    async fn delete(&self, _id: &Uuid) -> Result<bool, SystemError> {
        Ok(false)
    }
    async fn count(&self) -> Result<usize, SystemError> {
        Ok(0)
    }
    async fn clear(&self) -> Result<(), SystemError> {
        Ok(())
    }
}

fn service_with(repo: impl ImageRepository + Send + Sync + 'static) -> ImageService {
    ImageService::with_dependencies(Arc::new(repo), UploadConfig::default())
}

#[actix_web::test]
async fn test_health_is_idempotent() {
    let app = test_app!(build_image_service());

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "OK", "message": "Server is running" }));
    }
}

#[actix_web::test]
async fn test_list_empty_store() {
    let app = test_app!(build_image_service());

    let req = test::TestRequest::get().uri("/api/images").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "images": [] }));
}

#[actix_web::test]
async fn test_upload_fetch_delete_scenario() {
    let app = test_app!(build_image_service());
    let content: Vec<u8> = (0u8..16).collect();

    let req = upload_request("test.jpg", "image/jpeg", &content).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Image uploaded successfully");
    assert_eq!(body["image"]["filename"], "test.jpg");
    assert_eq!(body["image"]["mimeType"], "image/jpeg");
    assert!(body["image"].get("content").is_none());
    let id = body["image"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap(), "image/jpeg");
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap(),
        "inline; filename=\"test.jpg\""
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), content.as_slice());

    let req = test::TestRequest::delete().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Image deleted successfully" }));

    let req = test::TestRequest::get().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Image not found" }));
}

#[actix_web::test]
async fn test_upload_rejects_non_image() {
    let app = test_app!(build_image_service());

    let req = upload_request("document.pdf", "application/pdf", b"%PDF").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Only image files are allowed" }));
}

#[actix_web::test]
async fn test_upload_part_without_content_type_is_not_an_image() {
    let service = build_image_service();
    let app = test_app!(service.clone());

    let mut payload = Vec::new();
    payload.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    payload.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"photo.jpg\"\r\n\r\n",
    );
    payload.extend_from_slice(b"\xff\xd8\xff");
    payload.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Only image files are allowed" }));
    assert_eq!(service.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_upload_rejects_gif() {
    let app = test_app!(build_image_service());

    let req = upload_request("animation.gif", "image/gif", b"GIF89a").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid file type. Only JPEG and PNG images are allowed" }));
}

#[actix_web::test]
async fn test_upload_rejects_oversized_file() {
    let service = build_image_service();
    let app = test_app!(service.clone());
    let content = vec![0u8; 3 * 1024 * 1024 + 1];

    let req = upload_request("big.png", "image/png", &content).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "File too large. Maximum size is 3MB." }));
    assert_eq!(service.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_upload_accepts_file_at_exact_limit() {
    let app = test_app!(build_image_service());
    let content = vec![0u8; 3 * 1024 * 1024];

    let req = upload_request("max.png", "image/png", &content).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_upload_without_file() {
    let app = test_app!(build_image_service());

    // Multipart body whose only part is under another name
    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("avatar", "a.png", "image/png", b"png"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "No file uploaded" }));

    // Not multipart at all
    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(json!({ "image": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "No file uploaded" }));
}

#[actix_web::test]
async fn test_list_keeps_upload_order() {
    let service = build_image_service();
    let app = test_app!(service.clone());

    for (name, mime) in [("one.jpg", "image/jpeg"), ("two.png", "image/png"), ("three.jpg", "image/jpg")]
    {
        let req = upload_request(name, mime, b"data").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/images").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let images = body["images"].as_array().unwrap();

    let names: Vec<_> = images.iter().map(|i| i["filename"].as_str().unwrap()).collect();
    assert_eq!(names, ["one.jpg", "two.png", "three.jpg"]);
    assert!(images.iter().all(|i| i.as_object().unwrap().len() == 4));
    assert_eq!(images.len(), service.count().await.unwrap());
}

#[actix_web::test]
async fn test_unknown_ids_are_not_found() {
    let app = test_app!(build_image_service());

    for uri in ["/api/images/non-existent-id".to_string(), format!("/api/images/{}", Uuid::now_v7())]
    {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Image not found" }));

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Image not found" }));
    }
}

#[actix_web::test]
async fn test_unknown_route() {
    let app = test_app!(build_image_service());

    for uri in ["/api/non-existent-route", "/nothing/here"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Route not found" }));
    }
}

#[actix_web::test]
async fn test_store_faults_become_500() {
    let app = test_app!(service_with(BrokenRepository));
    let id = Uuid::now_v7();

    let req = test::TestRequest::get().uri("/api/images").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to retrieve images" }));

    let req = test::TestRequest::get().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to retrieve image" }));

    let req = test::TestRequest::delete().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to delete image" }));

    let req = upload_request("test.png", "image/png", b"png").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to upload image" }));
}

#[actix_web::test]
async fn test_delete_losing_race_is_500() {
    let app = test_app!(service_with(VanishingRepository));
    let id = Uuid::now_v7();

    let req = test::TestRequest::delete().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to delete image" }));

    let req = test::TestRequest::get().uri(&format!("/api/images/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_index_serves_ui() {
    let app = test_app!(build_image_service());

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Mini Image Gallery"));
}
