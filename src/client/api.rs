use actix_web::web::Bytes;
use futures_util::stream;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use uuid::Uuid;

use crate::modules::image::schema::{ImageListResponse, ImageMetadata, ImageUploadResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// What the user gets to see when a call fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Message reported by the server, shown verbatim
    #[error("{0}")]
    Server(String),
    #[error("Network error. Please check your connection.")]
    Network,
    #[error("Backend server is not responding")]
    Unavailable,
    #[error("API base URL is not configured, e.g. http://localhost:5000/api")]
    MissingBaseUrl,
    #[error("An unexpected error occurred")]
    Unexpected,
}

impl ClientError {
    fn from_transport(err: reqwest::Error) -> Self {
        tracing::debug!(error = %err, "request failed");
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ClientError::Network
        } else {
            ClientError::Unexpected
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// Typed client for the gallery HTTP API.
#[derive(Clone)]
pub struct ImageApi {
    http: reqwest::Client,
    base_url: String,
}

impl ImageApi {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::MissingBaseUrl);
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|e| {
            tracing::error!(error = %e, "failed to build HTTP client");
            ClientError::Unexpected
        })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_url(&self, id: &Uuid) -> String {
        format!("{}/images/{}", self.base_url, id)
    }

    pub async fn upload_image(
        &self,
        filename: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<ImageMetadata, ClientError> {
        self.upload_image_with_progress(filename, mime_type, content, |_, _| {}).await
    }

    /// Streams the file in chunks, calling `on_progress(sent, total)` as each
    /// chunk is handed to the connection.
    #[tracing::instrument(skip(self, content, on_progress), fields(size = content.len()))]
    pub async fn upload_image_with_progress<F>(
        &self,
        filename: &str,
        mime_type: &str,
        content: Vec<u8>,
        mut on_progress: F,
    ) -> Result<ImageMetadata, ClientError>
    where
        F: FnMut(u64, u64) + Send + Sync + 'static,
    {
        let content = Bytes::from(content);
        let total = content.len() as u64;
        let mut sent = 0u64;

        let chunks = (0..content.len()).step_by(UPLOAD_CHUNK_SIZE).map(move |start| {
            let end = (start + UPLOAD_CHUNK_SIZE).min(content.len());
            let chunk = content.slice(start..end);
            sent += chunk.len() as u64;
            on_progress(sent, total);
            Ok::<_, std::io::Error>(chunk)
        });
        let body = reqwest::Body::wrap_stream(stream::iter(chunks));

        let part = reqwest::multipart::Part::stream_with_length(body, total)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|_| ClientError::Server(format!("Invalid content type {mime_type}")))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let res = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body: ImageUploadResponse = Self::read_json(res).await?;
        Ok(body.image)
    }

    pub async fn get_images(&self) -> Result<Vec<ImageMetadata>, ClientError> {
        let res = self
            .http
            .get(format!("{}/images", self.base_url))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body: ImageListResponse = Self::read_json(res).await?;
        Ok(body.images)
    }

    pub async fn get_image(&self, id: &Uuid) -> Result<Bytes, ClientError> {
        let res =
            self.http.get(self.image_url(id)).send().await.map_err(ClientError::from_transport)?;
        let res = Self::check_status(res).await?;
        res.bytes().await.map_err(ClientError::from_transport)
    }

    /// Returns the server's confirmation message.
    pub async fn delete_image(&self, id: &Uuid) -> Result<String, ClientError> {
        let res = self
            .http
            .delete(self.image_url(id))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body: MessageResponse = Self::read_json(res).await?;
        Ok(body.message)
    }

    pub async fn health_check(&self) -> Result<HealthReport, ClientError> {
        let res = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|_| ClientError::Unavailable)?;

        Self::read_json(res).await.map_err(|_| ClientError::Unavailable)
    }

    async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let message = res
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "An error occurred".to_string());
        tracing::warn!(%status, %message, "server rejected request");
        Err(ClientError::Server(message))
    }

    async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        let res = Self::check_status(res).await?;
        res.json::<T>().await.map_err(|e| {
            tracing::error!(error = %e, "unreadable response body");
            ClientError::Unexpected
        })
    }
}
