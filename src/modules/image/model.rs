use actix_web::web::Bytes;

pub const MAX_FILE_SIZE: usize = 3 * 1024 * 1024; // 3MB
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Image accepted by the upload gate, ready to be stored
#[derive(Debug, Clone)]
pub struct NewImage {
    pub filename: String,
    pub mime_type: String,
    pub content: Bytes,
}

/// Why an upload was turned away. The display text is returned to clients verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Only image files are allowed")]
    NotAnImage,
    #[error("Invalid file type. Only JPEG and PNG images are allowed")]
    UnsupportedType,
    #[error("File too large. Maximum size is 3MB.")]
    TooLarge,
}

/// Upload gate configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            allowed_mime_types: ALLOWED_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl UploadConfig {
    /// Type rules only; usable before any byte of the body has been read.
    pub fn check_content_type(&self, mime_type: &str) -> Result<(), UploadRejection> {
        if !mime_type.starts_with("image/") {
            return Err(UploadRejection::NotAnImage);
        }

        if !self.allowed_mime_types.iter().any(|allowed| allowed == mime_type) {
            return Err(UploadRejection::UnsupportedType);
        }

        Ok(())
    }

    pub fn check_size(&self, file_size: usize) -> Result<(), UploadRejection> {
        if file_size > self.max_file_size {
            return Err(UploadRejection::TooLarge);
        }
        Ok(())
    }

    /// Full gate: generic image check, then subtype, then size.
    pub fn check(&self, mime_type: &str, file_size: usize) -> Result<(), UploadRejection> {
        self.check_content_type(mime_type)?;
        self.check_size(file_size)
    }
}
