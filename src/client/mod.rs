//! Client side of the gallery: a typed HTTP client plus the upload form and
//! gallery view state, kept free of any rendering concern.

pub mod api;
pub mod gallery;
pub mod upload;

pub use api::{ClientError, HealthReport, ImageApi};
pub use gallery::{GalleryEvent, GalleryPhase, GalleryState};
pub use upload::{SelectedFile, UploadPhase, UploadWidget};
