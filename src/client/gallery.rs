use std::collections::HashMap;
use uuid::Uuid;

use crate::client::api::ImageApi;
use crate::modules::image::schema::ImageMetadata;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryPhase {
    Loading,
    Loaded,
    Refreshing,
    LoadError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    Loaded(Vec<ImageMetadata>),
    LoadFailed(String),
    RefreshRequested,
    /// An upload finished elsewhere; shown first without a refetch.
    ItemAdded(ImageMetadata),
    /// The server confirmed the deletion.
    ItemRemoved(Uuid),
    DeleteFailed { id: Uuid, error: String },
}

/// Gallery view state. All changes go through [`GalleryState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    phase: GalleryPhase,
    images: Vec<ImageMetadata>,
    card_errors: HashMap<Uuid, String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self { phase: GalleryPhase::Loading, images: Vec::new(), card_errors: HashMap::new() }
    }

    pub fn phase(&self) -> &GalleryPhase {
        &self.phase
    }

    pub fn images(&self) -> &[ImageMetadata] {
        &self.images
    }

    pub fn card_error(&self, id: &Uuid) -> Option<&str> {
        self.card_errors.get(id).map(String::as_str)
    }

    pub fn apply(&mut self, event: GalleryEvent) {
        match event {
            GalleryEvent::Loaded(images) => {
                self.phase = GalleryPhase::Loaded;
                self.images = images;
                self.card_errors.clear();
            }
            GalleryEvent::LoadFailed(error) => {
                self.phase = GalleryPhase::LoadError(error);
            }
            GalleryEvent::RefreshRequested => {
                self.phase = match self.phase {
                    GalleryPhase::Loaded => GalleryPhase::Refreshing,
                    GalleryPhase::LoadError(_) => GalleryPhase::Loading,
                    ref busy => busy.clone(),
                };
            }
            GalleryEvent::ItemAdded(image) => {
                // A refresh may already have delivered it.
                if !self.images.iter().any(|existing| existing.id == image.id) {
                    self.images.insert(0, image);
                }
            }
            GalleryEvent::ItemRemoved(id) => {
                self.images.retain(|image| image.id != id);
                self.card_errors.remove(&id);
            }
            GalleryEvent::DeleteFailed { id, error } => {
                if self.images.iter().any(|image| image.id == id) {
                    self.card_errors.insert(id, error);
                }
            }
        }
    }

    /// e.g. "1 image found", "3 images found"
    pub fn summary(&self) -> String {
        let count = self.images.len();
        format!("{} image{} found", count, if count == 1 { "" } else { "s" })
    }

    /// Fetches the full list and settles into `Loaded` or `LoadError`.
    pub async fn fetch(&mut self, api: &ImageApi) {
        match api.get_images().await {
            Ok(images) => self.apply(GalleryEvent::Loaded(images)),
            Err(e) => self.apply(GalleryEvent::LoadFailed(e.to_string())),
        }
    }

    pub async fn refresh(&mut self, api: &ImageApi) {
        self.apply(GalleryEvent::RefreshRequested);
        self.fetch(api).await;
    }

    /// Removes the card only once the server has confirmed the deletion.
    pub async fn delete(&mut self, api: &ImageApi, id: Uuid) -> bool {
        match api.delete_image(&id).await {
            Ok(_) => {
                self.apply(GalleryEvent::ItemRemoved(id));
                true
            }
            Err(e) => {
                self.apply(GalleryEvent::DeleteFailed { id, error: e.to_string() });
                false
            }
        }
    }
}
