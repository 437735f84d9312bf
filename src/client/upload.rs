use tokio::sync::mpsc;

use crate::client::api::{ClientError, ImageApi};
use crate::modules::image::{model::UploadConfig, schema::ImageMetadata};

/// A file picked by the user, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Selected,
    Uploading { progress: u8 },
}

/// Upload form state: selection, progress and the message shown under the form.
#[derive(Debug, Clone)]
pub struct UploadWidget {
    config: UploadConfig,
    phase: UploadPhase,
    file: Option<SelectedFile>,
    error: Option<String>,
}

impl Default for UploadWidget {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

impl UploadWidget {
    pub fn new(config: UploadConfig) -> Self {
        Self { config, phase: UploadPhase::Idle, file: None, error: None }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies the same rules as the server's gate, for instant feedback only.
    pub fn select(&mut self, file: Option<SelectedFile>) {
        if matches!(self.phase, UploadPhase::Uploading { .. }) {
            return;
        }

        self.error = None;
        let Some(file) = file else {
            self.file = None;
            self.phase = UploadPhase::Idle;
            return;
        };

        match self.config.check(&file.mime_type, file.size()) {
            Ok(()) => {
                self.file = Some(file);
                self.phase = UploadPhase::Selected;
            }
            Err(rejection) => {
                self.file = None;
                self.phase = UploadPhase::Idle;
                self.error = Some(rejection.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        if matches!(self.phase, UploadPhase::Uploading { .. }) {
            return;
        }
        self.file = None;
        self.error = None;
        self.phase = UploadPhase::Idle;
    }

    /// Moves to `Uploading` and hands out the file to send; `None` if nothing is selected.
    pub fn begin(&mut self) -> Option<SelectedFile> {
        match (&self.phase, &self.file) {
            (UploadPhase::Selected, Some(file)) => {
                let file = file.clone();
                self.error = None;
                self.phase = UploadPhase::Uploading { progress: 0 };
                Some(file)
            }
            (UploadPhase::Uploading { .. }, _) => None,
            _ => {
                self.error = Some("Please select a file first".to_string());
                None
            }
        }
    }

    pub fn progress(&mut self, percent: u8) {
        if let UploadPhase::Uploading { progress } = &mut self.phase {
            *progress = percent.min(100);
        }
    }

    /// Settles an upload. On success the form resets and the stored image is
    /// returned for the gallery; on failure the file stays selected with the error.
    pub fn finish(
        &mut self,
        result: Result<ImageMetadata, ClientError>,
    ) -> Option<ImageMetadata> {
        if !matches!(self.phase, UploadPhase::Uploading { .. }) {
            return None;
        }

        match result {
            Ok(image) => {
                self.file = None;
                self.error = None;
                self.phase = UploadPhase::Idle;
                Some(image)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = UploadPhase::Selected;
                None
            }
        }
    }

    /// Full upload round trip against the API.
    pub async fn upload(&mut self, api: &ImageApi) -> Option<ImageMetadata> {
        self.upload_observed(api, |_| {}).await
    }

    /// Like [`upload`](Self::upload), calling `observe` after every progress
    /// update while the request is in flight.
    pub async fn upload_observed(
        &mut self,
        api: &ImageApi,
        mut observe: impl FnMut(&Self),
    ) -> Option<ImageMetadata> {
        let file = self.begin()?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let request = api.upload_image_with_progress(
            &file.name,
            &file.mime_type,
            file.content,
            move |sent, total| {
                let _ = tx.send(percent(sent, total));
            },
        );
        let mut request = std::pin::pin!(request);

        let result = loop {
            tokio::select! {
                biased;
                Some(done) = rx.recv() => {
                    self.progress(done);
                    observe(&*self);
                }
                result = &mut request => break result,
            }
        };
        while let Ok(done) = rx.try_recv() {
            self.progress(done);
            observe(&*self);
        }

        self.finish(result)
    }
}

fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (sent.saturating_mul(100) / total).min(100) as u8
}
