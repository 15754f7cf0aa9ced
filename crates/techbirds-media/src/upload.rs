//! Single-file upload flow.
//!
//! One upload at a time: `begin` refuses while another is in flight. Whatever
//! the result, the file input is reset afterwards so the same file can be
//! picked again.

use techbirds_api_client::{ApiError, FileUpload, UploadRequest};
use techbirds_core::{FailureKind, MediaItem, MediaMetadataUpdate};

use crate::feedback::{log_failure, mutation_error_message};
use crate::LibraryError;

/// The file picker. `generation` changes on every reset so a view can remount
/// the native control.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    selected: Option<FileUpload>,
    generation: u64,
}

impl FileInput {
    pub fn select(&mut self, file: FileUpload) {
        self.selected = Some(file);
    }

    pub fn selected(&self) -> Option<&FileUpload> {
        self.selected.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.generation += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Uploaded(MediaItem),
    Failed(FailureKind),
}

#[derive(Debug, Clone, Default)]
pub struct UploadFlow {
    input: FileInput,
    form: MediaMetadataUpdate,
    uploading: bool,
    error: Option<String>,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &FileInput {
        &self.input
    }

    pub fn select_file(&mut self, file: FileUpload) {
        self.input.select(file);
    }

    pub fn form(&self) -> &MediaMetadataUpdate {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MediaMetadataUpdate {
        &mut self.form
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Take the selected file and the form and mark the upload in flight.
    /// An empty title defaults to the file name without its extension.
    pub fn begin(&mut self) -> Result<UploadRequest, LibraryError> {
        if self.uploading {
            return Err(LibraryError::UploadInProgress);
        }
        let file = match self.input.selected.take() {
            Some(file) => file,
            None => {
                self.error = Some(LibraryError::NoFileSelected.to_string());
                return Err(LibraryError::NoFileSelected);
            }
        };

        let mut metadata = self.form.clone();
        if metadata.title.trim().is_empty() {
            metadata.title = file.stem().to_string();
        }

        self.uploading = true;
        tracing::debug!(file_name = %file.file_name, size = file.len(), "Starting upload");
        Ok(UploadRequest::new(file, metadata))
    }

    /// Record the result of the request handed out by `begin`.
    pub fn finish(&mut self, result: Result<MediaItem, ApiError>) -> UploadOutcome {
        self.uploading = false;
        self.input.reset();

        match result {
            Ok(item) => {
                self.error = None;
                self.form = MediaMetadataUpdate::default();
                UploadOutcome::Uploaded(item)
            }
            Err(err) => {
                log_failure("upload", &err);
                self.error = Some(mutation_error_message(&err));
                UploadOutcome::Failed(err.kind())
            }
        }
    }
}
