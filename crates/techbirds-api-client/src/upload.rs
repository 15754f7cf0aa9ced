//! Upload payloads.

use std::path::{Component, Path};

use techbirds_core::MediaMetadataUpdate;

use crate::ApiError;

/// A single file ready to be sent as the `file` part of an upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Read a local file. Paths containing `..` are rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(ApiError::InvalidInput(format!(
                "Invalid path: {}",
                path.display()
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| {
            ApiError::InvalidInput(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::InvalidInput(format!("Not a file: {}", path.display())))?;

        Ok(Self::new(file_name, bytes))
    }

    /// File name without its extension, used as the default title.
    pub fn stem(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Exactly one file plus its descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: FileUpload,
    pub metadata: MediaMetadataUpdate,
}

impl UploadRequest {
    pub fn new(file: FileUpload, metadata: MediaMetadataUpdate) -> Self {
        Self { file, metadata }
    }

    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form, ApiError> {
        let part = reqwest::multipart::Part::bytes(self.file.bytes)
            .file_name(self.file.file_name)
            .mime_str(&self.file.content_type)
            .map_err(|e| {
                ApiError::InvalidInput(format!(
                    "Invalid content type '{}': {}",
                    self.file.content_type, e
                ))
            })?;

        let mut form = reqwest::multipart::Form::new().part("file", part);
        for (name, value) in self.metadata.form_fields() {
            form = form.text(name, value.to_string());
        }
        Ok(form)
    }
}

/// MIME type from the file extension; `application/octet-stream` when unknown.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
