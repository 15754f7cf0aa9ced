use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier. The backend sends either a string or a number,
/// so both are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

pub type MediaId = RecordId;
pub type UserId = RecordId;

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId(s),
            Raw::Signed(n) => RecordId(n.to_string()),
            Raw::Unsigned(n) => RecordId(n.to_string()),
        })
    }
}

/// One stored file and its descriptive metadata.
///
/// Field names follow the camelCase payloads the admin API returns; snake_case
/// aliases are accepted because older endpoints still emit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: MediaId,
    pub url: String,
    #[serde(default, alias = "thumbnail_url")]
    pub thumbnail_url: Option<String>,
    #[serde(default, alias = "file_name", alias = "fileName")]
    pub filename: String,
    #[serde(
        default,
        alias = "original_name",
        alias = "originalFilename",
        alias = "original_filename"
    )]
    pub original_name: String,
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "alt_text")]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "uploaded_by", alias = "userId", alias = "user_id")]
    pub uploaded_by: Option<UserId>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "is_deleted")]
    pub is_deleted: bool,
    #[serde(default, alias = "deleted_at")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MediaItem {
    /// Renderer selected from the MIME type.
    pub fn preview_kind(&self) -> PreviewKind {
        PreviewKind::from_mime(&self.mime_type)
    }

    /// Vector images are served from their canonical URL; the server does not
    /// generate thumbnails for them.
    pub fn is_vector_image(&self) -> bool {
        normalize_mime_type(&self.mime_type).eq_ignore_ascii_case("image/svg+xml")
    }

    /// Title when set, otherwise the original or stored file name.
    pub fn display_name(&self) -> &str {
        [&self.title, &self.original_name, &self.filename]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .map(String::as_str)
            .unwrap_or_else(|| self.id.as_str())
    }

    pub fn dimensions_label(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{}×{}", w, h)),
            _ => None,
        }
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }

    pub fn created_label(&self) -> String {
        self.created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Preview renderer families, chosen purely by MIME-type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Image,
    Video,
    Audio,
    Pdf,
    Generic,
}

impl PreviewKind {
    pub fn from_mime(mime_type: &str) -> Self {
        let mime = normalize_mime_type(mime_type).to_ascii_lowercase();
        if mime.starts_with("image/") {
            PreviewKind::Image
        } else if mime.starts_with("video/") {
            PreviewKind::Video
        } else if mime.starts_with("audio/") {
            PreviewKind::Audio
        } else if mime == "application/pdf" {
            PreviewKind::Pdf
        } else {
            PreviewKind::Generic
        }
    }
}

/// Strip MIME parameters (e.g. "image/png; charset=binary" -> "image/png").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Human-readable byte size using binary units.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
