use serde::{Deserialize, Serialize};

use super::media::MediaItem;

/// The user-editable descriptive fields of a media item.
///
/// Used both as the upload form payload and as the body of a metadata update.
/// Updates always carry all four fields as the form currently shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadataUpdate {
    pub title: String,
    pub alt_text: String,
    pub caption: String,
    pub description: String,
}

impl MediaMetadataUpdate {
    /// Prefill from the item's current metadata.
    pub fn from_item(item: &MediaItem) -> Self {
        Self {
            title: item.title.clone(),
            alt_text: item.alt_text.clone().unwrap_or_default(),
            caption: item.caption.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.alt_text.is_empty()
            && self.caption.is_empty()
            && self.description.is_empty()
    }

    /// Multipart field pairs, in the order the upload endpoint documents them.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("title", self.title.as_str()),
            ("altText", self.alt_text.as_str()),
            ("caption", self.caption.as_str()),
            ("description", self.description.as_str()),
        ]
    }
}
