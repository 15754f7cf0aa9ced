//! Display URL derivation. Pure string building, never touches the network.

use techbirds_core::{ClientConfig, MediaEndpoints, MediaId, MediaItem};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUrls {
    origin: String,
    api_base: String,
    endpoints: MediaEndpoints,
}

impl MediaUrls {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            origin: config.api_url.trim_end_matches('/').to_string(),
            api_base: config.api_base(),
            endpoints: config.endpoints.clone(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Collection path relative to the API base, e.g. "/media".
    pub fn collection_path(&self) -> &str {
        &self.endpoints.collection
    }

    /// Item path relative to the API base, e.g. "/media/42".
    pub fn item_path(&self, id: &MediaId) -> String {
        format!(
            "{}/{}",
            self.endpoints.collection,
            urlencoding::encode(id.as_str())
        )
    }

    pub fn permanent_delete_path(&self, id: &MediaId) -> String {
        format!("{}{}", self.item_path(id), self.endpoints.permanent_suffix)
    }

    /// Thumbnail for the grid and the image preview.
    ///
    /// SVGs have no generated thumbnail and render from their canonical URL.
    /// Otherwise a thumbnail URL on the record is used, then the thumbnail endpoint.
    pub fn thumbnail_url(&self, id: &MediaId, item: &MediaItem) -> String {
        if item.is_vector_image() && !item.url.is_empty() {
            return self.absolute_url(&item.url);
        }
        match item.thumbnail_url.as_deref() {
            Some(thumb) if !thumb.trim().is_empty() => self.absolute_url(thumb),
            _ => format!(
                "{}{}{}",
                self.api_base,
                self.item_path(id),
                self.endpoints.thumbnail_suffix
            ),
        }
    }

    /// Direct file URL for players and the document viewer.
    pub fn file_url(&self, id: &MediaId) -> String {
        format!(
            "{}{}{}",
            self.api_base,
            self.item_path(id),
            self.endpoints.file_suffix
        )
    }

    /// Resolve a server-relative path against the backend origin. Absolute,
    /// protocol-relative, `data:` and `blob:` URLs pass through unchanged.
    pub fn absolute_url(&self, url: &str) -> String {
        let url = url.trim();
        let lower = url.to_ascii_lowercase();
        if url.is_empty()
            || lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("//")
            || lower.starts_with("data:")
            || lower.starts_with("blob:")
        {
            return url.to_string();
        }
        format!("{}/{}", self.origin, url.trim_start_matches('/'))
    }
}
