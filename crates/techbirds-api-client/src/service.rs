//! The seam between the media library controllers and the network.

use async_trait::async_trait;
use techbirds_core::{MediaId, MediaItem, MediaMetadataUpdate, QueryFilter};

use crate::{ApiError, MediaListResponse, MediaUrls, UploadRequest};

/// Media operations the library controllers depend on.
///
/// Implementations must not swallow failures: every error is returned as the
/// raw [`ApiError`] so the caller can classify it.
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Fetch one page. No caching; always hits the backend.
    async fn list(&self, filter: &QueryFilter) -> Result<MediaListResponse, ApiError>;

    async fn get(&self, id: &MediaId) -> Result<MediaItem, ApiError>;

    /// Upload exactly one file; creates one record.
    async fn upload(&self, request: UploadRequest) -> Result<MediaItem, ApiError>;

    /// Replace the four descriptive fields.
    async fn update_metadata(
        &self,
        id: &MediaId,
        update: &MediaMetadataUpdate,
    ) -> Result<MediaItem, ApiError>;

    /// Move to trash; the record and file persist.
    async fn soft_delete(&self, id: &MediaId) -> Result<(), ApiError>;

    /// Destroy the record and the stored file.
    async fn hard_delete(&self, id: &MediaId) -> Result<(), ApiError>;

    fn urls(&self) -> &MediaUrls;
}
