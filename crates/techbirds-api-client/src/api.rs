//! Domain methods for the TechBirds API client.

use async_trait::async_trait;
use reqwest::Method;
use techbirds_core::{MediaId, MediaItem, MediaMetadataUpdate, QueryFilter, UpdateMethod};

use crate::response::ItemResponse;
use crate::{ApiClient, ApiError, MediaListResponse, MediaService, MediaUrls, UploadRequest};

impl ApiClient {
    /// `GET /media` with the filter as query parameters.
    pub async fn list_media(&self, filter: &QueryFilter) -> Result<MediaListResponse, ApiError> {
        tracing::debug!(
            page = filter.page,
            limit = filter.limit,
            search = %filter.search,
            mime_type = %filter.mime_type,
            "Listing media"
        );
        self.get(self.urls().collection_path(), &filter.to_query_pairs())
            .await
    }

    /// Get a single media item by ID.
    pub async fn get_media(&self, id: &MediaId) -> Result<MediaItem, ApiError> {
        let response: ItemResponse = self.get(&self.urls().item_path(id), &[]).await?;
        Ok(response.into_item())
    }

    /// Multipart upload of one file plus title, altText, caption and description.
    pub async fn upload_media(&self, request: UploadRequest) -> Result<MediaItem, ApiError> {
        let file_name = request.file.file_name.clone();
        let size = request.file.len();
        let form = request.into_form()?;

        let response: ItemResponse = self
            .post_multipart(self.urls().collection_path(), form)
            .await?;
        let item = response.into_item();
        tracing::info!(media_id = %item.id, file_name = %file_name, size, "Media uploaded");
        Ok(item)
    }

    /// Update the descriptive metadata. The full form is always sent.
    pub async fn update_media_metadata(
        &self,
        id: &MediaId,
        update: &MediaMetadataUpdate,
    ) -> Result<MediaItem, ApiError> {
        let method = match self.config().update_method {
            UpdateMethod::Patch => Method::PATCH,
            UpdateMethod::Put => Method::PUT,
        };
        let response: ItemResponse = self
            .send_json(method, &self.urls().item_path(id), update)
            .await?;
        tracing::info!(media_id = %id, "Media metadata updated");
        Ok(response.into_item())
    }

    /// Move a media item to the trash.
    pub async fn soft_delete_media(&self, id: &MediaId) -> Result<(), ApiError> {
        self.delete(&self.urls().item_path(id)).await?;
        tracing::info!(media_id = %id, "Media moved to trash");
        Ok(())
    }

    /// Permanently delete a media item and its stored file.
    pub async fn hard_delete_media(&self, id: &MediaId) -> Result<(), ApiError> {
        self.delete(&self.urls().permanent_delete_path(id)).await?;
        tracing::info!(media_id = %id, "Media permanently deleted");
        Ok(())
    }
}

#[async_trait]
impl MediaService for ApiClient {
    async fn list(&self, filter: &QueryFilter) -> Result<MediaListResponse, ApiError> {
        self.list_media(filter).await
    }

    async fn get(&self, id: &MediaId) -> Result<MediaItem, ApiError> {
        self.get_media(id).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<MediaItem, ApiError> {
        self.upload_media(request).await
    }

    async fn update_metadata(
        &self,
        id: &MediaId,
        update: &MediaMetadataUpdate,
    ) -> Result<MediaItem, ApiError> {
        self.update_media_metadata(id, update).await
    }

    async fn soft_delete(&self, id: &MediaId) -> Result<(), ApiError> {
        self.soft_delete_media(id).await
    }

    async fn hard_delete(&self, id: &MediaId) -> Result<(), ApiError> {
        self.hard_delete_media(id).await
    }

    fn urls(&self) -> &MediaUrls {
        ApiClient::urls(self)
    }
}
