//! Test helpers for controller unit tests
//!
//! An in-memory media backend that behaves like the admin API closely enough
//! for the controllers: filtering, paging, soft and hard deletes. Failures and
//! latency can be injected per operation.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use techbirds_api_client::{
    ApiError, MediaListResponse, MediaService, MediaUrls, PaginationPayload, UploadRequest,
};
use techbirds_core::{
    ClientConfig, MediaId, MediaItem, MediaMetadataUpdate, QueryFilter, SortBy, SortOrder,
};

/// Build a live media item. `created_at` grows with `id`.
pub fn media_item(id: u64, name: &str, mime_type: &str) -> MediaItem {
    MediaItem {
        id: MediaId::new(id.to_string()),
        url: format!("/uploads/{}", name),
        thumbnail_url: None,
        filename: format!("{}-{}", id, name),
        original_name: name.to_string(),
        mime_type: mime_type.to_string(),
        size: 1024 * id,
        width: None,
        height: None,
        title: name.to_string(),
        alt_text: None,
        caption: None,
        description: None,
        uploaded_by: Some(MediaId::from("1")),
        created_at: Some(
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
                + ChronoDuration::minutes(id as i64),
        ),
        updated_at: None,
        is_deleted: false,
        deleted_at: None,
    }
}

pub fn test_urls() -> MediaUrls {
    MediaUrls::new(&ClientConfig {
        api_url: "https://cms.techbirds.test".to_string(),
        ..ClientConfig::default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Upload,
    Update,
    SoftDelete,
    HardDelete,
}

/// A failure to inject; turned into an [`ApiError`] when the call happens.
#[derive(Debug, Clone)]
pub enum Failure {
    Status(u16, String),
    Network(String),
}

impl Failure {
    fn into_error(self) -> ApiError {
        match self {
            Failure::Status(status, body) => ApiError::from_status(status, body),
            Failure::Network(message) => ApiError::network(message),
        }
    }
}

/// Calls recorded in the order they reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(QueryFilter),
    Get(MediaId),
    Upload(String, MediaMetadataUpdate),
    Update(MediaId, MediaMetadataUpdate),
    SoftDelete(MediaId),
    HardDelete(MediaId),
}

#[derive(Default)]
struct MockState {
    items: Vec<MediaItem>,
    next_id: u64,
    calls: Vec<Call>,
    failures: HashMap<Operation, Vec<Failure>>,
    list_delays: HashMap<String, Duration>,
    list_count: usize,
}

/// Mock media backend for testing without HTTP
#[derive(Clone)]
pub struct MockMediaService {
    state: Arc<Mutex<MockState>>,
    urls: MediaUrls,
}

impl Default for MockMediaService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMediaService {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<MediaItem>) -> Self {
        let next_id = items
            .iter()
            .filter_map(|i| i.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Arc::new(Mutex::new(MockState {
                items,
                next_id,
                ..MockState::default()
            })),
            urls: test_urls(),
        }
    }

    /// The next call of `operation` fails. Multiple failures queue up.
    pub fn fail_next(&self, operation: Operation, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .failures
            .entry(operation)
            .or_default()
            .push(failure);
    }

    /// List calls whose search equals `search` wait `delay` before answering.
    pub fn delay_list_for(&self, search: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .list_delays
            .insert(search.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn list_calls(&self) -> Vec<QueryFilter> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(filter) => Some(filter),
                _ => None,
            })
            .collect()
    }

    /// Every record the backend holds, trashed ones included.
    pub fn stored(&self) -> Vec<MediaItem> {
        self.state.lock().unwrap().items.clone()
    }

    fn take_failure(&self, operation: Operation) -> Option<ApiError> {
        let mut state = self.state.lock().unwrap();
        let queue = state.failures.get_mut(&operation)?;
        if queue.is_empty() {
            return None;
        }
        Some(queue.remove(0).into_error())
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl MediaService for MockMediaService {
    async fn list(&self, filter: &QueryFilter) -> Result<MediaListResponse, ApiError> {
        self.record(Call::List(filter.clone()));
        let delay = self
            .state
            .lock()
            .unwrap()
            .list_delays
            .get(&filter.search)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.take_failure(Operation::List) {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let search = filter.search.trim().to_lowercase();
        let mut matching: Vec<MediaItem> = state
            .items
            .iter()
            .filter(|i| !i.is_deleted)
            .filter(|i| i.mime_type.starts_with(&filter.mime_type))
            .filter(|i| {
                search.is_empty()
                    || i.title.to_lowercase().contains(&search)
                    || i.original_name.to_lowercase().contains(&search)
            })
            .cloned()
            .collect();

        match filter.sort_by {
            SortBy::Created => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortBy::Title => matching.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        if filter.sort_order == SortOrder::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let start = ((filter.page.max(1) - 1) * filter.limit) as usize;
        let page: Vec<MediaItem> = matching
            .into_iter()
            .skip(start)
            .take(filter.limit as usize)
            .collect();

        // Rotate through every response shape the real backend has used.
        state.list_count += 1;
        let pagination = Some(PaginationPayload {
            page: Some(filter.page),
            limit: Some(filter.limit),
            total: Some(total),
            total_pages: None,
        });
        Ok(match state.list_count % 4 {
            1 => MediaListResponse::Items {
                items: page,
                pagination,
                total: None,
            },
            2 => MediaListResponse::Media {
                media: page,
                pagination: None,
                total: Some(total),
            },
            3 => MediaListResponse::Data {
                data: page,
                pagination,
                total: None,
            },
            _ if page.len() as u64 == total => MediaListResponse::Bare(page),
            _ => MediaListResponse::Items {
                items: page,
                pagination,
                total: None,
            },
        })
    }

    async fn get(&self, id: &MediaId) -> Result<MediaItem, ApiError> {
        self.record(Call::Get(id.clone()));
        if let Some(err) = self.take_failure(Operation::Get) {
            return Err(err);
        }
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|i| &i.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn upload(&self, request: UploadRequest) -> Result<MediaItem, ApiError> {
        self.record(Call::Upload(
            request.file.file_name.clone(),
            request.metadata.clone(),
        ));
        if let Some(err) = self.take_failure(Operation::Upload) {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;

        let mut item = media_item(id, &request.file.file_name, &request.file.content_type);
        item.size = request.file.len() as u64;
        apply_metadata(&mut item, &request.metadata);
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_metadata(
        &self,
        id: &MediaId,
        update: &MediaMetadataUpdate,
    ) -> Result<MediaItem, ApiError> {
        self.record(Call::Update(id.clone(), update.clone()));
        if let Some(err) = self.take_failure(Operation::Update) {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|i| &i.id == id && !i.is_deleted)
            .ok_or_else(|| not_found(id))?;
        apply_metadata(item, update);
        item.updated_at = Some(Utc::now());
        Ok(item.clone())
    }

    async fn soft_delete(&self, id: &MediaId) -> Result<(), ApiError> {
        self.record(Call::SoftDelete(id.clone()));
        if let Some(err) = self.take_failure(Operation::SoftDelete) {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|i| &i.id == id && !i.is_deleted)
            .ok_or_else(|| not_found(id))?;
        item.is_deleted = true;
        item.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn hard_delete(&self, id: &MediaId) -> Result<(), ApiError> {
        self.record(Call::HardDelete(id.clone()));
        if let Some(err) = self.take_failure(Operation::HardDelete) {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let before = state.items.len();
        state.items.retain(|i| &i.id != id);
        if state.items.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn urls(&self) -> &MediaUrls {
        &self.urls
    }
}

fn apply_metadata(item: &mut MediaItem, update: &MediaMetadataUpdate) {
    let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
    item.title = update.title.clone();
    item.alt_text = optional(&update.alt_text);
    item.caption = optional(&update.caption);
    item.description = optional(&update.description);
}

fn not_found(id: &MediaId) -> ApiError {
    ApiError::from_status(404, format!(r#"{{"message":"Media {} not found"}}"#, id))
}
