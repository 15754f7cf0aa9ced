//! The media library screen.
//!
//! Wires the controllers to a [`MediaService`]. Every mutation is awaited to
//! completion before the follow-up list refresh is issued, and destructive
//! actions only run after [`MediaLibrary::confirm`].

use techbirds_api_client::{FileUpload, MediaService};
use techbirds_core::{MediaId, MediaItem, MediaMetadataUpdate, Pagination, SortBy, SortOrder};

use crate::feedback::{log_failure, mutation_error_message};
use crate::{
    ConfirmationModal, DestructiveAction, DetailPanel, FetchOutcome, FilterState, LibraryError,
    ListingController, Preview, Selection, UploadFlow, UploadOutcome, ViewMode,
};

/// Result of a confirmed destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub action: DestructiveAction,
    pub succeeded: Vec<MediaId>,
    /// Failed ids with the message shown for each.
    pub failed: Vec<(MediaId, String)>,
}

impl ActionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One line describing the whole action.
    pub fn summary(&self) -> String {
        let verb = if self.action.is_permanent() {
            "permanently deleted"
        } else {
            "moved to the trash"
        };
        let total = self.succeeded.len() + self.failed.len();
        match (total, self.failed.first()) {
            (1, None) => format!("File {}", verb),
            (1, Some((_, message))) => message.clone(),
            (_, None) => format!("{} files {}", total, verb),
            (_, Some((_, message))) => format!(
                "{} of {} files {}; {} failed: {}",
                self.succeeded.len(),
                total,
                verb,
                self.failed.len(),
                message
            ),
        }
    }
}

pub struct MediaLibrary<S> {
    service: S,
    filter: FilterState,
    listing: ListingController,
    upload: UploadFlow,
    detail: DetailPanel,
    confirm: ConfirmationModal,
    selection: Selection,
    view_mode: ViewMode,
    notice: Option<String>,
    action_error: Option<String>,
}

impl<S: MediaService> MediaLibrary<S> {
    pub fn new(service: S, page_size: u32) -> Self {
        Self {
            service,
            filter: FilterState::new(page_size),
            listing: ListingController::new(),
            upload: UploadFlow::new(),
            detail: DetailPanel::new(),
            confirm: ConfirmationModal::default(),
            selection: Selection::default(),
            view_mode: ViewMode::default(),
            notice: None,
            action_error: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn listing(&self) -> &ListingController {
        &self.listing
    }

    pub fn items(&self) -> &[MediaItem] {
        self.listing.items()
    }

    pub fn pagination(&self) -> &Pagination {
        self.listing.pagination()
    }

    pub fn upload(&self) -> &UploadFlow {
        &self.upload
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn confirmation(&self) -> &ConfirmationModal {
        &self.confirm
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Last success message (upload, save, delete).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Outcome of the last destructive action when any part of it failed.
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn dismiss_action_error(&mut self) {
        self.action_error = None;
    }

    /// Initial fetch with the default filter.
    pub async fn mount(&mut self) -> FetchOutcome {
        self.refresh().await
    }

    /// Re-fetch with the current filter.
    pub async fn refresh(&mut self) -> FetchOutcome {
        self.refresh_and_rebind(false).await
    }

    async fn refresh_and_rebind(&mut self, refill: bool) -> FetchOutcome {
        let filter = self.filter.filter().clone();
        let outcome = self.listing.fetch(&self.service, &filter).await;
        if outcome == FetchOutcome::Applied {
            self.after_applied(refill);
        }
        outcome
    }

    fn after_applied(&mut self, refill: bool) {
        self.selection.retain_listed(self.listing.items());
        self.detail.rebind(self.listing.items(), refill);
    }

    async fn refetch_if(&mut self, changed: bool) -> Option<FetchOutcome> {
        if changed {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    pub async fn set_search(&mut self, search: impl Into<String>) -> Option<FetchOutcome> {
        let changed = self.filter.set_search(search);
        self.refetch_if(changed).await
    }

    pub async fn set_mime_type(&mut self, mime_type: impl Into<String>) -> Option<FetchOutcome> {
        let changed = self.filter.set_mime_type(mime_type);
        self.refetch_if(changed).await
    }

    pub async fn set_sort_by(&mut self, sort_by: SortBy) -> Option<FetchOutcome> {
        let changed = self.filter.set_sort_by(sort_by);
        self.refetch_if(changed).await
    }

    pub async fn set_sort_order(&mut self, sort_order: SortOrder) -> Option<FetchOutcome> {
        let changed = self.filter.set_sort_order(sort_order);
        self.refetch_if(changed).await
    }

    pub async fn set_limit(&mut self, limit: u32) -> Option<FetchOutcome> {
        let changed = self.filter.set_limit(limit);
        self.refetch_if(changed).await
    }

    pub async fn set_page(&mut self, page: i64) -> Option<FetchOutcome> {
        let changed = self.filter.set_page(page);
        self.refetch_if(changed).await
    }

    pub async fn next_page(&mut self) -> Option<FetchOutcome> {
        let pagination = self.listing.known_pagination().copied();
        let changed = self.filter.next_page(pagination.as_ref());
        self.refetch_if(changed).await
    }

    pub async fn prev_page(&mut self) -> Option<FetchOutcome> {
        let changed = self.filter.prev_page();
        self.refetch_if(changed).await
    }

    pub async fn reset_filters(&mut self) -> Option<FetchOutcome> {
        let changed = self.filter.reset();
        self.refetch_if(changed).await
    }

    /// Re-run the last fetch after a listing error.
    pub async fn retry(&mut self) -> Option<FetchOutcome> {
        let outcome = self.listing.retry(&self.service).await?;
        if outcome == FetchOutcome::Applied {
            self.after_applied(false);
        }
        Some(outcome)
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    pub fn toggle_selected(&mut self, id: &MediaId) -> Result<bool, LibraryError> {
        if !self.listing.contains(id) {
            return Err(LibraryError::NotListed(id.clone()));
        }
        Ok(self.selection.toggle(id))
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.listing.items());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_file(&mut self, file: FileUpload) {
        self.upload.select_file(file);
    }

    pub fn upload_form_mut(&mut self) -> &mut MediaMetadataUpdate {
        self.upload.form_mut()
    }

    /// Upload the selected file, then refresh the listing on success.
    pub async fn submit_upload(&mut self) -> Result<UploadOutcome, LibraryError> {
        let request = self.upload.begin()?;
        let result = self.service.upload(request).await;
        let outcome = self.upload.finish(result);

        if let UploadOutcome::Uploaded(item) = &outcome {
            tracing::debug!(media_id = %item.id, "Upload applied, refreshing listing");
            self.notice = Some(format!("Uploaded {}", item.display_name()));
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Open the detail panel for an item on the current page.
    pub fn select_item(&mut self, id: &MediaId) -> Result<(), LibraryError> {
        let item = self
            .listing
            .find(id)
            .ok_or_else(|| LibraryError::NotListed(id.clone()))?;
        self.detail.select(item)
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Bound item as currently listed.
    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.detail
            .selected_id()
            .and_then(|id| self.listing.find(id))
    }

    pub fn selected_preview(&self) -> Option<Preview> {
        self.selected_item()
            .map(|item| Preview::for_item(item, self.service.urls()))
    }

    pub fn detail_form_mut(&mut self) -> Option<&mut MediaMetadataUpdate> {
        self.detail.form_mut()
    }

    /// Send the edit form. The panel stays open; on success the listing is
    /// refreshed and the form reloaded from the refreshed record.
    pub async fn save_detail(&mut self) -> Result<Option<MediaItem>, LibraryError> {
        let (id, update) = self.detail.begin_submit()?;
        let result = self.service.update_metadata(&id, &update).await;
        let saved = self.detail.finish_submit(result);

        if saved.is_some() {
            self.notice = Some("Changes saved".to_string());
            self.refresh_and_rebind(true).await;
        }
        Ok(saved)
    }

    /// Ask to move the open item to the trash.
    pub fn request_trash(&mut self) -> Result<&DestructiveAction, LibraryError> {
        let id = self.open_item_id()?;
        Ok(self.request(DestructiveAction::Trash(id)))
    }

    /// Ask to permanently delete the open item.
    pub fn request_hard_delete(&mut self) -> Result<&DestructiveAction, LibraryError> {
        let id = self.open_item_id()?;
        Ok(self.request(DestructiveAction::HardDelete(id)))
    }

    pub fn request_bulk_trash(&mut self) -> Result<&DestructiveAction, LibraryError> {
        let ids = self.selected_ids()?;
        Ok(self.request(DestructiveAction::BulkTrash(ids)))
    }

    pub fn request_bulk_hard_delete(&mut self) -> Result<&DestructiveAction, LibraryError> {
        let ids = self.selected_ids()?;
        Ok(self.request(DestructiveAction::BulkHardDelete(ids)))
    }

    /// Queue an arbitrary action for confirmation, e.g. by id from a command line.
    pub fn request(&mut self, action: DestructiveAction) -> &DestructiveAction {
        tracing::debug!(prompt = %action.prompt(), "Awaiting confirmation");
        self.confirm.request(action)
    }

    pub fn cancel_confirmation(&mut self) {
        self.confirm.cancel();
    }

    /// Run the pending destructive action, one call at a time, then refresh once.
    /// `None` when nothing was awaiting confirmation.
    pub async fn confirm(&mut self) -> Option<ActionReport> {
        let report = self.execute_confirmed().await?;
        self.refresh().await;
        Some(report)
    }

    /// Like [`confirm`](Self::confirm) but leaves the listing as it was.
    /// For one-shot callers that never show it again.
    pub async fn execute_confirmed(&mut self) -> Option<ActionReport> {
        let action = self.confirm.confirm()?;
        let permanent = action.is_permanent();
        let operation = if permanent { "hard_delete" } else { "soft_delete" };
        self.action_error = None;

        let mut report = ActionReport {
            action: action.clone(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for id in action.ids() {
            let result = if permanent {
                self.service.hard_delete(&id).await
            } else {
                self.service.soft_delete(&id).await
            };
            match result {
                Ok(()) => {
                    tracing::info!(media_id = %id, permanent, "Media removed");
                    self.detail.item_removed(&id);
                    report.succeeded.push(id);
                }
                Err(err) => {
                    log_failure(operation, &err);
                    report.failed.push((id, mutation_error_message(&err)));
                }
            }
        }

        if report.is_success() {
            self.notice = Some(report.summary());
        } else {
            self.notice = None;
            self.action_error = Some(report.summary());
            let open_failure = self.detail.selected_id().and_then(|open| {
                report
                    .failed
                    .iter()
                    .find(|(id, _)| id == open)
                    .map(|(_, message)| message.clone())
            });
            if let Some(message) = open_failure {
                self.detail.show_error(message);
            }
        }
        if matches!(
            action,
            DestructiveAction::BulkTrash(_) | DestructiveAction::BulkHardDelete(_)
        ) {
            self.selection.clear();
        }

        Some(report)
    }

    fn open_item_id(&self) -> Result<MediaId, LibraryError> {
        self.detail
            .selected_id()
            .cloned()
            .ok_or(LibraryError::NoItemOpen)
    }

    fn selected_ids(&self) -> Result<Vec<MediaId>, LibraryError> {
        if self.selection.is_empty() {
            return Err(LibraryError::NothingSelected);
        }
        Ok(self.selection.ids())
    }
}
