//! Listing controller.
//!
//! Owns the authoritative in-memory page of items. Every fetch is tagged with a
//! monotonically increasing sequence number when it is issued; a response is
//! applied only if its ticket is still the latest one, so the view always shows
//! the most recently issued request regardless of the order responses arrive in.

use techbirds_api_client::{ApiError, MediaListResponse, MediaService};
use techbirds_core::{MediaId, MediaItem, Pagination, QueryFilter};

use crate::feedback::{list_error_message, log_failure};

/// Handle for one issued fetch: its sequence number and the filter it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filter: QueryFilter,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items and pagination replaced.
    Applied,
    /// Error message set.
    Failed,
    /// A newer fetch was issued; this response was discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListingController {
    items: Vec<MediaItem>,
    pagination: Pagination,
    /// Whether `pagination` came from a server answer.
    settled: bool,
    loading: bool,
    error: Option<String>,
    latest: u64,
    last_filter: Option<QueryFilter>,
}

impl Default for ListingController {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::empty(&QueryFilter::default()),
            settled: false,
            loading: false,
            error: None,
            latest: 0,
            last_filter: None,
        }
    }
}

impl ListingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Pagination of the last successful fetch; `None` before the first one
    /// lands or after a failure.
    pub fn known_pagination(&self) -> Option<&Pagination> {
        self.settled.then_some(&self.pagination)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: &MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &MediaId) -> bool {
        self.find(id).is_some()
    }

    /// Filter of the most recently issued fetch.
    pub fn last_filter(&self) -> Option<&QueryFilter> {
        self.last_filter.as_ref()
    }

    /// Register a new fetch. Any ticket issued earlier becomes stale.
    pub fn issue(&mut self, filter: &QueryFilter) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        self.last_filter = Some(filter.clone());
        tracing::debug!(seq = self.latest, page = filter.page, "Issuing media fetch");
        FetchTicket {
            seq: self.latest,
            filter: filter.clone(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Apply a response if its ticket is still current.
    ///
    /// Loading ends with the latest fetch, whether it succeeded or failed. A stale
    /// response leaves loading untouched since the latest fetch is still pending.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<MediaListResponse, ApiError>,
    ) -> FetchOutcome {
        if !self.is_current(&ticket) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest,
                "Discarding superseded media response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(response) => {
                let page = response.normalize(&ticket.filter);
                self.items = page.items;
                self.pagination = page.pagination;
                self.settled = true;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                log_failure("list", &err);
                self.items.clear();
                self.pagination = Pagination::empty(&ticket.filter);
                self.settled = false;
                self.error = Some(list_error_message(&err));
                FetchOutcome::Failed
            }
        }
    }

    /// Abandon an issued fetch without a response. Ends loading if it was the
    /// latest one; returns whether it was.
    pub fn cancel(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        tracing::debug!(seq = ticket.seq, "Media fetch cancelled");
        self.loading = false;
        true
    }

    /// Issue, await and resolve one fetch.
    pub async fn fetch<S>(&mut self, service: &S, filter: &QueryFilter) -> FetchOutcome
    where
        S: MediaService + ?Sized,
    {
        let ticket = self.issue(filter);
        let result = service.list(ticket.filter()).await;
        self.resolve(ticket, result)
    }

    /// Re-run the last issued fetch. `None` when nothing has been fetched yet.
    pub async fn retry<S>(&mut self, service: &S) -> Option<FetchOutcome>
    where
        S: MediaService + ?Sized,
    {
        let filter = self.last_filter.clone()?;
        Some(self.fetch(service, &filter).await)
    }
}
