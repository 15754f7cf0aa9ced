//! Filter/pagination state.
//!
//! Every setter reports whether the filter changed so the caller knows to
//! re-fetch. Changing the result set (search, MIME filter, ordering, page size)
//! replaces the whole filter with `page = 1` in a single assignment.

use techbirds_core::{Pagination, QueryFilter, SortBy, SortOrder};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    filter: QueryFilter,
}

impl FilterState {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: QueryFilter::with_limit(page_size),
        }
    }

    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.filter.search {
            return false;
        }
        self.filter = QueryFilter {
            search,
            page: 1,
            ..self.filter.clone()
        };
        true
    }

    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) -> bool {
        let mime_type = mime_type.into();
        if mime_type == self.filter.mime_type {
            return false;
        }
        self.filter = QueryFilter {
            mime_type,
            page: 1,
            ..self.filter.clone()
        };
        true
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) -> bool {
        if sort_by == self.filter.sort_by {
            return false;
        }
        self.filter = QueryFilter {
            sort_by,
            page: 1,
            ..self.filter.clone()
        };
        true
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) -> bool {
        if sort_order == self.filter.sort_order {
            return false;
        }
        self.filter = QueryFilter {
            sort_order,
            page: 1,
            ..self.filter.clone()
        };
        true
    }

    /// Page size of zero is treated as one.
    pub fn set_limit(&mut self, limit: u32) -> bool {
        let limit = limit.max(1);
        if limit == self.filter.limit {
            return false;
        }
        self.filter = QueryFilter {
            limit,
            page: 1,
            ..self.filter.clone()
        };
        true
    }

    /// Clamped to a minimum of 1.
    pub fn set_page(&mut self, page: i64) -> bool {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        if page == self.filter.page {
            return false;
        }
        self.filter.page = page;
        true
    }

    /// Advance one page unless the pagination says this is the last one.
    /// An empty result has zero pages, so it blocks advancing too. `None`
    /// means nothing has been loaded yet.
    pub fn next_page(&mut self, pagination: Option<&Pagination>) -> bool {
        if let Some(pagination) = pagination {
            if self.filter.page >= pagination.total_pages {
                return false;
            }
        }
        self.set_page(i64::from(self.filter.page) + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(i64::from(self.filter.page) - 1)
    }

    /// Back to the mount defaults, keeping the page size.
    pub fn reset(&mut self) -> bool {
        let reset = QueryFilter::with_limit(self.filter.limit);
        if reset == self.filter {
            return false;
        }
        self.filter = reset;
        true
    }
}
