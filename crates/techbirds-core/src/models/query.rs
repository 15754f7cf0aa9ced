use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Sort field accepted by the media listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Created,
    Title,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Created => "created",
            SortBy::Title => "title",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" | "created_at" | "createdat" => Ok(SortBy::Created),
            "title" => Ok(SortBy::Title),
            other => Err(format!("Invalid sort field '{}'. Must be: created or title", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order '{}'. Must be: asc or desc", other)),
        }
    }
}

/// What is currently being viewed: page, page size, search text, MIME prefix
/// filter and ordering. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilter {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    /// MIME prefix such as "image/"; empty means all types.
    pub mime_type: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_SIZE)
    }
}

impl QueryFilter {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            mime_type: String::new(),
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }

    /// Query parameters for `GET /media`. Empty search and MIME filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            query.push(("search", search.to_string()));
        }
        if !self.mime_type.is_empty() {
            query.push(("mimeType", self.mime_type.clone()));
        }
        query.push(("sortBy", self.sort_by.as_str().to_string()));
        query.push(("sortOrder", self.sort_order.as_str().to_string()));
        query
    }
}

/// Read-only summary of where the current page sits in the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Build a pagination record, deriving `total_pages` from `total` and `limit`.
    pub fn derive(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(u64::from(limit));
        Self {
            page: page.max(1),
            limit,
            total,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    pub fn empty(filter: &QueryFilter) -> Self {
        Self::derive(filter.page, filter.limit, 0)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_matches_mount_state() {
        let filter = QueryFilter::default();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 24);
        assert!(filter.search.is_empty());
        assert!(filter.mime_type.is_empty());
        assert_eq!(filter.sort_by, SortBy::Created);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn query_pairs_include_search_and_mime_prefix() {
        let filter = QueryFilter {
            search: "cat".to_string(),
            mime_type: "image/".to_string(),
            ..QueryFilter::default()
        };
        let pairs = filter.to_query_pairs();
        assert!(pairs.contains(&("search", "cat".to_string())));
        assert!(pairs.contains(&("mimeType", "image/".to_string())));
        assert!(pairs.contains(&("sortBy", "created".to_string())));
        assert!(pairs.contains(&("sortOrder", "desc".to_string())));
    }

    #[test]
    fn query_pairs_omit_empty_filters() {
        let pairs = QueryFilter::default().to_query_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page", "limit", "sortBy", "sortOrder"]);
    }

    #[test]
    fn pagination_derives_total_pages() {
        let p = Pagination::derive(1, 24, 49);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert!(!p.has_prev());

        let empty = Pagination::derive(1, 24, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn sort_parsing() {
        assert_eq!("title".parse::<SortBy>().unwrap(), SortBy::Title);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("size".parse::<SortBy>().is_err());
    }
}
