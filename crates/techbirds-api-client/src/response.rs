//! Listing response shapes and their normalization.
//!
//! The listing endpoint has answered with four different shapes over time. They
//! are modelled as one sum type and normalized in exactly one place.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use techbirds_core::{MediaItem, Pagination, QueryFilter};

/// Pagination block as sent by the server. Every field is optional; missing
/// ones are filled from the outgoing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPayload {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, alias = "total_pages", alias = "pages")]
    pub total_pages: Option<u32>,
}

/// `GET /media` response: a bare array or an object keyed by `items`, `media` or `data`.
///
/// Deserialization dispatches on the key present, so a malformed record is
/// reported by position instead of as "no variant matched".
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MediaListResponse {
    Bare(Vec<MediaItem>),
    Items {
        items: Vec<MediaItem>,
        #[serde(default)]
        pagination: Option<PaginationPayload>,
        #[serde(default)]
        total: Option<u64>,
    },
    Media {
        media: Vec<MediaItem>,
        #[serde(default)]
        pagination: Option<PaginationPayload>,
        #[serde(default)]
        total: Option<u64>,
    },
    Data {
        data: Vec<MediaItem>,
        #[serde(default)]
        pagination: Option<PaginationPayload>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl<'de> Deserialize<'de> for MediaListResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(values) => parse_items("items", values)
                .map(MediaListResponse::Bare)
                .map_err(de::Error::custom),
            Value::Object(mut object) => {
                let pagination = take_optional::<PaginationPayload>(&mut object, "pagination")
                    .map_err(de::Error::custom)?;
                let total =
                    take_optional::<u64>(&mut object, "total").map_err(de::Error::custom)?;

                for key in ["items", "media", "data"] {
                    let Some(value) = object.remove(key) else {
                        continue;
                    };
                    let Value::Array(values) = value else {
                        return Err(de::Error::custom(format!("`{}` must be an array", key)));
                    };
                    let items = parse_items(key, values).map_err(de::Error::custom)?;
                    return Ok(match key {
                        "items" => MediaListResponse::Items {
                            items,
                            pagination,
                            total,
                        },
                        "media" => MediaListResponse::Media {
                            media: items,
                            pagination,
                            total,
                        },
                        _ => MediaListResponse::Data {
                            data: items,
                            pagination,
                            total,
                        },
                    });
                }

                Err(de::Error::custom(
                    "expected an array or an object with `items`, `media` or `data`",
                ))
            }
            other => Err(de::Error::custom(format!(
                "expected an array or an object with `items`, `media` or `data`, got {}",
                value_kind(&other)
            ))),
        }
    }
}

fn parse_items(key: &str, values: Vec<Value>) -> Result<Vec<MediaItem>, String> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| format!("{}[{}]: {}", key, index, e))
        })
        .collect()
}

/// Remove `key` from the object; `null` counts as absent.
fn take_optional<T>(object: &mut Map<String, Value>, key: &str) -> Result<Option<T>, String>
where
    T: for<'a> Deserialize<'a>,
{
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| format!("{}: {}", key, e)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One page of items in server order plus where it sits in the full set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPage {
    pub items: Vec<MediaItem>,
    pub pagination: Pagination,
}

impl MediaListResponse {
    /// Collapse any shape into items + pagination.
    ///
    /// An explicit pagination block wins, then a top-level `total`, then the
    /// number of returned items. `page`/`limit` fall back to the filter that
    /// produced the request.
    pub fn normalize(self, filter: &QueryFilter) -> MediaPage {
        let (items, payload, top_total) = match self {
            MediaListResponse::Bare(items) => (items, None, None),
            MediaListResponse::Items {
                items,
                pagination,
                total,
            } => (items, pagination, total),
            MediaListResponse::Media {
                media,
                pagination,
                total,
            } => (media, pagination, total),
            MediaListResponse::Data {
                data,
                pagination,
                total,
            } => (data, pagination, total),
        };

        let payload = payload.unwrap_or_default();
        let total = payload
            .total
            .or(top_total)
            .unwrap_or(items.len() as u64);
        let mut pagination = Pagination::derive(
            payload.page.unwrap_or(filter.page),
            payload.limit.unwrap_or(filter.limit),
            total,
        );
        if let Some(total_pages) = payload.total_pages {
            pagination.total_pages = total_pages;
        }

        MediaPage { items, pagination }
    }
}

/// Single-item responses are either the bare record or wrapped in one key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemResponse {
    Bare(MediaItem),
    Data { data: MediaItem },
    Media { media: MediaItem },
    Item { item: MediaItem },
}

impl ItemResponse {
    pub(crate) fn into_item(self) -> MediaItem {
        match self {
            ItemResponse::Bare(item)
            | ItemResponse::Data { data: item }
            | ItemResponse::Media { media: item }
            | ItemResponse::Item { item } => item,
        }
    }
}
