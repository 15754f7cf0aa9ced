pub mod media;
pub mod metadata;
pub mod query;

pub use media::{format_file_size, MediaId, MediaItem, PreviewKind, RecordId, UserId};
pub use metadata::MediaMetadataUpdate;
pub use query::{Pagination, QueryFilter, SortBy, SortOrder, DEFAULT_PAGE_SIZE};
