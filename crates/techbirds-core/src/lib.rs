//! TechBirds Core Library
//!
//! This crate provides the domain models, error taxonomy and configuration
//! shared by the media service client, the media library controllers and the CLI.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, MediaEndpoints, UpdateMethod};
pub use error::{ErrorMetadata, FailureKind, LogLevel};
pub use models::{
    format_file_size, MediaId, MediaItem, MediaMetadataUpdate, Pagination, PreviewKind,
    QueryFilter, RecordId, SortBy, SortOrder, UserId,
};
