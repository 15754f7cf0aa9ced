//! TechBirds media library.
//!
//! Host-agnostic controllers for the admin media screen. Each piece owns one
//! slice of state and exposes the transitions a view drives:
//!
//! - [`FilterState`]: page, page size, search, MIME filter and ordering
//! - [`ListingController`]: fetch, normalize, and drop superseded responses
//! - [`UploadFlow`]: single-file upload with classified failure messages
//! - [`DetailPanel`]: preview and metadata editing for one selected item
//! - [`ConfirmationModal`]: explicit confirmation for destructive actions
//!
//! [`MediaLibrary`] wires them to a [`MediaService`](techbirds_api_client::MediaService)
//! and enforces the refresh-after-mutation ordering.

pub mod confirm;
pub mod detail;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod library;
pub mod listing;
pub mod selection;
pub mod upload;

#[cfg(test)]
pub mod test_helpers;

pub use confirm::{ConfirmationModal, DestructiveAction};
pub use detail::{DetailPanel, PanelState, Preview};
pub use error::LibraryError;
pub use filter::FilterState;
pub use library::{ActionReport, MediaLibrary};
pub use listing::{FetchOutcome, FetchTicket, ListingController};
pub use selection::{Selection, ViewMode};
pub use upload::{FileInput, UploadFlow, UploadOutcome};
