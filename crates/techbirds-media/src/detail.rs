//! Item detail/edit panel.
//!
//! State machine: `Closed` → `Viewing` on select, `Viewing` → `Submitting` while
//! a save is in flight, back to `Viewing` when it resolves. The panel holds only
//! the id of the bound item and re-resolves it from the listing after every
//! refresh; it never patches its own copy.

use techbirds_api_client::{ApiError, MediaUrls};
use techbirds_core::{MediaId, MediaItem, MediaMetadataUpdate, PreviewKind};

use crate::feedback::{log_failure, mutation_error_message};
use crate::LibraryError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Viewing(MediaId),
    Submitting(MediaId),
}

/// What the view renders for the bound item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Image { src: String, alt: String },
    Video { src: String, poster: String },
    Audio { src: String },
    Pdf { src: String },
    Generic { thumbnail: String, file_name: String },
}

impl Preview {
    pub fn for_item(item: &MediaItem, urls: &MediaUrls) -> Self {
        let thumbnail = urls.thumbnail_url(&item.id, item);
        match item.preview_kind() {
            PreviewKind::Image => Preview::Image {
                src: thumbnail,
                alt: item
                    .alt_text
                    .clone()
                    .unwrap_or_else(|| item.display_name().to_string()),
            },
            PreviewKind::Video => Preview::Video {
                src: urls.file_url(&item.id),
                poster: thumbnail,
            },
            PreviewKind::Audio => Preview::Audio {
                src: urls.file_url(&item.id),
            },
            PreviewKind::Pdf => Preview::Pdf {
                src: urls.file_url(&item.id),
            },
            PreviewKind::Generic => Preview::Generic {
                thumbnail,
                file_name: item.display_name().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    state: PanelState,
    form: MediaMetadataUpdate,
    error: Option<String>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, PanelState::Submitting(_))
    }

    pub fn selected_id(&self) -> Option<&MediaId> {
        match &self.state {
            PanelState::Closed => None,
            PanelState::Viewing(id) | PanelState::Submitting(id) => Some(id),
        }
    }

    pub fn form(&self) -> &MediaMetadataUpdate {
        &self.form
    }

    /// Editable form; `None` unless an item is open and no save is running.
    pub fn form_mut(&mut self) -> Option<&mut MediaMetadataUpdate> {
        match self.state {
            PanelState::Viewing(_) => Some(&mut self.form),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open (or switch to) an item with the form prefilled from its metadata.
    pub fn select(&mut self, item: &MediaItem) -> Result<(), LibraryError> {
        if self.is_submitting() {
            return Err(LibraryError::SaveInProgress);
        }
        self.state = PanelState::Viewing(item.id.clone());
        self.form = MediaMetadataUpdate::from_item(item);
        self.error = None;
        Ok(())
    }

    /// Close and drop any unsaved edits.
    pub fn close(&mut self) {
        self.state = PanelState::Closed;
        self.form = MediaMetadataUpdate::default();
        self.error = None;
    }

    /// Enter `Submitting` and hand out the full form for the update call.
    pub fn begin_submit(&mut self) -> Result<(MediaId, MediaMetadataUpdate), LibraryError> {
        let id = match &self.state {
            PanelState::Viewing(id) => id.clone(),
            PanelState::Submitting(_) => return Err(LibraryError::SaveInProgress),
            PanelState::Closed => return Err(LibraryError::NoItemOpen),
        };
        self.state = PanelState::Submitting(id.clone());
        self.error = None;
        Ok((id, self.form.clone()))
    }

    /// Back to `Viewing`. On failure the edits stay in the form next to the message.
    /// Returns the saved item on success.
    pub fn finish_submit(&mut self, result: Result<MediaItem, ApiError>) -> Option<MediaItem> {
        let id = match &self.state {
            PanelState::Submitting(id) => id.clone(),
            // Closed while the save was in flight.
            _ => return result.ok(),
        };
        self.state = PanelState::Viewing(id);

        match result {
            Ok(item) => {
                self.form = MediaMetadataUpdate::from_item(&item);
                Some(item)
            }
            Err(err) => {
                log_failure("update", &err);
                self.error = Some(mutation_error_message(&err));
                None
            }
        }
    }

    /// Inline error for an action run on the open item (e.g. a failed delete).
    pub fn show_error(&mut self, message: impl Into<String>) {
        if self.is_open() {
            self.error = Some(message.into());
        }
    }

    /// Re-resolve the bound item after a refresh. Closes when it is gone;
    /// with `refill` the form is reloaded from the refreshed record.
    pub fn rebind(&mut self, items: &[MediaItem], refill: bool) {
        let Some(id) = self.selected_id().cloned() else {
            return;
        };
        match items.iter().find(|item| item.id == id) {
            Some(item) if refill && !self.is_submitting() => {
                self.form = MediaMetadataUpdate::from_item(item);
            }
            Some(_) => {}
            None if !self.is_submitting() => {
                tracing::debug!(media_id = %id, "Bound item no longer listed, closing panel");
                self.close();
            }
            None => {}
        }
    }

    /// Close if the given item was the one on display.
    pub fn item_removed(&mut self, id: &MediaId) {
        if self.selected_id() == Some(id) {
            self.close();
        }
    }
}
