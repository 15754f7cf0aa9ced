//! Confirmation modal for destructive actions.
//!
//! Requesting an action only records it; nothing reaches the network until
//! `confirm` hands the action back to the caller.

use techbirds_core::MediaId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    Trash(MediaId),
    HardDelete(MediaId),
    BulkTrash(Vec<MediaId>),
    BulkHardDelete(Vec<MediaId>),
}

impl DestructiveAction {
    pub fn ids(&self) -> Vec<MediaId> {
        match self {
            DestructiveAction::Trash(id) | DestructiveAction::HardDelete(id) => vec![id.clone()],
            DestructiveAction::BulkTrash(ids) | DestructiveAction::BulkHardDelete(ids) => {
                ids.clone()
            }
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            DestructiveAction::HardDelete(_) | DestructiveAction::BulkHardDelete(_)
        )
    }

    /// Question shown in the modal.
    pub fn prompt(&self) -> String {
        match self {
            DestructiveAction::Trash(_) => "Move this file to the trash?".to_string(),
            DestructiveAction::HardDelete(_) => {
                "Permanently delete this file? This cannot be undone.".to_string()
            }
            DestructiveAction::BulkTrash(ids) => {
                format!("Move {} files to the trash?", ids.len())
            }
            DestructiveAction::BulkHardDelete(ids) => format!(
                "Permanently delete {} files? This cannot be undone.",
                ids.len()
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmationModal {
    pending: Option<DestructiveAction>,
}

impl ConfirmationModal {
    /// Open the modal. A newer request replaces an unanswered one.
    pub fn request(&mut self, action: DestructiveAction) -> &DestructiveAction {
        self.pending.insert(action)
    }

    pub fn pending(&self) -> Option<&DestructiveAction> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Close the modal and release the action for execution.
    pub fn confirm(&mut self) -> Option<DestructiveAction> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
