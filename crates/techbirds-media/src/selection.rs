//! Pure view state: multi-selection for bulk actions and the grid/list toggle.

use std::collections::BTreeSet;

use techbirds_core::{MediaId, MediaItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<MediaId>,
}

impl Selection {
    /// Returns whether the item is selected afterwards.
    pub fn toggle(&mut self, id: &MediaId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn select_all(&mut self, items: &[MediaItem]) {
        self.ids.extend(items.iter().map(|item| item.id.clone()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that are no longer on the current page.
    pub fn retain_listed(&mut self, items: &[MediaItem]) {
        self.ids
            .retain(|id| items.iter().any(|item| &item.id == id));
    }

    pub fn contains(&self, id: &MediaId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> Vec<MediaId> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::media_item;

    #[test]
    fn toggle_and_retain() {
        let items = vec![
            media_item(1, "a.png", "image/png"),
            media_item(2, "b.png", "image/png"),
        ];
        let mut selection = Selection::default();
        selection.select_all(&items);
        assert_eq!(selection.len(), 2);

        assert!(!selection.toggle(&items[0].id));
        assert!(selection.toggle(&items[0].id));

        selection.retain_listed(&items[1..]);
        assert_eq!(selection.ids(), vec![items[1].id.clone()]);
    }

    #[test]
    fn view_mode_toggles() {
        assert_eq!(ViewMode::default().toggled(), ViewMode::List);
        assert_eq!(ViewMode::List.toggled(), ViewMode::Grid);
    }
}
