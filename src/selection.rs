//! # Selection Model
//!
//! Selection state driven from the model side instead of from a list widget.
//! Supports single, toggling, multi and capped multi selection, plus a
//! separate "previewed" entry for hover.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Clicks never change the selection.
    None,
    /// A click replaces the selection.
    #[default]
    Single,
    /// A click on the selected entry clears it, otherwise replaces the selection.
    SingleToggle,
    /// A click adds or removes the entry.
    Multi,
    /// Like `Multi`, but additions stop at the configured maximum.
    MultiLimited,
}

#[derive(Debug, Clone)]
pub struct SelectionModel<T> {
    mode: SelectionMode,
    max_selection_count: usize,
    selected: Vec<T>,
    last_selected: Option<T>,
    previewed: Option<T>,
}

impl<T: Clone + PartialEq> SelectionModel<T> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            max_selection_count: 1,
            selected: Vec::new(),
            last_selected: None,
            previewed: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    pub fn max_selection_count(&self) -> usize {
        self.max_selection_count
    }

    /// Clamped to at least one.
    pub fn set_max_selection_count(&mut self, max: usize) {
        self.max_selection_count = max.max(1);
    }

    pub fn selected(&self) -> &[T] {
        &self.selected
    }

    pub fn last_selected(&self) -> Option<&T> {
        self.last_selected.as_ref()
    }

    pub fn previewed(&self) -> Option<&T> {
        self.previewed.as_ref()
    }

    pub fn is_selected(&self, entry: &T) -> bool {
        self.selected.contains(entry)
    }

    /// Applies a click according to the current mode. Returns `true` if the
    /// selection changed.
    pub fn toggle(&mut self, entry: T) -> bool {
        let mut next = self.selected.clone();
        let already_selected = next.contains(&entry);

        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                next.clear();
                next.push(entry);
            }
            SelectionMode::SingleToggle => {
                if already_selected {
                    next.retain(|e| e != &entry);
                } else {
                    next.clear();
                    next.push(entry);
                }
            }
            SelectionMode::Multi => {
                if already_selected {
                    next.retain(|e| e != &entry);
                } else {
                    next.push(entry);
                }
            }
            SelectionMode::MultiLimited => {
                if already_selected {
                    next.retain(|e| e != &entry);
                } else if next.len() < self.max_selection_count {
                    next.push(entry);
                }
            }
        }

        self.set_selected(next)
    }

    pub fn preview(&mut self, entry: Option<T>) {
        self.previewed = entry;
    }

    pub fn clear_preview(&mut self) {
        self.previewed = None;
    }

    pub fn clear_selection(&mut self) -> bool {
        self.set_selected(Vec::new())
    }

    /// Replaces the whole selection, bypassing the mode. Returns `true` if it changed.
    pub fn set_selected(&mut self, next: Vec<T>) -> bool {
        if next == self.selected {
            return false;
        }
        self.last_selected = next.last().cloned();
        self.selected = next;
        true
    }
}

impl<T: Clone + PartialEq> Default for SelectionModel<T> {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_replaces() {
        let mut selection = SelectionModel::new(SelectionMode::Single);
        assert!(selection.toggle("a"));
        assert!(selection.toggle("b"));
        assert_eq!(selection.selected(), &["b"]);
        assert_eq!(selection.last_selected(), Some(&"b"));

        // Clicking the selected entry again keeps it selected.
        assert!(!selection.toggle("b"));
        assert!(selection.is_selected(&"b"));
    }

    #[test]
    fn test_single_toggle_clears_on_second_click() {
        let mut selection = SelectionModel::new(SelectionMode::SingleToggle);
        selection.toggle("a");
        selection.toggle("a");
        assert!(selection.selected().is_empty());
        assert_eq!(selection.last_selected(), None);
    }

    #[test]
    fn test_multi_adds_and_removes() {
        let mut selection = SelectionModel::new(SelectionMode::Multi);
        selection.toggle(1);
        selection.toggle(2);
        selection.toggle(3);
        selection.toggle(2);
        assert_eq!(selection.selected(), &[1, 3]);
        assert_eq!(selection.last_selected(), Some(&3));
    }

    #[test]
    fn test_multi_limited_caps_additions() {
        let mut selection = SelectionModel::new(SelectionMode::MultiLimited);
        selection.set_max_selection_count(2);
        selection.toggle(1);
        selection.toggle(2);
        assert!(!selection.toggle(3));
        assert_eq!(selection.selected(), &[1, 2]);

        // Removing still works at the cap.
        selection.toggle(1);
        selection.toggle(3);
        assert_eq!(selection.selected(), &[2, 3]);
    }

    #[test]
    fn test_max_selection_count_floor() {
        let mut selection = SelectionModel::<u8>::new(SelectionMode::MultiLimited);
        selection.set_max_selection_count(0);
        assert_eq!(selection.max_selection_count(), 1);
    }

    #[test]
    fn test_none_mode_ignores_clicks() {
        let mut selection = SelectionModel::new(SelectionMode::None);
        assert!(!selection.toggle("a"));
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_preview_is_independent_of_selection() {
        let mut selection = SelectionModel::new(SelectionMode::Single);
        selection.toggle("a");
        selection.preview(Some("b"));
        assert_eq!(selection.previewed(), Some(&"b"));
        assert_eq!(selection.last_selected(), Some(&"a"));

        selection.clear_preview();
        assert_eq!(selection.previewed(), None);
        assert!(selection.clear_selection());
        assert!(!selection.clear_selection());
    }
}
