//! Multi-select state machine
//!
//! Two modes: `Browsing` (taps open the viewer) and `Selecting` (taps
//! toggle membership in the working set). The mode is never `Selecting`
//! with an empty set once a public operation has returned: long-press
//! entry inserts the pressed id in the same step, and any removal that
//! empties the set drops back to `Browsing`.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Browsing,
    Selecting,
}

/// What a tap meant in the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Browsing mode: the caller should open the full-screen viewer
    OpenViewer,
    /// Selecting mode: membership was toggled
    Toggled,
}

#[derive(Debug, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    selected: HashSet<i64>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected_ids(&self) -> &HashSet<i64> {
        &self.selected
    }

    pub fn is_selected(&self, photo_id: i64) -> bool {
        self.selected.contains(&photo_id)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// A tap on a photo. Browsing: no mutation, the caller opens the
    /// viewer. Selecting: toggle membership, exiting to Browsing when the
    /// set empties.
    pub fn tap(&mut self, photo_id: i64) -> TapAction {
        match self.mode {
            SelectionMode::Browsing => TapAction::OpenViewer,
            SelectionMode::Selecting => {
                self.toggle(photo_id);
                TapAction::Toggled
            }
        }
    }

    /// A long-press on a photo. Browsing: enter Selecting with this photo
    /// selected. Selecting: behaves as a tap.
    pub fn long_press(&mut self, photo_id: i64) {
        match self.mode {
            SelectionMode::Browsing => {
                self.selected.insert(photo_id);
                self.mode = SelectionMode::Selecting;
            }
            SelectionMode::Selecting => {
                self.toggle(photo_id);
            }
        }
    }

    /// Empty the set and return to Browsing; idempotent
    pub fn clear(&mut self) {
        self.selected.clear();
        self.mode = SelectionMode::Browsing;
    }

    /// Drop selected ids no longer present in the live view
    pub fn reconcile(&mut self, valid_ids: &HashSet<i64>) {
        self.selected.retain(|id| valid_ids.contains(id));
        if self.selected.is_empty() {
            self.mode = SelectionMode::Browsing;
        }
    }

    fn toggle(&mut self, photo_id: i64) {
        if !self.selected.remove(&photo_id) {
            self.selected.insert(photo_id);
        }
        if self.selected.is_empty() {
            self.mode = SelectionMode::Browsing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    /// The mode/set invariant that must hold after every public operation
    fn assert_invariant(sel: &SelectionController) {
        assert_eq!(
            sel.mode() == SelectionMode::Selecting,
            !sel.selected_ids().is_empty()
        );
    }

    #[test]
    fn test_browsing_tap_opens_viewer() {
        let mut sel = SelectionController::new();
        assert_eq!(sel.tap(1), TapAction::OpenViewer);
        assert_eq!(sel.count(), 0);
        assert_eq!(sel.mode(), SelectionMode::Browsing);
        assert_invariant(&sel);
    }

    #[test]
    fn test_long_press_enters_selecting_then_tap_exits() {
        let mut sel = SelectionController::new();

        sel.long_press(5);
        assert_eq!(sel.mode(), SelectionMode::Selecting);
        assert_eq!(sel.selected_ids(), &set(&[5]));
        assert_invariant(&sel);

        assert_eq!(sel.tap(5), TapAction::Toggled);
        assert!(sel.selected_ids().is_empty());
        assert_eq!(sel.mode(), SelectionMode::Browsing);
        assert_invariant(&sel);
    }

    #[test]
    fn test_taps_toggle_in_selecting_mode() {
        let mut sel = SelectionController::new();
        sel.long_press(1);
        sel.tap(2);
        sel.tap(3);
        assert_eq!(sel.selected_ids(), &set(&[1, 2, 3]));

        sel.tap(2);
        assert_eq!(sel.selected_ids(), &set(&[1, 3]));
        assert_eq!(sel.mode(), SelectionMode::Selecting);
        assert_invariant(&sel);
    }

    #[test]
    fn test_long_press_toggles_when_already_selecting() {
        let mut sel = SelectionController::new();
        sel.long_press(1);
        sel.long_press(2);
        assert_eq!(sel.selected_ids(), &set(&[1, 2]));

        sel.long_press(1);
        assert_eq!(sel.selected_ids(), &set(&[2]));
        assert_invariant(&sel);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut sel = SelectionController::new();
        sel.long_press(1);
        sel.tap(2);

        sel.clear();
        assert_eq!(sel.mode(), SelectionMode::Browsing);
        assert!(sel.selected_ids().is_empty());

        sel.clear();
        assert_eq!(sel.mode(), SelectionMode::Browsing);
        assert_invariant(&sel);
    }

    #[test]
    fn test_reconcile_drops_stale_ids() {
        let mut sel = SelectionController::new();
        sel.long_press(3);
        sel.tap(7);

        sel.reconcile(&set(&[1, 3]));
        assert_eq!(sel.selected_ids(), &set(&[3]));
        assert_eq!(sel.mode(), SelectionMode::Selecting);
        assert_invariant(&sel);
    }

    #[test]
    fn test_reconcile_to_empty_exits_selecting() {
        let mut sel = SelectionController::new();
        sel.long_press(7);

        sel.reconcile(&set(&[1, 2]));
        assert!(sel.selected_ids().is_empty());
        assert_eq!(sel.mode(), SelectionMode::Browsing);
        assert_invariant(&sel);
    }

    #[test]
    fn test_reconcile_is_subset_of_valid() {
        let mut sel = SelectionController::new();
        sel.long_press(1);
        sel.tap(2);
        sel.tap(3);

        let valid = set(&[2, 3, 4]);
        sel.reconcile(&valid);
        assert!(sel.selected_ids().is_subset(&valid));
        assert_invariant(&sel);
    }
}
