//! Gallery session coordinator
//!
//! The single surface the rendering layer talks to: commands come in
//! (taps, long-presses, drags, filter changes, folder assignment), derived
//! state is read back out (grid data, selection, viewer position). Derived
//! state is recomputed wholesale from the photo store on every relevant
//! change and never patched in place.

use crate::error::GalleryError;
use crate::fast_scroll::index_for_drag;
use crate::filter::{filter_photos, FilterCriteria, Segment};
use crate::grouping::{group_by_month, MonthGroup};
use crate::selection::{SelectionController, TapAction};
use crate::store::{FolderStore, PhotoStore};
use crate::viewer::ViewerState;
use app_db::PhotoRecord;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Side effect for the rendering layer to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Open the full-screen viewer at this position in the filtered sequence
    OpenViewer { index: usize },
    /// Scroll the grid to this position
    ScrollToIndex(usize),
}

/// Filtered + grouped projection of the photo collection
#[derive(Debug, Clone, Default)]
pub struct DerivedView {
    /// Filtered sequence, ascending capture order
    pub photos: Vec<PhotoRecord>,
    /// Month buckets in display order (newest first, unknown last)
    pub groups: Vec<MonthGroup>,
    /// Month key -> index of that month's first photo in `photos`
    pub start_index: HashMap<String, usize>,
}

impl DerivedView {
    fn build(all: &[PhotoRecord], criteria: &FilterCriteria, today: NaiveDate) -> Self {
        let photos = filter_photos(all, criteria, today);
        let (groups, start_index) = group_by_month(&photos);
        Self {
            photos,
            groups,
            start_index,
        }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Position of a photo within the filtered sequence
    pub fn position_of(&self, photo_id: i64) -> Option<usize> {
        self.photos.iter().position(|p| p.photo_id == photo_id)
    }

    /// Ids currently visible, for selection reconciliation
    pub fn ids(&self) -> HashSet<i64> {
        self.photos.iter().map(|p| p.photo_id).collect()
    }
}

/// One gallery viewing session
pub struct GallerySession {
    photos: Arc<dyn PhotoStore>,
    folders: Arc<dyn FolderStore>,
    criteria: FilterCriteria,
    derived: DerivedView,
    selection: SelectionController,
    viewer: ViewerState,
    /// Pinned "today" for segment arithmetic; `None` uses the local date
    reference_date: Option<NaiveDate>,
}

impl GallerySession {
    pub fn new(
        photos: Arc<dyn PhotoStore>,
        folders: Arc<dyn FolderStore>,
    ) -> Result<Self, GalleryError> {
        Self::build(photos, folders, None)
    }

    /// Construct with a fixed reference date for segment filtering.
    /// Deterministic month arithmetic for tests and previews.
    pub fn with_reference_date(
        photos: Arc<dyn PhotoStore>,
        folders: Arc<dyn FolderStore>,
        reference_date: NaiveDate,
    ) -> Result<Self, GalleryError> {
        Self::build(photos, folders, Some(reference_date))
    }

    fn build(
        photos: Arc<dyn PhotoStore>,
        folders: Arc<dyn FolderStore>,
        reference_date: Option<NaiveDate>,
    ) -> Result<Self, GalleryError> {
        let mut session = Self {
            photos,
            folders,
            criteria: FilterCriteria::default(),
            derived: DerivedView::default(),
            selection: SelectionController::new(),
            viewer: ViewerState::new(),
            reference_date,
        };
        session.rebuild()?;
        Ok(session)
    }

    // ===== Query surface =====

    pub fn derived(&self) -> &DerivedView {
        &self.derived
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    // ===== Change events =====

    /// The photo store reported a change; recompute everything
    pub fn on_repository_changed(&mut self) -> Result<(), GalleryError> {
        self.rebuild()
    }

    /// Replace the filter criteria wholesale
    pub fn set_filter(&mut self, criteria: FilterCriteria) -> Result<(), GalleryError> {
        self.criteria = criteria;
        self.rebuild()
    }

    /// Switch the date segment, keeping keyword/liked choices
    pub fn set_segment(&mut self, segment: Segment) -> Result<(), GalleryError> {
        self.criteria.segment = segment;
        self.rebuild()
    }

    // ===== Gesture commands =====

    /// A tap on a grid cell. Browsing mode opens the viewer; Selecting
    /// mode toggles membership. Ids not in the current view are ignored.
    pub fn handle_tap(&mut self, photo_id: i64) -> Option<SessionEffect> {
        let position = self.derived.position_of(photo_id)?;
        match self.selection.tap(photo_id) {
            TapAction::OpenViewer => {
                self.viewer.open_at(position, self.derived.len());
                Some(SessionEffect::OpenViewer { index: position })
            }
            TapAction::Toggled => None,
        }
    }

    /// A long-press on a grid cell; enters selection mode on first press
    pub fn handle_long_press(&mut self, photo_id: i64) {
        if self.derived.position_of(photo_id).is_some() {
            self.selection.long_press(photo_id);
        }
    }

    /// A drag on the fast-scroll handle
    pub fn handle_drag(&mut self, drag_y: f32, track_height: f32) -> Option<SessionEffect> {
        if self.derived.is_empty() {
            return None;
        }
        let index = index_for_drag(drag_y, track_height, self.derived.len());
        Some(SessionEffect::ScrollToIndex(index))
    }

    /// Leave selection mode without touching any photo
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ===== Viewer paging =====

    pub fn viewer_next(&mut self) -> bool {
        self.viewer.next(self.derived.len())
    }

    pub fn viewer_prev(&mut self) -> bool {
        self.viewer.prev()
    }

    pub fn viewer_close(&mut self) {
        self.viewer.close();
    }

    // ===== Repository commands =====

    /// Route the current selection into a folder. Selection survives a
    /// failure so the user can retry; success clears it.
    pub fn assign_selected_to_folder(&mut self, folder_id: i64) -> Result<usize, GalleryError> {
        let ids = self.selected_ids_sorted();
        if ids.is_empty() {
            return Err(GalleryError::Validation("no photos selected".into()));
        }

        self.folders.add_photos(folder_id, &ids)?;
        self.selection.clear();

        tracing::debug!("Assigned {} photos to folder {}", ids.len(), folder_id);
        Ok(ids.len())
    }

    /// Create a named folder seeded with the current selection
    pub fn create_folder_with_selected(&mut self, name: &str) -> Result<i64, GalleryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GalleryError::Validation(
                "folder name must not be empty".into(),
            ));
        }

        let ids = self.selected_ids_sorted();
        let folder_id = self.folders.create(name, &ids)?;
        self.selection.clear();

        tracing::debug!("Created folder {} with {} photos", folder_id, ids.len());
        Ok(folder_id)
    }

    /// Delete a photo. Derived state and selection repair through the
    /// ordinary change-notification path, not here.
    pub fn delete_photo(&mut self, photo_id: i64) -> Result<(), GalleryError> {
        if !self.photos.delete(photo_id)? {
            return Err(GalleryError::NotFound(format!("photo {}", photo_id)));
        }
        Ok(())
    }

    /// Flip the liked flag of a photo in the current view
    pub fn toggle_liked(&mut self, photo_id: i64) -> Result<bool, GalleryError> {
        let position = self
            .derived
            .position_of(photo_id)
            .ok_or_else(|| GalleryError::NotFound(format!("photo {}", photo_id)))?;

        let liked = !self.derived.photos[position].liked;
        self.photos.set_liked(photo_id, liked)?;
        Ok(liked)
    }

    // ===== Internals =====

    fn rebuild(&mut self) -> Result<(), GalleryError> {
        let all = self.photos.all()?;
        self.derived = DerivedView::build(&all, &self.criteria, self.today());
        self.selection.reconcile(&self.derived.ids());
        self.viewer.clamp_to(self.derived.len());

        tracing::debug!(
            "Derived view rebuilt: {} of {} photos, {} months",
            self.derived.len(),
            all.len(),
            self.derived.groups.len()
        );
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn selected_ids_sorted(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.selection.selected_ids().iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
