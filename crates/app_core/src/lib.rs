//! PhotoShelf Core Domain Logic
//!
//! The photo collection view-state engine:
//! - Filtering (keyword, liked flag, month segments)
//! - Month grouping with jump-to-month indices
//! - Multi-select state machine
//! - Fast-scroll drag mapping
//! - Full-screen paging viewer state
//! - The gallery session coordinator tying it all together
//!
//! Repositories are injected as explicit store interfaces at session
//! construction; there is no process-wide state.

pub mod config;
pub mod error;
pub mod fast_scroll;
pub mod filter;
pub mod grouping;
pub mod selection;
pub mod session;
pub mod store;
pub mod viewer;

pub use config::{GalleryConfig, GeneralConfig, GridConfig, ViewerConfig};
pub use error::GalleryError;
pub use fast_scroll::index_for_drag;
pub use filter::{filter_photos, FilterCriteria, Segment};
pub use grouping::{group_by_month, month_key, MonthGroup, UNKNOWN_MONTH_KEY};
pub use selection::{SelectionController, SelectionMode, TapAction};
pub use session::{DerivedView, GallerySession, SessionEffect};
pub use store::{FolderStore, PhotoStore};
pub use viewer::ViewerState;
