//! Store interfaces the session depends on
//!
//! The session coordinator receives these as injected trait objects at
//! construction instead of reaching for process-wide repositories. The
//! SQLite-backed stores from `app_db` implement them directly; tests plug
//! in in-memory doubles.

use crate::error::GalleryError;
use app_db::{FolderDb, FolderRecord, PhotoDb, PhotoRecord};

/// Source of truth for photo records
pub trait PhotoStore: Send + Sync {
    /// Snapshot of the full photo collection
    fn all(&self) -> Result<Vec<PhotoRecord>, GalleryError>;

    fn set_liked(&self, photo_id: i64, liked: bool) -> Result<(), GalleryError>;

    fn set_note(&self, photo_id: i64, note: Option<&str>) -> Result<(), GalleryError>;

    /// Returns whether a record was actually removed
    fn delete(&self, photo_id: i64) -> Result<bool, GalleryError>;
}

/// Source of truth for folder records and their memberships
pub trait FolderStore: Send + Sync {
    fn create(&self, name: &str, photo_ids: &[i64]) -> Result<i64, GalleryError>;

    fn add_photos(&self, folder_id: i64, photo_ids: &[i64]) -> Result<(), GalleryError>;

    fn remove_photos(&self, folder_id: i64, photo_ids: &[i64]) -> Result<(), GalleryError>;

    fn list(&self) -> Result<Vec<FolderRecord>, GalleryError>;

    fn delete(&self, folder_id: i64) -> Result<bool, GalleryError>;
}

impl PhotoStore for PhotoDb {
    fn all(&self) -> Result<Vec<PhotoRecord>, GalleryError> {
        Ok(self.list_photos()?)
    }

    fn set_liked(&self, photo_id: i64, liked: bool) -> Result<(), GalleryError> {
        Ok(PhotoDb::set_liked(self, photo_id, liked)?)
    }

    fn set_note(&self, photo_id: i64, note: Option<&str>) -> Result<(), GalleryError> {
        Ok(PhotoDb::set_note(self, photo_id, note)?)
    }

    fn delete(&self, photo_id: i64) -> Result<bool, GalleryError> {
        Ok(self.delete_photo(photo_id)?)
    }
}

impl FolderStore for FolderDb {
    fn create(&self, name: &str, photo_ids: &[i64]) -> Result<i64, GalleryError> {
        Ok(self.create_folder(name, photo_ids)?)
    }

    fn add_photos(&self, folder_id: i64, photo_ids: &[i64]) -> Result<(), GalleryError> {
        Ok(FolderDb::add_photos(self, folder_id, photo_ids)?)
    }

    fn remove_photos(&self, folder_id: i64, photo_ids: &[i64]) -> Result<(), GalleryError> {
        Ok(FolderDb::remove_photos(self, folder_id, photo_ids)?)
    }

    fn list(&self) -> Result<Vec<FolderRecord>, GalleryError> {
        Ok(self.list_folders()?)
    }

    fn delete(&self, folder_id: i64) -> Result<bool, GalleryError> {
        Ok(self.delete_folder(folder_id)?)
    }
}
