//! Photo record operations

use crate::{DbError, DbPool, Result, StoreEvent, StoreNotifier};
use serde::{Deserialize, Serialize};

/// Photo record in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub photo_id: i64,
    /// Opaque reference to the image bytes; never interpreted by the engine
    pub image_ref: String,
    /// Capture timestamp, unix seconds UTC; None when unknown
    pub taken_at: Option<i64>,
    pub note: Option<String>,
    pub liked: bool,
    pub added_at: i64,
}

/// Photo repository backed by SQLite
#[derive(Clone)]
pub struct PhotoDb {
    pool: DbPool,
    notifier: StoreNotifier,
}

impl PhotoDb {
    pub fn new(pool: DbPool, notifier: StoreNotifier) -> Self {
        Self { pool, notifier }
    }

    /// Subscribe to photo/folder change events
    pub fn notifier(&self) -> &StoreNotifier {
        &self.notifier
    }

    /// Insert a new photo record, returning its id
    pub fn insert_photo(
        &self,
        image_ref: &str,
        taken_at: Option<i64>,
        note: Option<&str>,
    ) -> Result<i64> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        conn.execute(
            "INSERT INTO photos (image_ref, taken_at, note) VALUES (?1, ?2, ?3)",
            rusqlite::params![image_ref, taken_at, note],
        )?;

        let photo_id = conn.last_insert_rowid();
        drop(conn);

        self.notifier.notify(StoreEvent::PhotosChanged);
        Ok(photo_id)
    }

    /// Get a photo by id
    pub fn get_photo(&self, photo_id: i64) -> Result<Option<PhotoRecord>> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT photo_id, image_ref, taken_at, note, liked, added_at
             FROM photos WHERE photo_id = ?1",
        )?;

        let result = stmt.query_row([photo_id], row_to_photo);

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every photo in the collection, oldest row first
    pub fn list_photos(&self) -> Result<Vec<PhotoRecord>> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT photo_id, image_ref, taken_at, note, liked, added_at
             FROM photos ORDER BY photo_id",
        )?;

        let rows = stmt.query_map([], row_to_photo)?;

        let mut photos = Vec::new();
        for row in rows {
            photos.push(row?);
        }

        Ok(photos)
    }

    /// Set the liked flag for a photo
    pub fn set_liked(&self, photo_id: i64, liked: bool) -> Result<()> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let rows = conn.execute(
            "UPDATE photos SET liked = ?1 WHERE photo_id = ?2",
            rusqlite::params![liked, photo_id],
        )?;
        drop(conn);

        if rows == 0 {
            return Err(DbError::NotFound(format!("photo {}", photo_id)));
        }

        self.notifier.notify(StoreEvent::PhotosChanged);
        Ok(())
    }

    /// Set or clear the note text for a photo
    pub fn set_note(&self, photo_id: i64, note: Option<&str>) -> Result<()> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let rows = conn.execute(
            "UPDATE photos SET note = ?1 WHERE photo_id = ?2",
            rusqlite::params![note, photo_id],
        )?;
        drop(conn);

        if rows == 0 {
            return Err(DbError::NotFound(format!("photo {}", photo_id)));
        }

        self.notifier.notify(StoreEvent::PhotosChanged);
        Ok(())
    }

    /// Delete a photo record; folder memberships cascade
    pub fn delete_photo(&self, photo_id: i64) -> Result<bool> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let rows = conn.execute("DELETE FROM photos WHERE photo_id = ?1", [photo_id])?;
        drop(conn);

        if rows > 0 {
            self.notifier.notify(StoreEvent::PhotosChanged);
        }
        Ok(rows > 0)
    }
}

fn row_to_photo(row: &rusqlite::Row<'_>) -> rusqlite::Result<PhotoRecord> {
    Ok(PhotoRecord {
        photo_id: row.get(0)?,
        image_ref: row.get(1)?,
        taken_at: row.get(2)?,
        note: row.get(3)?,
        liked: row.get(4)?,
        added_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_pool;
    use crate::schema::migrate;
    use tempfile::NamedTempFile;

    fn test_db() -> (PhotoDb, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let pool = init_pool(temp_file.path()).unwrap();
        migrate(&pool).unwrap();
        (PhotoDb::new(pool, StoreNotifier::new()), temp_file)
    }

    #[test]
    fn test_insert_and_get() {
        let (db, _guard) = test_db();

        let id = db
            .insert_photo("img/0001.jpg", Some(1_704_412_800), Some("beach"))
            .unwrap();

        let photo = db.get_photo(id).unwrap().unwrap();
        assert_eq!(photo.image_ref, "img/0001.jpg");
        assert_eq!(photo.taken_at, Some(1_704_412_800));
        assert_eq!(photo.note.as_deref(), Some("beach"));
        assert!(!photo.liked);
    }

    #[test]
    fn test_get_missing_photo() {
        let (db, _guard) = test_db();
        assert!(db.get_photo(42).unwrap().is_none());
    }

    #[test]
    fn test_list_photos() {
        let (db, _guard) = test_db();

        db.insert_photo("a.jpg", None, None).unwrap();
        db.insert_photo("b.jpg", Some(1_700_000_000), None).unwrap();

        let photos = db.list_photos().unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].image_ref, "a.jpg");
        assert_eq!(photos[1].image_ref, "b.jpg");
    }

    #[test]
    fn test_set_liked_and_note() {
        let (db, _guard) = test_db();
        let id = db.insert_photo("a.jpg", None, None).unwrap();

        db.set_liked(id, true).unwrap();
        db.set_note(id, Some("sunset")).unwrap();

        let photo = db.get_photo(id).unwrap().unwrap();
        assert!(photo.liked);
        assert_eq!(photo.note.as_deref(), Some("sunset"));

        db.set_note(id, None).unwrap();
        assert!(db.get_photo(id).unwrap().unwrap().note.is_none());
    }

    #[test]
    fn test_set_liked_missing_photo() {
        let (db, _guard) = test_db();
        assert!(matches!(db.set_liked(99, true), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_delete_photo() {
        let (db, _guard) = test_db();
        let id = db.insert_photo("a.jpg", None, None).unwrap();

        assert!(db.delete_photo(id).unwrap());
        assert!(db.get_photo(id).unwrap().is_none());

        // Second delete is a no-op
        assert!(!db.delete_photo(id).unwrap());
    }

    #[test]
    fn test_mutations_notify() {
        let (db, _guard) = test_db();
        let rx = db.notifier().subscribe();

        let id = db.insert_photo("a.jpg", None, None).unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreEvent::PhotosChanged));

        db.set_liked(id, true).unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreEvent::PhotosChanged));

        db.delete_photo(id).unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreEvent::PhotosChanged));
    }
}
