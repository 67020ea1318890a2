//! Folder record and membership operations

use crate::{DbError, DbPool, Result, StoreEvent, StoreNotifier};
use serde::{Deserialize, Serialize};

/// Folder record (a user-named album)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub folder_id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Folder repository backed by SQLite
#[derive(Clone)]
pub struct FolderDb {
    pool: DbPool,
    notifier: StoreNotifier,
}

impl FolderDb {
    pub fn new(pool: DbPool, notifier: StoreNotifier) -> Self {
        Self { pool, notifier }
    }

    /// Create a folder, optionally seeding it with member photos.
    ///
    /// Name validation happens in the layer above; the repository accepts
    /// whatever it is handed.
    pub fn create_folder(&self, name: &str, photo_ids: &[i64]) -> Result<i64> {
        let mut conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let tx = conn.transaction()?;
        tx.execute("INSERT INTO folders (name) VALUES (?1)", [name])?;
        let folder_id = tx.last_insert_rowid();

        for &photo_id in photo_ids {
            tx.execute(
                "INSERT OR IGNORE INTO folder_photos (folder_id, photo_id) VALUES (?1, ?2)",
                [folder_id, photo_id],
            )?;
        }
        tx.commit()?;
        drop(conn);

        self.notifier.notify(StoreEvent::FoldersChanged);
        Ok(folder_id)
    }

    /// Get a folder by id
    pub fn get_folder(&self, folder_id: i64) -> Result<Option<FolderRecord>> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT folder_id, name, created_at FROM folders WHERE folder_id = ?1",
        )?;

        let result = stmt.query_row([folder_id], row_to_folder);

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all folders, oldest first
    pub fn list_folders(&self) -> Result<Vec<FolderRecord>> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let mut stmt =
            conn.prepare("SELECT folder_id, name, created_at FROM folders ORDER BY folder_id")?;

        let rows = stmt.query_map([], row_to_folder)?;

        let mut folders = Vec::new();
        for row in rows {
            folders.push(row?);
        }

        Ok(folders)
    }

    /// Add photos to a folder; already-present members are ignored
    pub fn add_photos(&self, folder_id: i64, photo_ids: &[i64]) -> Result<()> {
        let mut conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        if !folder_exists(&conn, folder_id)? {
            return Err(DbError::NotFound(format!("folder {}", folder_id)));
        }

        let tx = conn.transaction()?;
        for &photo_id in photo_ids {
            tx.execute(
                "INSERT OR IGNORE INTO folder_photos (folder_id, photo_id) VALUES (?1, ?2)",
                [folder_id, photo_id],
            )?;
        }
        tx.commit()?;
        drop(conn);

        self.notifier.notify(StoreEvent::FoldersChanged);
        Ok(())
    }

    /// Remove photos from a folder; absent members are ignored
    pub fn remove_photos(&self, folder_id: i64, photo_ids: &[i64]) -> Result<()> {
        let mut conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        if !folder_exists(&conn, folder_id)? {
            return Err(DbError::NotFound(format!("folder {}", folder_id)));
        }

        let tx = conn.transaction()?;
        for &photo_id in photo_ids {
            tx.execute(
                "DELETE FROM folder_photos WHERE folder_id = ?1 AND photo_id = ?2",
                [folder_id, photo_id],
            )?;
        }
        tx.commit()?;
        drop(conn);

        self.notifier.notify(StoreEvent::FoldersChanged);
        Ok(())
    }

    /// Ids of the photos in a folder, in insertion order
    pub fn member_photo_ids(&self, folder_id: i64) -> Result<Vec<i64>> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT photo_id FROM folder_photos WHERE folder_id = ?1 ORDER BY added_at, photo_id",
        )?;

        let rows = stmt.query_map([folder_id], |row| row.get(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }

        Ok(ids)
    }

    /// Delete a folder; memberships cascade, photos themselves are untouched
    pub fn delete_folder(&self, folder_id: i64) -> Result<bool> {
        let conn = self.pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

        let rows = conn.execute("DELETE FROM folders WHERE folder_id = ?1", [folder_id])?;
        drop(conn);

        if rows > 0 {
            self.notifier.notify(StoreEvent::FoldersChanged);
        }
        Ok(rows > 0)
    }
}

fn folder_exists(conn: &rusqlite::Connection, folder_id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM folders WHERE folder_id = ?1",
        [folder_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn row_to_folder(row: &rusqlite::Row<'_>) -> rusqlite::Result<FolderRecord> {
    Ok(FolderRecord {
        folder_id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photos::PhotoDb;
    use crate::pool::init_pool;
    use crate::schema::migrate;
    use tempfile::NamedTempFile;

    fn test_db() -> (PhotoDb, FolderDb, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let pool = init_pool(temp_file.path()).unwrap();
        migrate(&pool).unwrap();
        let notifier = StoreNotifier::new();
        (
            PhotoDb::new(pool.clone(), notifier.clone()),
            FolderDb::new(pool, notifier),
            temp_file,
        )
    }

    #[test]
    fn test_create_and_list() {
        let (photos, folders, _guard) = test_db();

        let a = photos.insert_photo("a.jpg", None, None).unwrap();
        let id = folders.create_folder("Trips", &[a]).unwrap();

        let all = folders.list_folders().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Trips");
        assert_eq!(folders.member_photo_ids(id).unwrap(), vec![a]);
    }

    #[test]
    fn test_add_photos_is_idempotent() {
        let (photos, folders, _guard) = test_db();

        let a = photos.insert_photo("a.jpg", None, None).unwrap();
        let b = photos.insert_photo("b.jpg", None, None).unwrap();
        let id = folders.create_folder("Family", &[]).unwrap();

        folders.add_photos(id, &[a, b]).unwrap();
        folders.add_photos(id, &[a, b]).unwrap();

        assert_eq!(folders.member_photo_ids(id).unwrap().len(), 2);
    }

    #[test]
    fn test_remove_photos_is_idempotent() {
        let (photos, folders, _guard) = test_db();

        let a = photos.insert_photo("a.jpg", None, None).unwrap();
        let id = folders.create_folder("Family", &[a]).unwrap();

        folders.remove_photos(id, &[a]).unwrap();
        folders.remove_photos(id, &[a]).unwrap();

        assert!(folders.member_photo_ids(id).unwrap().is_empty());
    }

    #[test]
    fn test_add_to_missing_folder() {
        let (_photos, folders, _guard) = test_db();
        assert!(matches!(
            folders.add_photos(7, &[1]),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_folder_cascades_membership() {
        let (photos, folders, _guard) = test_db();

        let a = photos.insert_photo("a.jpg", None, None).unwrap();
        let id = folders.create_folder("Trips", &[a]).unwrap();

        assert!(folders.delete_folder(id).unwrap());
        assert!(folders.get_folder(id).unwrap().is_none());
        // Photo itself survives
        assert!(photos.get_photo(a).unwrap().is_some());
    }

    #[test]
    fn test_photo_delete_cascades_membership() {
        let (photos, folders, _guard) = test_db();

        let a = photos.insert_photo("a.jpg", None, None).unwrap();
        let id = folders.create_folder("Trips", &[a]).unwrap();

        photos.delete_photo(a).unwrap();
        assert!(folders.member_photo_ids(id).unwrap().is_empty());
    }
}
