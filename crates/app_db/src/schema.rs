//! Database schema and migrations

use crate::{DbError, DbPool, Result};

const SCHEMA_VERSION: i32 = 1;

/// Run database migrations
pub fn migrate(pool: &DbPool) -> Result<()> {
    let conn = pool.get().map_err(|e| DbError::Pool(e.to_string()))?;

    // Check current version
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap_or(0);

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            "Migrating database from version {} to {}",
            current_version,
            SCHEMA_VERSION
        );

        if current_version < 1 {
            apply_v1(&conn)?;
        }

        conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
    }

    Ok(())
}

fn apply_v1(conn: &rusqlite::Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Photos table: the authoritative photo collection
        CREATE TABLE IF NOT EXISTS photos (
            photo_id INTEGER PRIMARY KEY AUTOINCREMENT,

            -- Opaque reference to image bytes (never interpreted here)
            image_ref TEXT NOT NULL,

            -- Capture timestamp, unix seconds UTC; NULL when unknown
            taken_at INTEGER,

            -- Free-text note, searched by keyword
            note TEXT,

            -- Liked flag
            liked INTEGER NOT NULL DEFAULT 0,

            -- Import timestamp
            added_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_photos_taken ON photos(taken_at);
        CREATE INDEX IF NOT EXISTS idx_photos_liked ON photos(liked);

        -- Folders table (user-named albums)
        CREATE TABLE IF NOT EXISTS folders (
            folder_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        -- Folder-Photo membership (many-to-many)
        CREATE TABLE IF NOT EXISTS folder_photos (
            folder_id INTEGER NOT NULL REFERENCES folders(folder_id) ON DELETE CASCADE,
            photo_id INTEGER NOT NULL REFERENCES photos(photo_id) ON DELETE CASCADE,
            added_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            PRIMARY KEY (folder_id, photo_id)
        );

        CREATE INDEX IF NOT EXISTS idx_folder_photos_folder ON folder_photos(folder_id);
        CREATE INDEX IF NOT EXISTS idx_folder_photos_photo ON folder_photos(photo_id);
        "#,
    )?;

    Ok(())
}
