//! PhotoShelf Persistence Layer
//!
//! Provides:
//! - SQLite storage for photo and folder records
//! - Change notification for upper layers observing mutations

mod folders;
mod notifier;
mod photos;
mod pool;
mod schema;

pub use folders::{FolderDb, FolderRecord};
pub use notifier::{StoreEvent, StoreNotifier};
pub use photos::{PhotoDb, PhotoRecord};
pub use pool::DbPool;
pub use schema::migrate;

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Get the database directory
pub fn db_dir() -> PathBuf {
    ProjectDirs::from("com", "PhotoShelf", "PhotoShelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Initialize the database in the default location
pub fn init() -> Result<DbPool> {
    let db_path = db_dir();
    std::fs::create_dir_all(&db_path)?;

    open(&db_path.join("gallery.db"))
}

/// Open (or create) a database at an explicit path and run migrations
pub fn open(path: &Path) -> Result<DbPool> {
    let pool = pool::init_pool(path)?;
    migrate(&pool)?;

    tracing::info!("Database initialized at {:?}", path);
    Ok(pool)
}
