//! Gallery error types

use thiserror::Error;

/// Main gallery error type
#[derive(Error, Debug)]
pub enum GalleryError {
    // ===== Recoverable Errors (notify user, session continues) =====
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl GalleryError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GalleryError::Validation(_)
                | GalleryError::NotFound(_)
                | GalleryError::Persistence(_)
                | GalleryError::Io(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::Validation(msg) => msg.clone(),
            GalleryError::NotFound(what) => format!("No longer exists: {}", what),
            GalleryError::Persistence(msg) => format!("Could not save changes: {}", msg),
            _ => self.to_string(),
        }
    }
}

impl From<app_db::DbError> for GalleryError {
    fn from(e: app_db::DbError) -> Self {
        match e {
            app_db::DbError::NotFound(what) => GalleryError::NotFound(what),
            _ => GalleryError::Persistence(e.to_string()),
        }
    }
}
