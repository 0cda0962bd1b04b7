//! Page handlers for the Shelf web UI.

pub mod auth;
pub mod dashboard;
pub mod files;

pub use auth::*;
pub use dashboard::*;
pub use files::*;

use crate::db::Database;
use crate::storage::BlobStorage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (pooled, cheap to clone).
    pub db: Database,
    /// Blob storage for uploaded file contents.
    pub storage: BlobStorage,
    /// Session lifetime in hours.
    pub session_ttl_hours: i64,
    /// Maximum upload size in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Database,
        storage: BlobStorage,
        session_ttl_hours: i64,
        max_upload_size: usize,
    ) -> Self {
        Self {
            db,
            storage,
            session_ttl_hours,
            max_upload_size,
        }
    }
}
