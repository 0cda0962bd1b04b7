//! Blob storage for Shelf.
//!
//! This module stores uploaded file contents on the local filesystem under
//! one directory per user:
//!
//! ```text
//! {base_path}/
//! ├── 1/
//! │   └── 1756600000000-report.pdf
//! ├── 2/
//! │   └── 1756600123456-photo.jpg
//! └── ...
//! ```
//!
//! Storage keys are `{millis}-{sanitized original name}` so that repeated
//! uploads of the same filename get distinct keys while staying readable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{Result, ShelfError};

/// Blob storage rooted at a base directory, one subdirectory per user.
#[derive(Debug, Clone)]
pub struct BlobStorage {
    /// Base directory for all user directories.
    base_path: PathBuf,
}

impl BlobStorage {
    /// Create a new BlobStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the directory for a user's blobs.
    pub fn user_dir(&self, user_id: i64) -> PathBuf {
        self.base_path.join(user_id.to_string())
    }

    /// Create a user's blob directory if it doesn't exist.
    pub fn create_user_dir(&self, user_id: i64) -> Result<()> {
        fs::create_dir_all(self.user_dir(user_id))?;
        Ok(())
    }

    /// Generate a storage key for an uploaded file.
    ///
    /// The key embeds the upload time in milliseconds and the sanitized
    /// original name. Keys for the same name differ across uploads.
    pub fn generate_storage_key(original_name: &str) -> String {
        format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        )
    }

    /// Save blob content under a user's directory with the given key.
    pub fn save(&self, user_id: i64, storage_key: &str, content: &[u8]) -> Result<()> {
        let file_path = self.blob_path(user_id, storage_key)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&file_path, content)?;

        Ok(())
    }

    /// Load blob content.
    pub fn load(&self, user_id: i64, storage_key: &str) -> Result<Vec<u8>> {
        let file_path = self.blob_path(user_id, storage_key)?;

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ShelfError::NotFound(format!("blob {storage_key}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it didn't exist.
    pub fn delete(&self, user_id: i64, storage_key: &str) -> Result<bool> {
        let file_path = self.blob_path(user_id, storage_key)?;

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a blob exists.
    pub fn exists(&self, user_id: i64, storage_key: &str) -> bool {
        self.blob_path(user_id, storage_key)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    /// Resolve a storage key to a path inside the user's directory.
    ///
    /// Rejects keys containing path separators or parent references so a
    /// key can never escape the user's directory.
    fn blob_path(&self, user_id: i64, storage_key: &str) -> Result<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains('/')
            || storage_key.contains('\\')
            || storage_key.contains("..")
        {
            return Err(ShelfError::Validation(format!(
                "invalid storage key: {storage_key}"
            )));
        }

        Ok(self.user_dir(user_id).join(storage_key))
    }
}

/// Sanitize an original filename for use inside a storage key.
///
/// Path separators, parent references, and control characters are replaced
/// with underscores. An empty or all-dot name becomes "unnamed".
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let cleaned = cleaned.replace("..", "_");
    let trimmed = cleaned.trim();

    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}
