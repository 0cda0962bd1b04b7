//! File operation handlers: upload, create-folder, delete, and download.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::db::{NewResource, ResourceRepository};
use crate::storage::BlobStorage;
use crate::web::error::PageError;
use crate::web::middleware::CurrentUser;

use super::AppState;

/// Message for missing or foreign items. Deliberately ambiguous so callers
/// cannot distinguish "does not exist" from "belongs to someone else".
const ITEM_NOT_FOUND_MESSAGE: &str = "Item not found or permission denied.";

/// Create-folder form fields.
#[derive(Debug, Deserialize)]
pub struct CreateFolderForm {
    /// Requested folder name.
    #[serde(default)]
    pub folder_name: String,
}

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters (including CR and LF, which would allow header
/// injection) are removed, quotes and backslashes are replaced, and
/// non-ASCII names get an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' => '_',
            '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// POST /upload - store one uploaded file.
///
/// Expects a single multipart field named `file`. The blob is written
/// first; if the metadata insert then fails, the blob is removed again
/// (best effort) so no orphan survives the failed upload.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<Response, PageError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart field: {}", e);
        PageError::bad_request("Invalid upload data")
    })? {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        warn!("Failed to read file content: {}", e);
                        PageError::bad_request("Invalid upload data")
                    })?
                    .to_vec(),
            );
        }
    }

    let (filename, content) = match (filename, content) {
        (Some(name), Some(content)) if !name.is_empty() => (name, content),
        _ => return Ok(Redirect::to("/dashboard?error=NoFileUploaded").into_response()),
    };

    let storage_key = BlobStorage::generate_storage_key(&filename);

    if let Err(e) = state.storage.save(user.user_id, &storage_key, &content) {
        error!("Failed to write blob for user {}: {}", user.user_id, e);
        return Ok(Redirect::to("/dashboard?error=DatabaseError").into_response());
    }

    let repo = ResourceRepository::new(state.db.pool());
    let new_file = NewResource::file(user.user_id, &filename, &storage_key);

    match repo.create(&new_file).await {
        Ok(resource) => {
            info!(
                "User {} uploaded {} ({} bytes) as resource {}",
                user.user_id,
                filename,
                content.len(),
                resource.id
            );
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => {
            error!("Failed to record upload for user {}: {}", user.user_id, e);
            // Remove the blob the failed upload just wrote
            if let Err(e) = state.storage.delete(user.user_id, &storage_key) {
                warn!("Failed to remove orphaned blob {}: {}", storage_key, e);
            }
            Ok(Redirect::to("/dashboard?error=DatabaseError").into_response())
        }
    }
}

/// POST /create-folder - add a folder to the caller's root listing.
///
/// Duplicate folder names are allowed.
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Form(form): Form<CreateFolderForm>,
) -> Redirect {
    let name = form.folder_name.trim();
    if name.is_empty() {
        return Redirect::to("/dashboard?error=FolderNameRequired");
    }

    let repo = ResourceRepository::new(state.db.pool());
    match repo.create(&NewResource::folder(user.user_id, name)).await {
        Ok(resource) => {
            info!("User {} created folder {}", user.user_id, resource.id);
            Redirect::to("/dashboard")
        }
        Err(e) => {
            error!("Failed to create folder for user {}: {}", user.user_id, e);
            Redirect::to("/dashboard?error=DatabaseError")
        }
    }
}

/// POST /delete/:id - remove a file or folder the caller owns.
///
/// For files the blob is unlinked best-effort: a failed unlink is logged
/// and the metadata row is removed anyway. Folders are removed as a single
/// row; anything the user nested under them is not touched.
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let repo = ResourceRepository::new(state.db.pool());

    let resource = match repo.get_owned(id, user.user_id).await {
        Ok(Some(resource)) => resource,
        Ok(None) => return Err(PageError::not_found(ITEM_NOT_FOUND_MESSAGE)),
        Err(e) => {
            error!("Delete lookup failed for user {}: {}", user.user_id, e);
            return Ok(Redirect::to("/dashboard?error=DeleteFailed").into_response());
        }
    };

    if let Some(ref storage_key) = resource.storage_key {
        match state.storage.delete(user.user_id, storage_key) {
            Ok(true) => {}
            Ok(false) => warn!("Blob {} already missing on delete", storage_key),
            Err(e) => warn!("Failed to unlink blob {}: {}", storage_key, e),
        }
    }

    match repo.delete(resource.id).await {
        Ok(_) => {
            info!("User {} deleted resource {}", user.user_id, resource.id);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => {
            error!("Failed to delete resource {}: {}", resource.id, e);
            Ok(Redirect::to("/dashboard?error=DeleteFailed").into_response())
        }
    }
}

/// GET /download/:key - stream a file the caller owns.
///
/// The path segment is a storage key and is resolved against the caller's
/// own file rows before any disk access, so one user's key never reaches
/// another user's directory.
pub async fn download(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(storage_key): Path<String>,
) -> Result<Response, PageError> {
    let repo = ResourceRepository::new(state.db.pool());
    let resource = repo
        .get_file_by_storage_key(user.user_id, &storage_key)
        .await?
        .ok_or_else(|| PageError::not_found(ITEM_NOT_FOUND_MESSAGE))?;

    let key = resource
        .storage_key
        .as_deref()
        .ok_or_else(|| PageError::not_found(ITEM_NOT_FOUND_MESSAGE))?;

    let content = match state.storage.load(user.user_id, key) {
        Ok(content) => content,
        Err(crate::ShelfError::NotFound(_)) => {
            warn!("Blob {} missing for resource {}", key, resource.id);
            return Err(PageError::not_found(ITEM_NOT_FOUND_MESSAGE));
        }
        Err(e) => {
            error!("Failed to load blob {}: {}", key, e);
            return Err(PageError::internal("Could not read the file"));
        }
    };

    let mime = mime_guess::from_path(&resource.name).first_or_octet_stream();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&resource.name),
        )
        .body(Body::from(content))
        .map_err(|e| {
            error!("Failed to build download response: {}", e);
            PageError::internal("Could not read the file")
        })?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition_header("report.pdf"),
            "attachment; filename=\"report.pdf\""
        );
    }

    #[test]
    fn test_content_disposition_strips_crlf() {
        let value = content_disposition_header("evil\r\nSet-Cookie: x=y.pdf");
        assert!(!value.contains('\r'));
        assert!(!value.contains('\n'));
    }

    #[test]
    fn test_content_disposition_quotes() {
        let value = content_disposition_header("my \"file\".txt");
        assert!(value.contains("filename=\"my _file_.txt\""));
        assert!(value.contains("filename*=UTF-8''"));
    }

    #[test]
    fn test_content_disposition_unicode() {
        let value = content_disposition_header("レポート.pdf");
        assert!(value.contains("filename*=UTF-8''"));
        assert!(value.contains("%E3%83%AC"));
    }
}
