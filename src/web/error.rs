//! Page error handling for the Shelf web UI.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::web::pages;

/// Error type for page handlers.
///
/// Rendered as a minimal HTML error page with the matching status code.
/// Ownership failures use `not_found` so callers cannot probe for the
/// existence of other users' items.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    /// Create a new page error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a 404 error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a 500 error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(pages::error_page(&self.message))).into_response()
    }
}

impl From<crate::ShelfError> for PageError {
    fn from(e: crate::ShelfError) -> Self {
        tracing::error!("Internal error in page handler: {}", e);
        PageError::internal("Something went wrong")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PageError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(PageError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            PageError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display() {
        let err = PageError::not_found("Item not found or permission denied.");
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("permission denied"));
    }
}
