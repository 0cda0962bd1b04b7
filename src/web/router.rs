//! Router configuration for the Shelf web UI.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    about, create_folder, dashboard, delete_item, download, index, login, login_form, logout,
    signup, signup_form, upload, AppState,
};

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Entry pages (no authentication)
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login));

    // Routes gated by the session cookie
    let gated_routes = Router::new()
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/upload", post(upload))
        .route("/create-folder", post(create_folder))
        .route("/delete/:id", post(delete_item))
        .route("/download/:storage_key", get(download));

    let body_limit = app_state.max_upload_size;

    Router::new()
        .merge(public_routes)
        .merge(gated_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
