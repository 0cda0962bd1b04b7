//! Dashboard handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::warn;

use crate::db::ResourceRepository;
use crate::web::middleware::CurrentUser;
use crate::web::pages;

use super::AppState;

/// Query parameters accepted by the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Error code carried over from a redirect.
    pub error: Option<String>,
}

/// GET /dashboard - the caller's root listing.
///
/// Folders sort before files, names ascending within each kind. A failed
/// listing query renders an empty dashboard instead of an error page.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let repo = ResourceRepository::new(state.db.pool());
    let entries = match repo.list_root(user.user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Dashboard listing failed for user {}: {}", user.user_id, e);
            Vec::new()
        }
    };

    Html(pages::dashboard_page(
        &user.username,
        &entries,
        query.error.as_deref(),
    ))
}
