//! Session-cookie authentication for the Shelf web UI.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::db::SessionRepository;
use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "shelf_session";

/// Rejection for unauthenticated requests: redirect to the login page.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

/// Extractor for the authenticated user.
///
/// Resolves the session cookie to a valid, non-expired session row and
/// exposes the identity recorded at login. Handlers taking this extractor
/// are gated: requests without a valid session are redirected to `/login`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID.
    pub user_id: i64,
    /// Username snapshot from the session row.
    pub username: String,
    /// The session token, needed for logout.
    pub token: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AuthRedirect;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let token = jar.get(SESSION_COOKIE).ok_or(AuthRedirect)?.value();

            let repo = SessionRepository::new(state.db.pool());
            let session = match repo.get_valid(token).await {
                Ok(Some(session)) => session,
                Ok(None) => return Err(AuthRedirect),
                Err(e) => {
                    tracing::error!("Session lookup failed: {}", e);
                    return Err(AuthRedirect);
                }
            };

            Ok(CurrentUser {
                user_id: session.user_id,
                username: session.username,
                token: session.token,
            })
        })
    }
}
