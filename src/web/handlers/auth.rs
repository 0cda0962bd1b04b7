//! Authentication page handlers: signup, login, and logout.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{register, verify_password, RegistrationError, RegistrationRequest};
use crate::db::{SessionRepository, UserRepository};
use crate::web::error::PageError;
use crate::web::middleware::{CurrentUser, SESSION_COOKIE};
use crate::web::pages;

use super::AppState;

/// Message shown when a signup collides with an existing username or email.
/// One message for both columns, so the form does not reveal which one is
/// taken.
const TAKEN_MESSAGE: &str = "That username or email is already taken.";

/// Message shown for any login failure.
const LOGIN_FAILED_MESSAGE: &str = "Incorrect username or password.";

/// Signup form fields.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    /// Desired username.
    pub username: String,
    /// Password (plaintext, hashed before storage).
    pub password: String,
    /// Optional email address.
    #[serde(default)]
    pub email: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// GET / - redirect to the login page.
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

/// GET /about - static about page.
pub async fn about() -> Html<String> {
    Html(pages::about_page())
}

/// GET /signup - render the signup form.
pub async fn signup_form() -> Html<String> {
    Html(pages::signup_page(None))
}

/// POST /signup - create a new account.
///
/// On success redirects to the login page. Uniqueness conflicts and
/// validation failures re-render the form with a message.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Response, PageError> {
    let email = form.email.trim();
    let mut request = RegistrationRequest::new(form.username.trim(), form.password);
    if !email.is_empty() {
        request = request.with_email(email);
    }

    match register(&state.db, &state.storage, request).await {
        Ok(user) => {
            info!("Signup complete for {}", user.username);
            Ok(Redirect::to("/login").into_response())
        }
        Err(RegistrationError::AlreadyTaken) => {
            Ok(Html(pages::signup_page(Some(TAKEN_MESSAGE))).into_response())
        }
        Err(RegistrationError::Validation(e)) => {
            Ok(Html(pages::signup_page(Some(&e.to_string()))).into_response())
        }
        Err(RegistrationError::Password(e)) => {
            Ok(Html(pages::signup_page(Some(&e.to_string()))).into_response())
        }
        Err(e) => {
            tracing::error!("Signup failed: {}", e);
            Err(PageError::internal("Could not create the account"))
        }
    }
}

/// GET /login - render the login form.
pub async fn login_form() -> Html<String> {
    Html(pages::login_page(None))
}

/// POST /login - authenticate and start a session.
///
/// The username lookup is exact and case-sensitive. Unknown usernames and
/// wrong passwords produce the same message.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let repo = UserRepository::new(state.db.pool());
    let user = match repo.get_by_username(&form.username).await? {
        Some(user) => user,
        None => {
            return Ok(Html(pages::login_page(Some(LOGIN_FAILED_MESSAGE))).into_response());
        }
    };

    if verify_password(&form.password, &user.password).is_err() {
        return Ok(Html(pages::login_page(Some(LOGIN_FAILED_MESSAGE))).into_response());
    }

    let sessions = SessionRepository::new(state.db.pool());
    let session = sessions
        .create(user.id, &user.username, state.session_ttl_hours)
        .await?;

    info!("User {} logged in", user.username);

    let cookie = Cookie::build((SESSION_COOKIE, session.token))
        .path("/")
        .http_only(true)
        .build();

    Ok((jar.add(cookie), Redirect::to("/dashboard")).into_response())
}

/// GET /logout - end the session.
///
/// If the session row cannot be deleted the user is sent back to the
/// dashboard with the cookie intact, so the session stays usable rather
/// than half-dead.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    jar: CookieJar,
) -> Response {
    let sessions = SessionRepository::new(state.db.pool());
    match sessions.delete(&user.token).await {
        Ok(_) => {
            info!("User {} logged out", user.username);
            let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
            (jar.remove(removal), Redirect::to("/login")).into_response()
        }
        Err(e) => {
            warn!("Failed to delete session for {}: {}", user.username, e);
            Redirect::to("/dashboard").into_response()
        }
    }
}
