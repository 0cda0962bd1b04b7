//! Test helpers for web integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use shelf::web::create_router;
use shelf::{AppState, BlobStorage, Database};

/// Session cookie name, matching the server.
pub const SESSION_COOKIE: &str = "shelf_session";

/// Create a test server backed by an in-memory database and a temporary
/// blob directory. The TempDir must stay alive for the test's duration.
pub async fn create_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let storage = BlobStorage::new(temp_dir.path()).expect("Failed to create blob storage");

    let app_state = Arc::new(AppState::new(db, storage, 24, 10 * 1024 * 1024));
    let router = create_router(app_state);

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir)
}

/// Sign up a user through the HTTP surface.
pub async fn signup(server: &TestServer, username: &str, password: &str, email: &str) {
    let response = server
        .post("/signup")
        .form(&json!({
            "username": username,
            "password": password,
            "email": email,
        }))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
}

/// Log in and return the session cookie value.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&json!({
            "username": username,
            "password": password,
        }))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.cookie(SESSION_COOKIE).value().to_string()
}

/// Sign up and log in, returning the session cookie value.
pub async fn signup_and_login(server: &TestServer, username: &str, password: &str) -> String {
    signup(server, username, password, &format!("{username}@example.com")).await;
    login(server, username, password).await
}

/// Build a session cookie for requests.
pub fn session_cookie(token: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(SESSION_COOKIE, token.to_string())
}
