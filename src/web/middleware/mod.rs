//! Middleware for the Shelf web UI.

pub mod auth;

pub use auth::{AuthRedirect, CurrentUser, SESSION_COOKIE};
