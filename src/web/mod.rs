//! Web module for Shelf.
//!
//! This module provides the server-rendered HTTP interface: signup, login,
//! the dashboard, and the file operations that hang off it.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod server;

pub use error::PageError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
