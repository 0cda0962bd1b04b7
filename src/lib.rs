//! Shelf - personal file storage over HTTP
//!
//! A multi-user file storage web application: users sign up, log in, and
//! manage their own files and folders through server-rendered pages.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use auth::{
    hash_password, register, validate_email, validate_password, validate_username,
    verify_password, PasswordError, RegistrationError, RegistrationRequest, ValidationError,
};
pub use config::Config;
pub use db::{
    Database, NewResource, NewUser, Resource, ResourceKind, ResourceRepository, Session,
    SessionRepository, User, UserRepository,
};
pub use error::{Result, ShelfError};
pub use storage::BlobStorage;
pub use web::{AppState, WebServer};
