//! User registration for Shelf.
//!
//! This module provides the signup flow shared by the web handler and tests.

use thiserror::Error;
use tracing::info;

use crate::auth::password::{hash_password, PasswordError};
use crate::auth::validation::{validate_email, validate_username, ValidationError};
use crate::db::{Database, NewUser, User, UserRepository};
use crate::storage::BlobStorage;
use crate::ShelfError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Username or email is already in use.
    ///
    /// The database does not reveal which column collided, and the signup
    /// page deliberately reports one combined message.
    #[error("username or email already taken")]
    AlreadyTaken,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// Blob directory creation failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (3-32 alphanumeric + underscore).
    pub username: String,
    /// Password (8-128 characters).
    pub password: String,
    /// Optional email address.
    pub email: Option<String>,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Register a new user.
///
/// This function:
/// 1. Validates the username, email, and password
/// 2. Hashes the password
/// 3. Creates the user row (duplicates surface as `AlreadyTaken`)
/// 4. Creates the user's blob directory
pub async fn register(
    db: &Database,
    storage: &BlobStorage,
    request: RegistrationRequest,
) -> std::result::Result<User, RegistrationError> {
    validate_username(&request.username)?;
    if let Some(ref email) = request.email {
        validate_email(email)?;
    }

    let password_hash = hash_password(&request.password)?;

    let repo = UserRepository::new(db.pool());
    let user = repo
        .create(&NewUser {
            username: request.username.clone(),
            password: password_hash,
            email: request.email.clone(),
        })
        .await
        .map_err(|e| match e {
            ShelfError::Conflict(_) => RegistrationError::AlreadyTaken,
            other => RegistrationError::Database(other.to_string()),
        })?;

    storage
        .create_user_dir(user.id)
        .map_err(|e| RegistrationError::Storage(e.to_string()))?;

    info!("Registered new user: {} (id {})", user.username, user.id);
    Ok(user)
}
