//! Authentication module for Shelf.
//!
//! This module provides password hashing, input validation, and the
//! signup flow. Session persistence lives in the db module.

mod password;
mod registration;
pub mod validation;

pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use validation::{validate_email, validate_username, ValidationError};
