//! Input validation for Shelf user registration.
//!
//! This module provides validation functions for usernames and email
//! addresses. Password rules live in the password module.

use thiserror::Error;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username can only contain alphanumeric characters and underscores")]
    UsernameInvalidChars,

    /// Username is reserved.
    #[error("this username is reserved")]
    UsernameReserved,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,
}

/// Reserved usernames that cannot be registered.
const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "root",
    "system",
    "anonymous",
    "administrator",
    "support",
    "shelf",
];

/// Check if a username is reserved.
pub fn is_reserved_username(username: &str) -> bool {
    let lower = username.to_lowercase();
    RESERVED_USERNAMES.iter().any(|&r| r == lower)
}

/// Validate a username.
///
/// Requirements:
/// - Length: 3-32 characters
/// - Characters: alphanumeric (a-z, A-Z, 0-9) and underscore (_)
/// - Not a reserved username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::UsernameInvalidChars);
    }
    if is_reserved_username(username) {
        return Err(ValidationError::UsernameReserved);
    }
    Ok(())
}

/// Validate an email address.
///
/// Only a shape check: one '@' with a non-empty local part and a domain
/// containing a dot. Deliverability is not verified.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("bob").is_ok());
        assert!(validate_username("john_doe").is_ok());
        assert!(validate_username("User123").is_ok());
        assert!(validate_username(&"a".repeat(32)).is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(ValidationError::UsernameTooShort)
        );
    }

    #[test]
    fn test_username_too_long() {
        assert_eq!(
            validate_username(&"a".repeat(33)),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_username_invalid_chars() {
        assert_eq!(
            validate_username("john doe"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("john-doe"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("john@doe"),
            Err(ValidationError::UsernameInvalidChars)
        );
    }

    #[test]
    fn test_username_reserved() {
        assert_eq!(
            validate_username("admin"),
            Err(ValidationError::UsernameReserved)
        );
        assert_eq!(
            validate_username("Admin"),
            Err(ValidationError::UsernameReserved)
        );
        assert_eq!(
            validate_username("root"),
            Err(ValidationError::UsernameReserved)
        );
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.domain.org").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("user@"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("user@nodot"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("user name@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&long), Err(ValidationError::EmailTooLong));
    }
}
