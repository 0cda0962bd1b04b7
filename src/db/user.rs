//! User repository for Shelf.
//!
//! This module provides CRUD operations for user accounts.

use super::DbPool;
use crate::{Result, ShelfError};

/// User entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// User ID.
    pub id: i64,
    /// Username (unique).
    pub username: String,
    /// Password hash.
    pub password: String,
    /// Email address (unique, optional).
    pub email: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// New user for creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Password hash (already hashed, never plaintext).
    pub password: String,
    /// Email address.
    pub email: Option<String>,
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A duplicate username
    /// or email surfaces as `ShelfError::Conflict`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, password, email) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.email)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by username (exact, case-sensitive match).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, email, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Delete a user by ID. Returns true if a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::db::Database;

    fn sample_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "hashed".to_string(),
            email: Some(format!("{}@example.com", username)),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&sample_user("alice")).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "alice");
    }

    #[tokio::test]
    async fn test_get_by_username_is_case_sensitive() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&sample_user("Bob")).await.unwrap();

        assert!(repo.get_by_username("Bob").await.unwrap().is_some());
        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&sample_user("carol")).await.unwrap();
        let err = repo.create(&sample_user("carol")).await.unwrap_err();
        assert!(matches!(err, ShelfError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&sample_user("dave")).await.unwrap();

        let mut other = sample_user("erin");
        other.email = Some("dave@example.com".to_string());
        let err = repo.create(&other).await.unwrap_err();
        assert!(matches!(err, ShelfError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&sample_user("frank")).await.unwrap();
        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
        assert!(repo.get_by_id(user.id).await.unwrap().is_none());
    }
}
