//! Session repository for cookie-based authentication.
//!
//! Sessions are server-side rows keyed by an opaque random token carried in
//! the browser cookie. A session is valid until its expiry timestamp passes
//! or the row is deleted at logout.

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::DbPool;
use crate::{Result, ShelfError};

#[cfg(feature = "sqlite")]
const SQL_NOW: &str = "datetime('now')";
#[cfg(feature = "postgres")]
const SQL_NOW: &str = "TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')";

/// Session entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Session ID.
    pub id: i64,
    /// Opaque token stored in the cookie.
    pub token: String,
    /// User ID.
    pub user_id: i64,
    /// Username snapshot taken at login.
    pub username: String,
    /// Expiration timestamp.
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Repository for session operations.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a session for a user, valid for `ttl_hours` from now.
    ///
    /// Generates a fresh random token and returns the stored session.
    pub async fn create(&self, user_id: i64, username: &str, ttl_hours: i64) -> Result<Session> {
        let token = Uuid::new_v4().to_string();
        let expires_at = (Utc::now() + Duration::hours(ttl_hours))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO sessions (token, user_id, username, expires_at)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&token)
        .bind(user_id)
        .bind(username)
        .bind(&expires_at)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::NotFound("session".to_string()))
    }

    /// Get a session by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Session>> {
        let result = sqlx::query_as::<_, Session>(
            "SELECT id, token, user_id, username, expires_at, created_at
             FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a valid (not expired) session by token.
    ///
    /// Expired sessions are indistinguishable from absent ones.
    pub async fn get_valid(&self, token: &str) -> Result<Option<Session>> {
        let sql = format!(
            "SELECT id, token, user_id, username, expires_at, created_at
             FROM sessions
             WHERE token = $1 AND expires_at > {}",
            SQL_NOW
        );
        let result = sqlx::query_as::<_, Session>(&sql)
            .bind(token)
            .fetch_optional(self.pool)
            .await?;

        Ok(result)
    }

    /// Delete a session by token. Returns true if a row was removed.
    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all expired sessions. Returns the number of rows removed.
    pub async fn delete_expired(&self) -> Result<u64> {
        let sql = format!("DELETE FROM sessions WHERE expires_at <= {}", SQL_NOW);
        let result = sqlx::query(&sql).execute(self.pool).await?;

        Ok(result.rows_affected())
    }
}
