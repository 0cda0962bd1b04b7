//! Database schema and migrations for Shelf.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations (SQLite flavor).
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
#[cfg(feature = "sqlite")]
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- User accounts for authentication
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    email       TEXT UNIQUE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: Resource catalog - file/folder metadata per user
    r#"
-- File and folder metadata. parent_id models a hierarchy; the dashboard
-- only ever lists rows where parent_id IS NULL.
CREATE TABLE resources (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind        TEXT NOT NULL,           -- 'file' or 'folder'
    name        TEXT NOT NULL,
    storage_key TEXT,                    -- NULL for folders
    parent_id   INTEGER REFERENCES resources(id),
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_resources_user_id ON resources(user_id);
CREATE INDEX idx_resources_parent_id ON resources(parent_id);
"#,
    // v3: Session store keyed by opaque cookie token
    r#"
CREATE TABLE sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    token       TEXT NOT NULL UNIQUE,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    username    TEXT NOT NULL,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_sessions_token ON sessions(token);
CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
];

/// Database migrations (PostgreSQL flavor).
#[cfg(feature = "postgres")]
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
CREATE TABLE users (
    id          BIGSERIAL PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,
    email       TEXT UNIQUE,
    created_at  TEXT NOT NULL DEFAULT TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')
);
"#,
    // v2: Resource catalog - file/folder metadata per user
    r#"
CREATE TABLE resources (
    id          BIGSERIAL PRIMARY KEY,
    user_id     BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind        TEXT NOT NULL,
    name        TEXT NOT NULL,
    storage_key TEXT,
    parent_id   BIGINT REFERENCES resources(id),
    created_at  TEXT NOT NULL DEFAULT TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')
);

CREATE INDEX idx_resources_user_id ON resources(user_id);
CREATE INDEX idx_resources_parent_id ON resources(parent_id);
"#,
    // v3: Session store keyed by opaque cookie token
    r#"
CREATE TABLE sessions (
    id          BIGSERIAL PRIMARY KEY,
    token       TEXT NOT NULL UNIQUE,
    user_id     BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    username    TEXT NOT NULL,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')
);

CREATE INDEX idx_sessions_token ON sessions(token);
CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
];
