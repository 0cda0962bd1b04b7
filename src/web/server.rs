//! Web server for Shelf.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::{Database, SessionRepository};
use crate::storage::BlobStorage;
use crate::{Result, ShelfError};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the Shelf UI.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server from the configuration and an opened
    /// database and blob storage.
    pub fn new(config: &Config, db: Database, storage: BlobStorage) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ShelfError::Config(format!("invalid server address: {e}")))?;

        let max_upload_size = (config.storage.max_upload_size_mb as usize) * 1024 * 1024;
        let app_state = AppState::new(db, storage, config.session.ttl_hours as i64, max_upload_size);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    ///
    /// Runs every hour and removes expired session rows.
    fn start_session_cleanup_task(db: Database) {
        tokio::spawn(async move {
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let repo = SessionRepository::new(db.pool());
                match repo.delete_expired().await {
                    Ok(count) => {
                        if count > 0 {
                            tracing::info!(deleted_count = count, "Cleaned up expired sessions");
                        } else {
                            tracing::debug!("No expired sessions to clean up");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to clean up sessions");
                    }
                }
            }
        });
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let db = self.app_state.db.clone();

        let router = create_router(self.app_state).merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start session cleanup after a successful bind
        Self::start_session_cleanup_task(db);

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let db = self.app_state.db.clone();

        let router = create_router(self.app_state).merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(db);

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
