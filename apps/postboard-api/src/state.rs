//! Application state - shared across all handlers.

use std::sync::Arc;

#[cfg(feature = "mongodb")]
use anyhow::Context;

use postboard_core::PostService;
use postboard_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "mongodb")]
use postboard_infra::{DatabaseConnection, MongoPostRepository};

/// Shared application state.
///
/// Owns the store handle for the lifetime of the server; clones share it.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "mongodb")]
    db: Option<DatabaseConnection>,
}

impl AppState {
    /// Build the application state with the configured store.
    ///
    /// Without a database config the posts live in memory. A configured
    /// store that cannot be reached is a startup error.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        #[cfg(feature = "mongodb")]
        let state = match db_config {
            Some(config) => {
                let conn = DatabaseConnection::init(config)
                    .await
                    .context("failed to connect to document store")?;
                let repo = Arc::new(MongoPostRepository::new(&conn));
                Self {
                    posts: PostService::new(repo),
                    db: Some(conn),
                }
            }
            None => {
                tracing::warn!("MONGODB_URI not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "mongodb"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without mongodb feature - ignoring MONGODB_URI");
            }
            tracing::info!("Running without mongodb feature - using in-memory repository");
            Self::in_memory()
        };

        tracing::info!(store = state.posts.backend(), "Application state initialized");
        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostRepository::new())),
            #[cfg(feature = "mongodb")]
            db: None,
        }
    }

    /// Release the store connection. Call after the HTTP server has stopped.
    pub async fn shutdown(self) {
        #[cfg(feature = "mongodb")]
        if let Some(conn) = self.db {
            conn.shutdown().await;
        }

        tracing::info!("Application state released");
    }
}
