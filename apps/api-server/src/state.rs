//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::admin::AdminConfig;
use quill_core::ports::PostRepository;
use quill_core::services::{AdminPostService, PostQueryService};
use quill_infra::database::{DatabaseConfig, DatabaseConnections};
use quill_infra::store::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use quill_infra::database::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub queries: PostQueryService,
    pub admin: AdminPostService,
    pub db: Option<Arc<DatabaseConnections>>,
}

/// Reasons the server cannot start serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without `DATABASE_URL` posts live in memory. A configured database
    /// that cannot be reached is an error.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Result<Self, StartupError> {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => {
                let connections = DatabaseConnections::init(config).await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to connect to database");
                    StartupError::Database(e.to_string())
                })?;
                let connections = Arc::new(connections);
                let repo = Arc::new(PostgresPostRepository::new(connections.clone()));
                Self::from_repository(repo, Some(connections))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::in_memory(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// State over an in-memory repository.
    pub fn in_memory(repo: InMemoryPostRepository) -> Self {
        Self::from_repository(Arc::new(repo), None)
    }

    fn from_repository<R>(repo: Arc<R>, db: Option<Arc<DatabaseConnections>>) -> Self
    where
        R: PostRepository + 'static,
    {
        Self {
            queries: PostQueryService::new(repo.clone()),
            admin: AdminPostService::new(repo, AdminConfig::default()),
            db,
        }
    }
}
