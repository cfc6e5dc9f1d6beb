//! Repository factory for runtime backend selection.
//!
//! Turns the [`StorageMode`] from [`AppConfig`] into a shared
//! [`TodoRepository`] trait object.

use std::sync::Arc;

use super::{
    AppConfig, ConfigError, InMemoryTodoRepository, PostgresTodoRepository, RepositoryError,
    StorageMode, TodoRepository,
};

/// Errors raised while building the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialise storage: {0}")]
    Storage(#[from] RepositoryError),
}

/// Builds the repository selected by configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: AppConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Creates the repository, connecting and ensuring the schema for Postgres.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Config`] if postgres mode has no URL and
    /// [`FactoryError::Storage`] if connecting or applying the schema fails.
    pub async fn create(&self) -> Result<Arc<dyn TodoRepository>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => {
                tracing::info!("Using in-memory storage");
                Ok(Arc::new(InMemoryTodoRepository::new()))
            }
            StorageMode::Postgres => {
                let database_url = self
                    .config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
                let repository = PostgresTodoRepository::connect(
                    database_url,
                    self.config.database_max_connections,
                )
                .await?;
                repository.ensure_schema().await?;
                tracing::info!(
                    max_connections = self.config.database_max_connections,
                    "Connected to PostgreSQL"
                );
                Ok(Arc::new(repository))
            }
        }
    }
}
