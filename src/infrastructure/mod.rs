//! Infrastructure layer for the TODO manager.
//!
//! - `config` - application settings loaded from environment variables
//! - `repository` - the persistence gateway trait and its error type
//! - `in_memory` - process-local gateway for development and tests
//! - `postgres` - `sqlx`-backed gateway
//! - `factory` - picks a gateway from configuration

mod config;
mod factory;
mod in_memory;
mod postgres;
mod repository;

pub use config::{AppConfig, ConfigError, DEFAULT_MAX_UNFINISHED, StorageMode};
pub use factory::{FactoryError, RepositoryFactory};
pub use in_memory::InMemoryTodoRepository;
pub use postgres::{PostgresTodoRepository, SCHEMA};
pub use repository::{RepositoryError, TodoRepository};
