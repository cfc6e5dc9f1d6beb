//! Persistence gateway for TODO items.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewTodo, TodoId, TodoItem};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The row addressed by a finish or delete no longer exists.
    #[error("TODO not found: {0}")]
    NotFound(TodoId),

    /// Connection, query or decoding failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database(error.to_string())
    }
}

// =============================================================================
// Todo Repository
// =============================================================================

/// Storage operations needed by [`crate::application::TodoService`].
///
/// Implementations hold no business rules beyond making the finish
/// transition atomic: `insert` stores whatever it is given.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Finds an item by id. `Ok(None)` when absent.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, RepositoryError>;

    /// Returns every item in ascending id order.
    async fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError>;

    /// Counts items whose `finished` flag is `false`.
    async fn count_unfinished(&self) -> Result<u64, RepositoryError>;

    /// Stores a new item and returns it with its assigned id.
    async fn insert(&self, todo: NewTodo) -> Result<TodoItem, RepositoryError>;

    /// Sets `finished` on an item only if it is still unfinished.
    ///
    /// Returns `Ok(true)` when this call flipped the flag and `Ok(false)` when
    /// the row was already finished, so concurrent callers see exactly one
    /// `true`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] if the row disappeared.
    async fn mark_finished(&self, id: TodoId) -> Result<bool, RepositoryError>;

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] if the row disappeared.
    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn repository_error_display() {
        assert_eq!(
            RepositoryError::NotFound(TodoId::new(4)).to_string(),
            "TODO not found: 4"
        );
        assert_eq!(
            RepositoryError::Database("connection refused".to_string()).to_string(),
            "Database error: connection refused"
        );
    }

    #[rstest]
    fn sqlx_error_maps_to_database() {
        let error: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, RepositoryError::Database(_)));
    }
}
