//! In-memory repository implementation.
//!
//! Suitable for development and tests. Ids are handed out from a monotonic
//! counter starting at 1 and are never reused, matching a `BIGSERIAL` column.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{NewTodo, TodoId, TodoItem};
use crate::infrastructure::{RepositoryError, TodoRepository};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TodoId, TodoItem>,
    last_id: i64,
}

/// In-memory implementation of [`TodoRepository`].
///
/// Cloning shares the underlying table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn count_unfinished(&self) -> Result<u64, RepositoryError> {
        let table = self.table.read().await;
        let count = table.rows.values().filter(|item| !item.finished).count();
        Ok(count as u64)
    }

    async fn insert(&self, todo: NewTodo) -> Result<TodoItem, RepositoryError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let item = todo.with_id(TodoId::new(table.last_id));
        table.rows.insert(item.id, item.clone());
        Ok(item)
    }

    async fn mark_finished(&self, id: TodoId) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().await;
        let stored = table
            .rows
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        if stored.finished {
            return Ok(false);
        }
        stored.finished = true;
        Ok(true)
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}
