//! Business-rule service for TODO items.
//!
//! Every rule of the TODO list lives here: the unfinished-item cap on
//! creation, finish-once semantics, and lookup-or-fail for ids. The
//! repository underneath only stores what it is given.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::errors::ServiceError;
use crate::domain::{BusinessRule, NewTodo, TodoDraft, TodoId, TodoItem};
use crate::infrastructure::TodoRepository;

/// Enforces the TODO list's rules on top of a [`TodoRepository`].
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    max_unfinished: u64,
    /// Held across count-then-insert so creations through this instance
    /// cannot overshoot the cap.
    creation_lock: Mutex<()>,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TodoService")
            .field("max_unfinished", &self.max_unfinished)
            .finish_non_exhaustive()
    }
}

impl TodoService {
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository>, max_unfinished: u64) -> Self {
        Self {
            repository,
            max_unfinished,
            creation_lock: Mutex::new(()),
        }
    }

    /// Configured unfinished-item cap.
    #[must_use]
    pub const fn max_unfinished(&self) -> u64 {
        self.max_unfinished
    }

    /// Looks an item up by id.
    ///
    /// # Errors
    ///
    /// [`ServiceError::ResourceNotFound`] if no item has this id.
    pub async fn find_by_id(&self, id: TodoId) -> Result<TodoItem, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::ResourceNotFound { id })
    }

    /// Returns every item in storage order.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Repository`] on storage failure.
    pub async fn find_all(&self) -> Result<Vec<TodoItem>, ServiceError> {
        Ok(self.repository.find_all().await?)
    }

    /// Accepts a draft as a new unfinished item stamped with the current time.
    ///
    /// Refused once the number of unfinished items has reached the cap, so at
    /// most `max_unfinished` items are ever unfinished through this service.
    ///
    /// # Errors
    ///
    /// [`BusinessRule::UnfinishedLimitReached`] carrying the current count and
    /// the limit; nothing is stored in that case.
    pub async fn create(&self, draft: TodoDraft) -> Result<TodoItem, ServiceError> {
        let _guard = self.creation_lock.lock().await;

        let unfinished = self.repository.count_unfinished().await?;
        if unfinished >= self.max_unfinished {
            let rule = BusinessRule::UnfinishedLimitReached {
                unfinished,
                limit: self.max_unfinished,
            };
            tracing::warn!(unfinished, limit = self.max_unfinished, "TODO creation refused");
            return Err(rule.into());
        }

        let item = self
            .repository
            .insert(NewTodo::accept(draft, Utc::now()))
            .await?;
        tracing::info!(id = %item.id, "TODO created");
        Ok(item)
    }

    /// Marks an item finished.
    ///
    /// # Errors
    ///
    /// [`ServiceError::ResourceNotFound`] for an unknown id and
    /// [`BusinessRule::AlreadyFinished`] if it was finished before.
    pub async fn finish(&self, id: TodoId) -> Result<TodoItem, ServiceError> {
        let item = self.find_by_id(id).await?;
        let finished = item.finish().inspect_err(|rule| {
            tracing::warn!(%id, code = rule.code(), "TODO finish refused");
        })?;

        // Another request may have finished it since the read above.
        if !self.repository.mark_finished(id).await? {
            let rule = BusinessRule::AlreadyFinished { id };
            tracing::warn!(%id, code = rule.code(), "TODO finish refused");
            return Err(rule.into());
        }
        tracing::info!(%id, "TODO finished");
        Ok(finished)
    }

    /// Removes an item.
    ///
    /// # Errors
    ///
    /// [`ServiceError::ResourceNotFound`] for an unknown id.
    pub async fn delete(&self, id: TodoId) -> Result<(), ServiceError> {
        let item = self.find_by_id(id).await?;
        self.repository.delete(item.id).await?;
        tracing::info!(%id, "TODO deleted");
        Ok(())
    }
}
