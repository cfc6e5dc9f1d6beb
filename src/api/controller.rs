//! Request-scoped presentation controller.
//!
//! A [`TodoController`] is built for one request, loads the list snapshot and
//! its summary, runs at most one user action against the [`TodoService`] and
//! then decides what the browser sees next:
//!
//! ```text
//! action ok          -> Outcome::Redirect  (303 to the list, info flash)
//! user-facing error  -> Outcome::Render    (list re-rendered, error message)
//! storage failure    -> Err(ServiceError)  (500)
//! ```

use axum::http::StatusCode;

use super::flash::FlashMessage;
use crate::application::{ServiceError, TodoService};
use crate::domain::{TodoDraft, TodoId, TodoItem, TodoSummary, ValidationError};

/// Path of the list view every successful action redirects to.
pub const LIST_PATH: &str = "/todos";

/// What the presentation boundary should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redirect to `location`, carrying `flash` across the redirect.
    Redirect {
        location: &'static str,
        flash: FlashMessage,
    },
    /// Re-render the list view in place with `message`.
    Render {
        status: StatusCode,
        message: FlashMessage,
    },
}

/// Per-request view state and action dispatch.
#[derive(Debug)]
pub struct TodoController<'a> {
    service: &'a TodoService,
    draft: String,
    todo_list: Vec<TodoItem>,
    summary: TodoSummary,
}

impl<'a> TodoController<'a> {
    /// Loads the current list and tallies it.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Repository`] if the list cannot be read.
    pub async fn init(service: &'a TodoService) -> Result<Self, ServiceError> {
        let todo_list = service.find_all().await?;
        let summary = TodoSummary::tally(&todo_list);
        Ok(Self {
            service,
            draft: String::new(),
            todo_list,
            summary,
        })
    }

    /// Raw text of the pending new-item form.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the pending new-item text.
    pub fn set_draft(&mut self, description: impl Into<String>) {
        self.draft = description.into();
    }

    /// List snapshot taken at [`TodoController::init`], plus anything this
    /// controller created since.
    #[must_use]
    pub fn todo_list(&self) -> &[TodoItem] {
        &self.todo_list
    }

    #[must_use]
    pub const fn summary(&self) -> TodoSummary {
        self.summary
    }

    #[must_use]
    pub const fn max_unfinished(&self) -> u64 {
        self.service.max_unfinished()
    }

    /// Submits the pending draft.
    ///
    /// # Errors
    ///
    /// Only storage failures; rule and validation failures become
    /// [`Outcome::Render`] and keep the draft for correction.
    pub async fn create(&mut self) -> Result<Outcome, ServiceError> {
        let draft = match TodoDraft::new(&self.draft) {
            Ok(draft) => draft,
            Err(error) => return Ok(invalid_input(&error)),
        };

        match self.service.create(draft).await {
            Ok(item) => {
                self.todo_list.push(item);
                self.summary = TodoSummary::tally(&self.todo_list);
                self.draft.clear();
                Ok(redirect(FlashMessage::info("New TODO has been registered.")))
            }
            Err(error) => rejected(error),
        }
    }

    /// Finishes the item with the given id.
    ///
    /// # Errors
    ///
    /// Only storage failures.
    pub async fn finish(&mut self, id: TodoId) -> Result<Outcome, ServiceError> {
        match self.service.finish(id).await {
            Ok(_) => Ok(redirect(FlashMessage::info(format!(
                "TODO ID: {id} has been finished."
            )))),
            Err(error) => rejected(error),
        }
    }

    /// Deletes the item with the given id.
    ///
    /// # Errors
    ///
    /// Only storage failures.
    pub async fn delete(&mut self, id: TodoId) -> Result<Outcome, ServiceError> {
        match self.service.delete(id).await {
            Ok(()) => Ok(redirect(FlashMessage::info(format!(
                "TODO ID: {id} has been deleted."
            )))),
            Err(error) => rejected(error),
        }
    }
}

const fn redirect(flash: FlashMessage) -> Outcome {
    Outcome::Redirect {
        location: LIST_PATH,
        flash,
    }
}

/// Outcome for input that never reached the service.
#[must_use]
pub fn invalid_input(error: &ValidationError) -> Outcome {
    Outcome::Render {
        status: StatusCode::BAD_REQUEST,
        message: FlashMessage::error(error.message.clone()),
    }
}

fn rejected(error: ServiceError) -> Result<Outcome, ServiceError> {
    if !error.is_user_facing() {
        return Err(error);
    }
    let status = if matches!(error, ServiceError::ResourceNotFound { .. }) {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::CONFLICT
    };
    Ok(Outcome::Render {
        status,
        message: FlashMessage::error(error.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTodo;
    use crate::infrastructure::{InMemoryTodoRepository, RepositoryError, TodoRepository};
    use async_trait::async_trait;
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    fn service() -> TodoService {
        TodoService::new(Arc::new(InMemoryTodoRepository::new()), 2)
    }

    async fn seed(service: &TodoService, description: &str) -> TodoItem {
        service
            .create(TodoDraft::new(description).unwrap())
            .await
            .unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn init_loads_list_and_summary(service: TodoService) {
        let first = seed(&service, "first").await;
        seed(&service, "second").await;
        service.finish(first.id).await.unwrap();

        let controller = TodoController::init(&service).await.unwrap();

        assert_eq!(controller.todo_list().len(), 2);
        assert_eq!(controller.summary().finished, 1);
        assert_eq!(controller.summary().unfinished, 1);
        assert!(controller.draft().is_empty());
        assert_eq!(controller.max_unfinished(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn create_redirects_with_info(service: TodoService) {
        let mut controller = TodoController::init(&service).await.unwrap();
        controller.set_draft("buy bread");

        let outcome = controller.create().await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Redirect {
                location: LIST_PATH,
                flash: FlashMessage::info("New TODO has been registered."),
            }
        );
        assert_eq!(controller.todo_list().len(), 1);
        assert_eq!(controller.summary().unfinished, 1);
        assert!(controller.draft().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn create_at_cap_renders_error_and_keeps_draft(service: TodoService) {
        seed(&service, "one").await;
        seed(&service, "two").await;
        let mut controller = TodoController::init(&service).await.unwrap();
        controller.set_draft("three");

        let outcome = controller.create().await.unwrap();

        match outcome {
            Outcome::Render { status, message } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert!(message.text.starts_with("[E001]"));
            }
            Outcome::Redirect { .. } => panic!("expected a re-render"),
        }
        assert_eq!(controller.draft(), "three");
        assert_eq!(service.find_all().await.unwrap().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_draft_renders_bad_request(service: TodoService) {
        let mut controller = TodoController::init(&service).await.unwrap();
        controller.set_draft("   ");

        let outcome = controller.create().await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Render {
                status: StatusCode::BAD_REQUEST,
                message: FlashMessage::error("Description is required"),
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn finish_redirects_then_second_finish_renders_conflict(service: TodoService) {
        let item = seed(&service, "once").await;

        let mut controller = TodoController::init(&service).await.unwrap();
        let outcome = controller.finish(item.id).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Redirect {
                location: LIST_PATH,
                flash: FlashMessage::info(format!("TODO ID: {} has been finished.", item.id)),
            }
        );

        let mut controller = TodoController::init(&service).await.unwrap();
        let outcome = controller.finish(item.id).await.unwrap();
        assert!(matches!(
            outcome,
            Outcome::Render { status, ref message }
                if status == StatusCode::CONFLICT && message.text.starts_with("[E002]")
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_unknown_renders_not_found(service: TodoService) {
        let mut controller = TodoController::init(&service).await.unwrap();

        let outcome = controller.delete(TodoId::new(77)).await.unwrap();

        assert!(matches!(
            outcome,
            Outcome::Render { status, ref message }
                if status == StatusCode::NOT_FOUND && message.text.starts_with("[E404]")
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_redirects_with_info(service: TodoService) {
        let item = seed(&service, "bye").await;
        let mut controller = TodoController::init(&service).await.unwrap();

        let outcome = controller.delete(item.id).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Redirect {
                location: LIST_PATH,
                flash: FlashMessage::info(format!("TODO ID: {} has been deleted.", item.id)),
            }
        );
        assert!(service.find_all().await.unwrap().is_empty());
    }

    /// Reads work, deletes hit a dead connection.
    struct BrokenDeletes(InMemoryTodoRepository);

    #[async_trait]
    impl TodoRepository for BrokenDeletes {
        async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, RepositoryError> {
            self.0.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
            self.0.find_all().await
        }

        async fn count_unfinished(&self) -> Result<u64, RepositoryError> {
            self.0.count_unfinished().await
        }

        async fn insert(&self, todo: NewTodo) -> Result<TodoItem, RepositoryError> {
            self.0.insert(todo).await
        }

        async fn mark_finished(&self, id: TodoId) -> Result<bool, RepositoryError> {
            self.0.mark_finished(id).await
        }

        async fn delete(&self, _id: TodoId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database("connection reset".to_string()))
        }
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failure_is_returned_not_rendered() {
        let service = TodoService::new(Arc::new(BrokenDeletes(InMemoryTodoRepository::new())), 2);
        let item = seed(&service, "stuck").await;
        let mut controller = TodoController::init(&service).await.unwrap();

        let result = controller.delete(item.id).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
