//! Data Transfer Objects for the JSON API and the HTML forms.

use serde::{Deserialize, Serialize};

use crate::domain::{TodoItem, TodoSummary};

/// Body of `POST /api/todos` and of the HTML creation form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub description: String,
}

/// Response DTO for a TODO item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub description: String,
    pub finished: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<&TodoItem> for TodoResponse {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id.value(),
            description: item.description.to_string(),
            finished: item.finished,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

impl From<TodoItem> for TodoResponse {
    fn from(item: TodoItem) -> Self {
        Self::from(&item)
    }
}

/// Completion summary DTO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub finished: usize,
    pub unfinished: usize,
    pub total: usize,
    pub completion_percent: usize,
}

impl From<TodoSummary> for SummaryResponse {
    fn from(summary: TodoSummary) -> Self {
        Self {
            finished: summary.finished,
            unfinished: summary.unfinished,
            total: summary.total(),
            completion_percent: summary.completion_percent(),
        }
    }
}

/// Response of `GET /api/todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub items: Vec<TodoResponse>,
    pub summary: SummaryResponse,
}

impl TodoListResponse {
    #[must_use]
    pub fn from_items(items: &[TodoItem]) -> Self {
        Self {
            items: items.iter().map(TodoResponse::from).collect(),
            summary: TodoSummary::tally(items).into(),
        }
    }
}
