//! JSON API handlers.
//!
//! - `GET /api/todos` - List all items with their summary
//! - `GET /api/todos/{id}` - Fetch one item
//! - `POST /api/todos` - Create an item
//! - `POST /api/todos/{id}/finish` - Finish an item
//! - `DELETE /api/todos/{id}` - Delete an item
//! - `GET /health` - Health check

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::dto::{CreateTodoRequest, TodoListResponse, TodoResponse};
use super::error::ApiErrorResponse;
use super::state::AppState;
use crate::domain::{TodoDraft, TodoId};

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health - Health check endpoint.
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/todos - Lists every item with the completion summary.
///
/// # Errors
///
/// - `500 Internal Server Error` - Storage failure
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<TodoListResponse>, ApiErrorResponse> {
    let items = state.service.find_all().await?;
    Ok(Json(TodoListResponse::from_items(&items)))
}

/// GET /api/todos/{id} - Fetches one item.
///
/// # Errors
///
/// - `400 Bad Request` - Id is not an integer
/// - `404 Not Found` - No item has this id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let id: TodoId = raw_id.parse()?;
    let item = state.service.find_by_id(id).await?;
    Ok(Json(item.into()))
}

/// POST /api/todos - Creates an unfinished item.
///
/// # Request Body
///
/// ```json
/// { "description": "Buy milk" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - Body is not JSON (`INVALID_BODY`), or the
///   description is blank or too long (`VALIDATION_ERROR`)
/// - `409 Conflict` - Unfinished cap reached (`E001`)
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiErrorResponse> {
    let Json(request) = payload
        .map_err(|rejection| ApiErrorResponse::bad_request("INVALID_BODY", rejection.body_text()))?;
    let draft = TodoDraft::new(&request.description)?;
    let item = state.service.create(draft).await?;
    tracing::info!(id = %item.id, "TODO created via API");
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// POST /api/todos/{id}/finish - Marks an item finished.
///
/// # Errors
///
/// - `400 Bad Request` - Id is not an integer
/// - `404 Not Found` - No item has this id
/// - `409 Conflict` - Already finished (`E002`)
pub async fn finish_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let id: TodoId = raw_id.parse()?;
    let item = state.service.finish(id).await?;
    Ok(Json(item.into()))
}

/// DELETE /api/todos/{id} - Removes an item.
///
/// # Errors
///
/// - `400 Bad Request` - Id is not an integer
/// - `404 Not Found` - No item has this id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id: TodoId = raw_id.parse()?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
