//! Route configuration.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | / | redirect to `/todos` |
//! | GET | /todos | `list_page` |
//! | POST | /todos | `create_page` |
//! | POST | /todos/{id}/finish | `finish_page` |
//! | POST | /todos/{id}/delete | `delete_page` |
//! | GET | /api/todos | `list_todos` |
//! | POST | /api/todos | `create_todo` |
//! | GET | /api/todos/{id} | `get_todo` |
//! | DELETE | /api/todos/{id} | `delete_todo` |
//! | POST | /api/todos/{id}/finish | `finish_todo` |
//! | GET | /health | `health_check` |

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};

use super::controller::LIST_PATH;
use super::handlers::{
    create_todo, delete_todo, finish_todo, get_todo, health_check, list_todos,
};
use super::pages::{create_page, delete_page, finish_page, list_page};
use super::state::AppState;

/// Builds the router serving both the HTML pages and the JSON API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(|| async { Redirect::to(LIST_PATH) }))
        .route("/todos", get(list_page).post(create_page))
        .route("/todos/{id}/finish", post(finish_page))
        .route("/todos/{id}/delete", post(delete_page))
        // JSON API
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", get(get_todo).delete(delete_todo))
        .route("/api/todos/{id}/finish", post(finish_todo))
        // Health
        .route("/health", get(health_check))
        .with_state(state)
}
