//! HTML page handlers.
//!
//! - `GET /todos` - List page, showing and clearing any pending flash
//! - `POST /todos` - Create from the form
//! - `POST /todos/{id}/finish` - Finish an item
//! - `POST /todos/{id}/delete` - Delete an item
//!
//! Successful actions answer `303 See Other` back to the list with the
//! message in a flash cookie; refused actions re-render the list in place.

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::controller::{Outcome, TodoController, invalid_input};
use super::dto::CreateTodoRequest;
use super::flash::{FlashMessage, clear_flash_cookie, has_flash_cookie};
use super::state::AppState;
use super::views::ListView;
use crate::application::ServiceError;
use crate::domain::{TodoId, ValidationError};

// =============================================================================
// Page Error
// =============================================================================

/// Failure that leaves nothing sensible to render.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Page request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1>"),
        )
            .into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /todos - Renders the list with the flash left by the last action.
///
/// # Errors
///
/// [`PageError`] if the list cannot be loaded or rendered.
pub async fn list_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let cookie_headers: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    let flash = cookie_headers
        .iter()
        .find_map(|header| FlashMessage::from_cookie_header(header));
    let pending = cookie_headers.iter().any(|header| has_flash_cookie(header));

    let controller = TodoController::init(&state.service).await?;
    let body = state
        .views
        .render_list(&ListView::from_controller(&controller, flash.into_iter().collect()))?;

    if pending {
        Ok(([(header::SET_COOKIE, clear_flash_cookie())], Html(body)).into_response())
    } else {
        Ok(Html(body).into_response())
    }
}

/// POST /todos - Creates an item from the submitted form.
///
/// A body that is not a urlencoded form re-renders the list with `400`.
///
/// # Errors
///
/// [`PageError`] on storage or rendering failure.
pub async fn create_page(
    State(state): State<AppState>,
    form: Result<Form<CreateTodoRequest>, FormRejection>,
) -> Result<Response, PageError> {
    let mut controller = TodoController::init(&state.service).await?;
    let outcome = match form {
        Ok(Form(request)) => {
            controller.set_draft(request.description);
            controller.create().await?
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable creation form");
            invalid_input(&ValidationError::new("body", rejection.body_text()))
        }
    };
    respond(&state, &controller, outcome)
}

/// POST /todos/{id}/finish - Marks an item finished.
///
/// # Errors
///
/// [`PageError`] on storage or rendering failure.
pub async fn finish_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let mut controller = TodoController::init(&state.service).await?;
    let outcome = match raw_id.parse::<TodoId>() {
        Ok(id) => controller.finish(id).await?,
        Err(error) => invalid_input(&error),
    };
    respond(&state, &controller, outcome)
}

/// POST /todos/{id}/delete - Removes an item.
///
/// # Errors
///
/// [`PageError`] on storage or rendering failure.
pub async fn delete_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let mut controller = TodoController::init(&state.service).await?;
    let outcome = match raw_id.parse::<TodoId>() {
        Ok(id) => controller.delete(id).await?,
        Err(error) => invalid_input(&error),
    };
    respond(&state, &controller, outcome)
}

fn respond(
    state: &AppState,
    controller: &TodoController<'_>,
    outcome: Outcome,
) -> Result<Response, PageError> {
    match outcome {
        Outcome::Redirect { location, flash } => Ok((
            [(header::SET_COOKIE, flash.to_set_cookie())],
            Redirect::to(location),
        )
            .into_response()),
        Outcome::Render { status, message } => {
            let body = state
                .views
                .render_list(&ListView::from_controller(controller, vec![message]))?;
            Ok((status, Html(body)).into_response())
        }
    }
}
