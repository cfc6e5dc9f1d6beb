//! HTTP layer: HTML pages driven by [`TodoController`], a JSON API and the
//! router tying both to [`AppState`].

pub mod controller;
pub mod dto;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;
pub mod views;

pub use controller::{LIST_PATH, Outcome, TodoController};
pub use error::{ApiError, ApiErrorResponse};
pub use flash::{FLASH_COOKIE, FlashMessage, Severity};
pub use routes::create_router;
pub use state::AppState;
pub use views::{ListView, ViewRenderer};
