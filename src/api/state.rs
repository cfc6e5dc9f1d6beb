//! Shared application state handed to every handler.

use std::sync::Arc;

use super::views::ViewRenderer;
use crate::application::TodoService;
use crate::infrastructure::TodoRepository;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: Arc<TodoService>,
    pub views: Arc<ViewRenderer>,
}

impl AppState {
    /// Wires a service with the given cap over `repository` and compiles the
    /// page templates.
    ///
    /// # Errors
    ///
    /// Returns the `tera` error if the embedded templates fail to compile.
    pub fn new(
        repository: Arc<dyn TodoRepository>,
        max_unfinished: u64,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            service: Arc::new(TodoService::new(repository, max_unfinished)),
            views: Arc::new(ViewRenderer::new()?),
        })
    }
}
