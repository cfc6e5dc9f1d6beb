//! Application layer: the business-rule service and its error type.

pub mod errors;
pub mod todo_service;

pub use errors::ServiceError;
pub use todo_service::TodoService;
