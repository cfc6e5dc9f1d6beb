//! Domain layer for the TODO manager.
//!
//! Everything here is pure: no I/O, no clock reads, no id generation.
//!
//! - [`todo`] - the TODO item entity and its value objects
//! - [`summary`] - completion tally of a list snapshot
//! - [`errors`] - business-rule and validation failures

pub mod errors;
pub mod summary;
pub mod todo;

pub use errors::{BusinessRule, ValidationError};
pub use summary::TodoSummary;
pub use todo::{Description, MAX_DESCRIPTION_LENGTH, NewTodo, TodoDraft, TodoId, TodoItem};
