//! Domain-level failures.
//!
//! [`BusinessRule`] covers the user-facing rule violations of the TODO list;
//! [`ValidationError`] covers malformed input that never reaches a rule.

use serde::Serialize;
use thiserror::Error;

use super::todo::TodoId;

/// A rejected business rule.
///
/// The `Display` text is shown to users as-is, so each variant carries the
/// values needed to explain the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusinessRule {
    /// Creating another item would exceed the unfinished-item cap.
    #[error(
        "[E001] Unfinished TODO count: {unfinished}. No more TODOs can be registered because the maximum of {limit} unfinished TODOs has been reached."
    )]
    UnfinishedLimitReached {
        /// Unfinished items counted before the attempt.
        unfinished: u64,
        /// Configured cap.
        limit: u64,
    },

    /// The item was finished before.
    #[error("[E002] The TODO is already finished. TODO ID = {id}")]
    AlreadyFinished {
        /// Item that was finished twice.
        id: TodoId,
    },
}

impl BusinessRule {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnfinishedLimitReached { .. } => "E001",
            Self::AlreadyFinished { .. } => "E002",
        }
    }
}

/// Invalid user input for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
