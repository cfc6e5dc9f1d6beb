//! Failures reported by [`crate::application::TodoService`].

use thiserror::Error;

use crate::domain::{BusinessRule, TodoId};
use crate::infrastructure::RepositoryError;

/// Error returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The id does not resolve to an item.
    #[error("[E404] No TODO exists for the given ID. TODO ID={id}")]
    ResourceNotFound { id: TodoId },

    /// A business rule refused the operation.
    #[error(transparent)]
    BusinessRuleViolation(#[from] BusinessRule),

    /// Storage failed; not a user error.
    #[error("Storage failure: {0}")]
    Repository(RepositoryError),
}

impl ServiceError {
    /// `true` for errors whose message is meant for end users.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. } | Self::BusinessRuleViolation(_)
        )
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => Self::ResourceNotFound { id },
            RepositoryError::Database(_) => Self::Repository(error),
        }
    }
}
