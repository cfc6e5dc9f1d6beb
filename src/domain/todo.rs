//! TODO item entity and value objects.
//!
//! The entity itself carries no I/O: identifiers are assigned by storage,
//! timestamps are passed in from the service boundary, and the only state
//! transition (`finish`) is a pure function returning a new value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{BusinessRule, ValidationError};

/// Maximum number of characters accepted for a description.
pub const MAX_DESCRIPTION_LENGTH: usize = 30;

// =============================================================================
// TodoId
// =============================================================================

/// Storage-assigned surrogate key of a TODO item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw identifier, typically one read back from storage.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::new("id", format!("'{value}' is not a valid TODO ID")))
    }
}

// =============================================================================
// Description
// =============================================================================

/// A validated, trimmed TODO description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Smart constructor.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the `description` field when the
    /// trimmed input is empty or longer than [`MAX_DESCRIPTION_LENGTH`]
    /// characters.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                "description",
                "Description is required",
            ));
        }
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::new(
                "description",
                format!("Description must not exceed {MAX_DESCRIPTION_LENGTH} characters"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> Self {
        description.0
    }
}

// =============================================================================
// TodoDraft / NewTodo
// =============================================================================

/// The user's pending new-item input before the service accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    /// Description entered by the user.
    pub description: Description,
}

impl TodoDraft {
    /// Builds a draft from raw form or JSON input.
    ///
    /// # Errors
    ///
    /// Propagates the [`Description`] validation failure.
    pub fn new(description: &str) -> Result<Self, ValidationError> {
        Description::parse(description).map(|description| Self { description })
    }
}

/// A fully initialised item that has not been given an id yet.
///
/// Only the service builds these, so `finished` is always `false` and
/// `created_at` is always the acceptance time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub description: Description,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    /// Accepts a draft at the given instant.
    #[must_use]
    pub fn accept(draft: TodoDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            description: draft.description,
            finished: false,
            created_at,
        }
    }

    /// Attaches the storage-assigned id.
    #[must_use]
    pub fn with_id(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            description: self.description,
            finished: self.finished,
            created_at: self.created_at,
        }
    }
}

// =============================================================================
// TodoItem
// =============================================================================

/// A persisted TODO item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Surrogate key, immutable once assigned.
    pub id: TodoId,
    /// Immutable description.
    pub description: Description,
    /// Completion flag; only ever moves from `false` to `true`.
    pub finished: bool,
    /// Acceptance time.
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Marks the item finished.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessRule::AlreadyFinished`] if the item was finished
    /// before; the item is left untouched in that case.
    pub fn finish(self) -> Result<Self, BusinessRule> {
        if self.finished {
            return Err(BusinessRule::AlreadyFinished { id: self.id });
        }
        Ok(Self {
            finished: true,
            ..self
        })
    }
}
