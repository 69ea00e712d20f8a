//! Error types for normstore.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Most store operations are tolerant: acting on an absent id is a silent
//! no-op, not an error. The errors here cover the few cases that do fail.

use std::fmt;

use thiserror::Error;

use crate::id::Id;

/// The main error type for normstore operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a validation failure for the entity with the given id.
    ///
    /// `reason` is the message returned by the validation hook, if any.
    #[must_use]
    pub fn validation_failed(id: Id, reason: Option<String>) -> Self {
        Self::new(ErrorKind::ValidationFailed { id, reason })
    }

    /// Creates an error for a record field that uses the reserved id name.
    #[must_use]
    pub fn reserved_field(field: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReservedField {
            field: field.into(),
        })
    }

    /// Creates an error for decoded state that breaks a storage invariant.
    #[must_use]
    pub fn inconsistent_state(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InconsistentState {
            reason: reason.into(),
        })
    }

    /// Returns true if this is a validation failure.
    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::ValidationFailed { .. })
    }

    /// Returns the validation hook's reason, if this is a validation failure
    /// that carried one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::ValidationFailed { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The configured validation hook rejected an entity.
    #[error("{}", validation_message(.reason.as_deref()))]
    ValidationFailed {
        /// Id of the rejected entity.
        id: Id,
        /// Reason returned by the hook, if it gave one.
        reason: Option<String>,
    },

    /// A record carried a field named like the reserved id key.
    #[error("field name `{field}` is reserved for the entity id")]
    ReservedField {
        /// The offending field name.
        field: String,
    },

    /// Decoded state violates an invariant the mutators maintain.
    #[error("inconsistent state: {reason}")]
    InconsistentState {
        /// Which invariant was broken.
        reason: String,
    },
}

fn validation_message(reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("entity validation failed: {reason}"),
        None => "entity validation failed".to_string(),
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the store the operation ran against.
    pub store: Option<String>,
    /// Operation that failed (e.g. `create_many`).
    pub operation: Option<String>,
    /// Position of the failing element in a batch operation.
    pub index: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store name.
    #[must_use]
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the batch index.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
            if let Some(index) = self.index {
                write!(f, " at index {index}")?;
            }
        }
        if let Some(store) = &self.store {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "on store {store}")?;
        }
        Ok(())
    }
}
