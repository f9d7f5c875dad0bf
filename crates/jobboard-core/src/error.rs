//! Domain error types.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Classification of a failure, independent of the operation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input to a value-object factory or field mutator.
    Validation,
    /// A transition or edit is not permitted in the current status.
    Conflict,
    /// A referenced aggregate does not exist.
    NotFound,
    /// A structural precondition is unmet.
    Problem,
    /// An unexpected failure that aborts the current command.
    Fatal,
}

impl ErrorKind {
    /// Stable lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Problem => "problem",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by a value-object factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The input field that failed validation.
    pub field: &'static str,
    /// Machine-readable error code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A value failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A state transition or field edit is not permitted.
    #[error("conflict: {message}")]
    Conflict {
        /// Machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// A structural precondition is unmet.
    #[error("problem: {message}")]
    Problem {
        /// Machine-readable error code.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// An aggregate was not found.
    #[error("{aggregate_type} not found: {id}")]
    AggregateNotFound {
        /// The kind of aggregate that was looked up.
        aggregate_type: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// Optimistic concurrency conflict.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Builds a `Conflict` error.
    #[must_use]
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Builds a `Problem` error.
    #[must_use]
    pub fn problem(code: &'static str, message: impl Into<String>) -> Self {
        Self::Problem {
            code,
            message: message.into(),
        }
    }

    /// Builds an `AggregateNotFound` error.
    #[must_use]
    pub const fn not_found(aggregate_type: &'static str, id: Uuid) -> Self {
        Self::AggregateNotFound { aggregate_type, id }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict { .. } | Self::ConcurrencyConflict { .. } => ErrorKind::Conflict,
            Self::Problem { .. } => ErrorKind::Problem,
            Self::AggregateNotFound { .. } => ErrorKind::NotFound,
            Self::Infrastructure(_) => ErrorKind::Fatal,
        }
    }

    /// Returns the stable machine-readable code of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code,
            Self::Conflict { code, .. } | Self::Problem { code, .. } => *code,
            Self::AggregateNotFound { .. } => "aggregate_not_found",
            Self::ConcurrencyConflict { .. } => "concurrency_conflict",
            Self::Infrastructure(_) => "infrastructure_error",
        }
    }

    /// Returns `true` when retrying the command from a fresh read may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_factory_code() {
        let err: DomainError =
            ValidationError::new("latitude", "location.latitude_out_of_range", "too far north")
                .into();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), "location.latitude_out_of_range");
        assert_eq!(err.to_string(), "validation error: latitude: too far north");
    }

    #[test]
    fn test_concurrency_conflict_is_retryable_conflict() {
        let err = DomainError::ConcurrencyConflict {
            aggregate_id: Uuid::new_v4(),
            expected: 1,
            actual: 2,
        };

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), "concurrency_conflict");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_business_errors_are_not_retryable() {
        let errors = [
            DomainError::conflict("vacancy.invalid_transition", "nope"),
            DomainError::problem("vacancy.category_required", "nope"),
            DomainError::not_found("vacancy", Uuid::new_v4()),
        ];

        for err in &errors {
            assert!(!err.is_retryable(), "{err} should not be retryable");
        }
    }

    #[test]
    fn test_kinds_and_codes_are_stable() {
        assert_eq!(
            DomainError::not_found("resume", Uuid::nil()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::problem("vacancy.category_required", "x").kind(),
            ErrorKind::Problem
        );
        assert_eq!(
            DomainError::Infrastructure("db down".into()).kind(),
            ErrorKind::Fatal
        );
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
