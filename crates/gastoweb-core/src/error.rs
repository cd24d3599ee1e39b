//! Error types for gastoweb-core
//!
//! The single error taxonomy of the system. Input validation fails
//! before any storage access; storage-level constraint failures are
//! mapped into the same taxonomy by the store crate; anything
//! unrecognized becomes `Internal` and is only logged server-side.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-range input
    ValidationError,
    /// Referenced id or month missing
    NotFound,
    /// Duplicate unique key
    Conflict,
    /// Referenced category does not exist
    ForeignKeyViolation,
    /// Enum or check violation surfaced by the store
    ConstraintViolation,
    /// Unexpected fault
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::Conflict => write!(f, "CONFLICT"),
            ErrorCode::ForeignKeyViolation => write!(f, "FOREIGN_KEY_VIOLATION"),
            ErrorCode::ConstraintViolation => write!(f, "CONSTRAINT_VIOLATION"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Domain error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{resource} not found.")]
    NotFound { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    ForeignKey { message: String },

    #[error("{message}")]
    Constraint { message: String },

    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> CoreError {
        CoreError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> CoreError {
        CoreError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> CoreError {
        CoreError::Internal {
            detail: detail.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::Conflict { .. } => ErrorCode::Conflict,
            CoreError::ForeignKey { .. } => ErrorCode::ForeignKeyViolation,
            CoreError::Constraint { .. } => ErrorCode::ConstraintViolation,
            CoreError::Internal { .. } => ErrorCode::InternalError,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
