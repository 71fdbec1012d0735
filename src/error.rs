//! Crate-wide error type shared by all domain operations.
//!
//! Every fallible operation returns [`AppError`]. The variants map directly
//! onto the outcomes a caller has to distinguish: missing referenced
//! entities, uniqueness conflicts, illegal state transitions or structural
//! moves, payload validation failures, denied capabilities, and storage
//! faults. The presentation layer consuming this crate owns the mapping to
//! user-facing responses; nothing here is transport-specific.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Machine-readable error descriptor attached to [`AppError`] variants.
///
/// `code` is stable and safe to branch on; `details` carries structured
/// context (offending slug, conflicting id, and so on).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Domain error returned by every operation in this crate.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or malformed.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A referenced entity does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A uniqueness violation or a blocked deletion.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// An illegal lifecycle transition or structural move.
    #[error("{message}")]
    InvalidOperation { message: String, details: Value },

    /// The caller's role does not permit the operation.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    /// The persistence collaborator failed.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_operation(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidOperation {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::InvalidOperation { .. } => "invalid_operation",
            AppError::Forbidden { .. } => "forbidden",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Flattens the error into its serializable descriptor.
    pub fn info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::InvalidOperation { message, details }
            | AppError::Forbidden { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

/// Converts `validator` report output into [`AppError::Validation`] with
/// per-field details.
pub fn map_validation_errors(errors: validator::ValidationErrors) -> AppError {
    let details = serde_json::to_value(errors.field_errors()).unwrap_or(Value::Null);
    AppError::validation("Payload validation failed", details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            AppError::validation("x", json!({})).code(),
            "validation_error"
        );
        assert_eq!(AppError::not_found("x", json!({})).code(), "not_found");
        assert_eq!(AppError::conflict("x", json!({})).code(), "conflict");
        assert_eq!(
            AppError::invalid_operation("x", json!({})).code(),
            "invalid_operation"
        );
        assert_eq!(AppError::forbidden("x", json!({})).code(), "forbidden");
        assert_eq!(AppError::internal("x", json!({})).code(), "internal_error");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::conflict("slug already in use", json!({ "slug": "backend" }));
        assert_eq!(err.to_string(), "slug already in use");
    }

    #[test]
    fn test_info_preserves_details() {
        let err = AppError::not_found("category not found", json!({ "id": 7 }));
        let info = err.info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.details, json!({ "id": 7 }));
    }
}
