//! # Error Types
//!
//! Domain-specific error types for storeline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storeline-core errors (this file)                                     │
//! │  ├── CoreError        - Session and business rule failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storeline-db errors (separate crate)                                  │
//! │  └── DbError          - Gateway / statement failures                   │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the menu driver reports                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → console               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An operation that needs a logged-in user ran without one.
    #[error("No user is logged in")]
    NotAuthenticated,

    /// The session role does not grant the operation.
    ///
    /// ## When This Occurs
    /// - A customer picks a manager menu entry
    /// - A manager opens the admin tools
    ///
    /// This is a checked precondition, not a failure of the store.
    #[error("Only {}s can use this function", .required.as_str())]
    PermissionDenied { required: Role },

    /// Stored role text is not one of customer/manager/admin.
    #[error("Unrecognized role: '{0}'")]
    UnknownRole(String),

    /// An order asks for more units than the store holds and negative
    /// stock is disabled.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any statement is issued.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_message() {
        let err = CoreError::PermissionDenied {
            required: Role::Manager,
        };
        assert_eq!(err.to_string(), "Only managers can use this function");

        let err = CoreError::PermissionDenied {
            required: Role::Admin,
        };
        assert_eq!(err.to_string(), "Only admins can use this function");
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            product: "Apple".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Apple: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
