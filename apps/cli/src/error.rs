//! # CLI Error Types
//!
//! Every operation returns [`CliResult`]. The menu driver decides what each
//! variant means for the user.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation result              Menu driver                              │
//! │  ─────────────────             ───────────                              │
//! │  PermissionDenied ───────────► "Only managers can use this function"   │
//! │                                (stdout, menu continues)                 │
//! │  NotAuthenticated / Core /                                              │
//! │  Validation / Db ────────────► error stream + warn!, menu continues     │
//! │  InputClosed ────────────────► leave the menus, clean exit             │
//! │  Io ─────────────────────────► abort the run                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use storeline_core::{CoreError, Role, ValidationError};
use storeline_db::DbError;
use thiserror::Error;

/// Errors raised while running the console client.
#[derive(Debug, Error)]
pub enum CliError {
    /// The session role does not grant the chosen operation.
    #[error("Only {}s can use this function", .required.as_str())]
    PermissionDenied { required: Role },

    /// A user operation was chosen with nobody logged in.
    #[error("Please log in first")]
    NotAuthenticated,

    /// Domain rule violated (unknown role, insufficient stock, ...).
    #[error("{0}")]
    Core(CoreError),

    /// Input rejected before reaching the store.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Store operation failed.
    #[error("{0}")]
    Db(#[from] DbError),

    /// Standard input reached end of file.
    #[error("Input closed")]
    InputClosed,

    /// Console I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Splits the checked preconditions out of `CoreError` so the driver can
/// match on them directly.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PermissionDenied { required } => CliError::PermissionDenied { required },
            CoreError::NotAuthenticated => CliError::NotAuthenticated,
            CoreError::Validation(e) => CliError::Validation(e),
            other => CliError::Core(other),
        }
    }
}

/// Result type for console operations.
pub type CliResult<T> = Result<T, CliError>;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file is missing.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Manager, "Only managers can use this function")]
    #[case(Role::Admin, "Only admins can use this function")]
    #[case(Role::Customer, "Only customers can use this function")]
    fn test_permission_denied_message(#[case] required: Role, #[case] expected: &str) {
        let err: CliError = CoreError::PermissionDenied { required }.into();
        assert!(matches!(err, CliError::PermissionDenied { .. }));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_core_validation_unwraps() {
        let err: CliError = CoreError::Validation(ValidationError::MustBePositive {
            field: "units".to_string(),
        })
        .into();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_db_error_message_passes_through() {
        let err: CliError = DbError::not_found("Product", "1/Caviar").into();
        assert_eq!(err.to_string(), "Product not found: 1/Caviar");
    }
}
