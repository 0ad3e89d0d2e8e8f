//! Error types and exit codes for hatecheck
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid values)
//! - 3: Data/store error (missing store, unknown user, duplicate user)
//! - 4: Authentication failure (bad credentials or token)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
    /// Authentication failure (4)
    Auth = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for HatecheckError {
    fn from(err: rusqlite::Error) -> Self {
        HatecheckError::Other(err.to_string())
    }
}

/// Errors that can occur in hatecheck operations
#[derive(Error, Debug)]
pub enum HatecheckError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Authentication failures (exit code 4)
    #[error("invalid credentials")]
    InvalidCredentials,

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl HatecheckError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        HatecheckError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        HatecheckError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        HatecheckError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        HatecheckError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            HatecheckError::UsageError(_)
            | HatecheckError::InvalidValue { .. } => ExitCode::Usage,

            HatecheckError::StoreNotFound { .. }
            | HatecheckError::AlreadyExists { .. }
            | HatecheckError::NotFound { .. } => ExitCode::Data,

            HatecheckError::InvalidCredentials => ExitCode::Auth,

            HatecheckError::Io(_)
            | HatecheckError::Json(_)
            | HatecheckError::Toml(_)
            | HatecheckError::FailedOperation { .. }
            | HatecheckError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            HatecheckError::UsageError(_) => "usage_error",
            HatecheckError::InvalidValue { .. } => "invalid_value",
            HatecheckError::StoreNotFound { .. } => "store_not_found",
            HatecheckError::AlreadyExists { .. } => "already_exists",
            HatecheckError::NotFound { .. } => "not_found",
            HatecheckError::InvalidCredentials => "invalid_credentials",
            HatecheckError::Io(_) => "io_error",
            HatecheckError::Json(_) => "json_error",
            HatecheckError::Toml(_) => "toml_error",
            HatecheckError::FailedOperation { .. } => "failed_operation",
            HatecheckError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for hatecheck operations
pub type Result<T> = std::result::Result<T, HatecheckError>;
