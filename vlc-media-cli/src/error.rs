use thiserror::Error;

use vlc_media_db::{ClearScopeParseError, OperationError, SchemaError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error (stdout, database directory)
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened or migrated
    #[error("Database error: {0}")]
    Schema(#[from] SchemaError),

    /// Store operation failed or rejected its arguments
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// Unknown clear-skip scope
    #[error("{0}")]
    ClearScope(#[from] ClearScopeParseError),

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Argument that clap accepted but could not be interpreted
    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl CliError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
