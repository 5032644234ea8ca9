//! Result and error types for Sonarcov.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Sonarcov operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting coverage
#[derive(Debug, Error)]
pub enum ExportError {
    /// The report destination could not be created or opened for writing
    #[error("Cannot create the output file {} for SonarQube exporting: {source}", path.display())]
    OutputUnavailable {
        /// Destination that failed to open
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The export argument was rejected before any I/O happened
    #[error("Invalid argument for SonarQube export: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Coverage input could not be interpreted
    #[error("Invalid coverage input: {message}")]
    InvalidInput {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ExportError {
    /// Create an output-unavailable error
    #[must_use]
    pub fn output_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether the host should report this as a usage error rather than a
    /// runtime failure
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
