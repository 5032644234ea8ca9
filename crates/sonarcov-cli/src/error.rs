//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Process exit code for runtime failures
pub const EXIT_FAILURE: u8 = 1;

/// Process exit code for rejected options
pub const EXIT_USAGE: u8 = 2;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Sonarcov library error
    #[error(transparent)]
    Export(#[from] sonarcov::ExportError),

    /// Logging setup error
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a logging error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Exit code reported to the shell
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Export(e) if e.is_usage_error() => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
