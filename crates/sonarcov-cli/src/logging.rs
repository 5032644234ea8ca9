//! Log subscriber setup

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable
#[must_use]
pub fn default_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.verbosity.log_directive())
}

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn init_logging(config: &CliConfig) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
