//! Sonarcov CLI Library
//!
//! Command-line front end for the Sonarcov exporter: argument parsing,
//! logging setup and the command handlers behind the `sonarcov` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    CanonicalizeArgs, CheckArgArgs, Cli, ColorArg, Commands, EncodingArg, ExportArgs,
    PathStyleArg,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult, EXIT_FAILURE, EXIT_USAGE};
pub use output::{format_summary, Reporter};
