//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use sonarcov::{PathStyle, ReportEncoding};
use std::path::PathBuf;

/// Sonarcov: export collated line coverage as SonarQube generic coverage XML
#[derive(Parser, Debug)]
#[command(name = "sonarcov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge coverage data files and write a SonarQube report
    Export(ExportArgs),

    /// Print the on-disk casing of paths
    Canonicalize(CanonicalizeArgs),

    /// Validate an export argument the way a host would
    CheckArg(CheckArgArgs),

    /// Show plugin version and argument description
    Info,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Coverage data files (.json, .yaml, .yml), merged in order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output report file (default: SonarQube.xml)
    #[arg(short, long)]
    pub output: Option<String>,

    /// YAML export configuration file
    #[arg(long, env = "SONARCOV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report text encoding
    #[arg(long)]
    pub encoding: Option<EncodingArg>,

    /// Separator convention of the paths in the coverage data
    #[arg(long)]
    pub path_style: Option<PathStyleArg>,

    /// Write paths exactly as reported, without resolving on-disk casing
    #[arg(long)]
    pub no_canonicalize: bool,
}

/// Arguments for the canonicalize command
#[derive(Parser, Debug)]
pub struct CanonicalizeArgs {
    /// Paths to canonicalize
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Separator convention of the given paths
    #[arg(long)]
    pub path_style: Option<PathStyleArg>,
}

/// Arguments for the check-arg command
#[derive(Parser, Debug)]
pub struct CheckArgArgs {
    /// Argument to validate; omit to validate the no-argument case
    pub argument: Option<String>,
}

/// Report encoding argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingArg {
    /// UTF-8
    Utf8,
    /// UTF-16 little endian with BOM
    Utf16le,
}

impl From<EncodingArg> for ReportEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => Self::Utf8,
            EncodingArg::Utf16le => Self::Utf16le,
        }
    }
}

/// Path style argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStyleArg {
    /// Backslash separators, drive letters and UNC shares
    Windows,
    /// Slash separators
    Posix,
}

impl From<PathStyleArg> for PathStyle {
    fn from(arg: PathStyleArg) -> Self {
        match arg {
            PathStyleArg::Windows => Self::Windows,
            PathStyleArg::Posix => Self::Posix,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
