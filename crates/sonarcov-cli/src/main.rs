//! Sonarcov CLI: export collated line coverage as SonarQube generic coverage XML
//!
//! ## Usage
//!
//! ```bash
//! sonarcov export run1.json run2.yaml          # Write SonarQube.xml
//! sonarcov export run.json -o out/sonar.xml    # Custom destination
//! sonarcov canonicalize c:\src\main.cpp        # Show on-disk casing
//! sonarcov check-arg reports\                  # Validate an argument
//! sonarcov info                                # Plugin version
//! ```

use clap::Parser;
use sonarcov_cli::{
    handlers::{execute_canonicalize, execute_check_arg, execute_export, execute_info},
    logging::init_logging,
    Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    init_logging(&config)?;

    match cli.command {
        Commands::Export(args) => execute_export(&config, &args).map(|_| ()),
        Commands::Canonicalize(args) => execute_canonicalize(&args),
        Commands::CheckArg(args) => execute_check_arg(&config, &args),
        Commands::Info => {
            execute_info();
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(ColorChoice::from(cli.color.clone()))
}
