//! Export command handler

use crate::commands::ExportArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use sonarcov::{AggregatedCoverage, CoverageData, ExportConfig, ExportPlugin, SonarQubeExport};
use std::path::PathBuf;
use tracing::{debug, info};

/// Execute the export command
pub fn execute_export(config: &CliConfig, args: &ExportArgs) -> CliResult<PathBuf> {
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let exporter = SonarQubeExport::new(build_export_config(args)?);

    // Reject a bad destination before touching any input
    exporter.check_argument(args.output.as_deref())?;

    let raw = merge_inputs(&args.inputs)?;
    let raw_files = raw.len();

    // Summarize what the report will contain, after collation
    let coverage = exporter.canonicalize(raw);
    debug!(raw_files, canonical_files = coverage.len(), "canonicalized coverage");

    let output = exporter.write_report(&coverage, args.output.as_deref())?;
    reporter.summary(&coverage.summary(), &output);

    Ok(output)
}

/// Export configuration from the optional YAML file overlaid with flags
pub fn build_export_config(args: &ExportArgs) -> CliResult<ExportConfig> {
    let mut export_config = match args.config {
        Some(ref path) => {
            debug!(path = %path.display(), "loading export configuration");
            ExportConfig::from_yaml_file(path)?
        }
        None => ExportConfig::default(),
    };

    if let Some(encoding) = args.encoding {
        export_config = export_config.with_encoding(encoding.into());
    }
    if let Some(style) = args.path_style {
        export_config = export_config.with_path_style(style.into());
    }
    if args.no_canonicalize {
        export_config = export_config.with_canonicalize(false);
    }

    Ok(export_config)
}

/// Load every input file and fold them in order
pub fn merge_inputs(inputs: &[PathBuf]) -> CliResult<AggregatedCoverage> {
    let mut coverage = AggregatedCoverage::new();

    for input in inputs {
        let data = CoverageData::load(input)?;
        info!(
            input = %input.display(),
            modules = data.modules.len(),
            "merging coverage data"
        );
        coverage.add_coverage_data(&data);
    }

    Ok(coverage)
}
