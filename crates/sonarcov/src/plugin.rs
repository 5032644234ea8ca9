//! Export plugin contract
//!
//! A coverage-collection host drives an exporter through four calls:
//! validate the optional argument, export, and two static queries used for
//! its help screen and version negotiation. [`create_plugin`] is the factory
//! a host harness calls to obtain an instance.

use crate::canonical::{FsSegmentResolver, PathCanonicalizer, SegmentResolver};
use crate::config::ExportConfig;
use crate::coverage::{AggregatedCoverage, CoverageData};
use crate::report::SonarQubeFormatter;
use crate::result::{ExportError, ExportResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Export plugin interface version implemented by this crate
pub const CURRENT_EXPORT_PLUGIN_VERSION: u32 = 1;

/// Capability set a host expects from an exporter
pub trait ExportPlugin {
    /// Write `data` to the destination named by `argument` (or the default)
    /// and return where the report went
    fn export(&self, data: &CoverageData, argument: Option<&str>) -> ExportResult<PathBuf>;

    /// Reject unusable arguments before any export is attempted
    fn check_argument(&self, argument: Option<&str>) -> ExportResult<()>;

    /// One-line description of the optional argument
    fn argument_help_description(&self) -> &str;

    /// Plugin interface version
    fn export_plugin_version(&self) -> u32;
}

/// Exporter producing SonarQube generic coverage XML
#[derive(Debug, Clone)]
pub struct SonarQubeExport<R = FsSegmentResolver> {
    config: ExportConfig,
    resolver: R,
}

impl SonarQubeExport<FsSegmentResolver> {
    /// Exporter resolving path casing against the live filesystem
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self::with_resolver(config, FsSegmentResolver)
    }
}

impl Default for SonarQubeExport<FsSegmentResolver> {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl<R: SegmentResolver> SonarQubeExport<R> {
    /// Exporter with a custom segment resolver
    #[must_use]
    pub fn with_resolver(config: ExportConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Destination for an optional argument
    #[must_use]
    pub fn output_path(&self, argument: Option<&str>) -> PathBuf {
        argument.map_or_else(|| self.config.output.clone(), PathBuf::from)
    }

    /// Re-key aggregated coverage by canonical path.
    ///
    /// Raw paths that resolve to the same canonical path are collated with
    /// the executed-if-ever-executed rule.
    #[must_use]
    pub fn canonicalize(&self, coverage: AggregatedCoverage) -> AggregatedCoverage {
        if !self.config.canonicalize {
            return coverage;
        }

        let canonicalizer = PathCanonicalizer::with_resolver(&self.resolver, self.config.path_style);
        coverage.rekey(|raw| canonicalizer.canonicalize(raw))
    }

    /// Canonicalize and write already aggregated coverage
    pub fn export_aggregated(
        &self,
        coverage: AggregatedCoverage,
        argument: Option<&str>,
    ) -> ExportResult<PathBuf> {
        let raw_files = coverage.len();
        let coverage = self.canonicalize(coverage);
        debug!(raw_files, canonical_files = coverage.len(), "canonicalized coverage");

        self.write_report(&coverage, argument)
    }

    /// Write coverage exactly as keyed, without canonicalizing
    pub fn write_report(
        &self,
        coverage: &AggregatedCoverage,
        argument: Option<&str>,
    ) -> ExportResult<PathBuf> {
        let output = self.output_path(argument);

        SonarQubeFormatter::new(coverage)
            .with_encoding(self.config.encoding)
            .save(&output)?;

        Ok(output)
    }
}

impl<R: SegmentResolver> ExportPlugin for SonarQubeExport<R> {
    fn export(&self, data: &CoverageData, argument: Option<&str>) -> ExportResult<PathBuf> {
        let mut coverage = AggregatedCoverage::new();
        coverage.add_coverage_data(data);
        self.export_aggregated(coverage, argument)
    }

    fn check_argument(&self, argument: Option<&str>) -> ExportResult<()> {
        match argument {
            Some(arg) if !has_file_name(arg) => Err(ExportError::invalid_argument(format!(
                "'{arg}' does not name an output file"
            ))),
            _ => Ok(()),
        }
    }

    fn argument_help_description(&self) -> &str {
        "output file (optional)"
    }

    fn export_plugin_version(&self) -> u32 {
        CURRENT_EXPORT_PLUGIN_VERSION
    }
}

/// Create the exporter a host loads
#[must_use]
pub fn create_plugin() -> Box<dyn ExportPlugin> {
    Box::new(SonarQubeExport::new(ExportConfig::default()))
}

/// Whether `argument` ends in a file-name component.
///
/// Both `/` and `\` count as separators so Windows-style arguments are
/// judged the same on every platform.
#[must_use]
pub fn has_file_name(argument: &str) -> bool {
    if argument.ends_with(['/', '\\']) {
        return false;
    }

    let last = argument.rsplit(['/', '\\']).next().unwrap_or_default();
    let last = match last.as_bytes() {
        [drive, b':', ..] if drive.is_ascii_alphabetic() && argument.len() == last.len() => {
            &last[2..]
        }
        _ => last,
    };

    !matches!(last, "" | "." | "..") && Path::new(last).file_name().is_some()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::canonical::{PathStyle, TableResolver, VerbatimResolver};
    use crate::coverage::{FileCoverage, ModuleCoverage};

    fn verbatim_export(output: &Path) -> SonarQubeExport<VerbatimResolver> {
        SonarQubeExport::with_resolver(ExportConfig::new().with_output(output), VerbatimResolver)
    }

    #[test]
    fn test_has_file_name() {
        assert!(has_file_name("report.xml"));
        assert!(has_file_name("out/report.xml"));
        assert!(has_file_name("C:\\reports\\sonar.xml"));
        assert!(has_file_name("C:sonar.xml"));

        assert!(!has_file_name(""));
        assert!(!has_file_name("C:\\reports\\"));
        assert!(!has_file_name("out/"));
        assert!(!has_file_name("out/."));
        assert!(!has_file_name(".."));
        assert!(!has_file_name("C:"));
    }

    #[test]
    fn test_check_argument_rejects_directory() {
        let plugin = SonarQubeExport::new(ExportConfig::default());
        let err = plugin.check_argument(Some("C:\\reports\\")).unwrap_err();
        assert!(matches!(err, ExportError::InvalidArgument { .. }));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_check_argument_accepts_absent_and_file() {
        let plugin = SonarQubeExport::new(ExportConfig::default());
        assert!(plugin.check_argument(None).is_ok());
        assert!(plugin.check_argument(Some("coverage.xml")).is_ok());
    }

    #[test]
    fn test_static_queries() {
        let plugin = create_plugin();
        assert_eq!(plugin.argument_help_description(), "output file (optional)");
        assert_eq!(plugin.export_plugin_version(), CURRENT_EXPORT_PLUGIN_VERSION);
    }

    #[test]
    fn test_output_path_prefers_argument() {
        let plugin = SonarQubeExport::new(ExportConfig::default());
        assert_eq!(plugin.output_path(None), PathBuf::from("SonarQube.xml"));
        assert_eq!(plugin.output_path(Some("x.xml")), PathBuf::from("x.xml"));
    }

    #[test]
    fn test_export_merges_modules() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("SonarQube.xml");

        let data = CoverageData::new("run")
            .with_module(ModuleCoverage::new("m1").with_file(FileCoverage::new("a.cpp").with_line(10, false)))
            .with_module(ModuleCoverage::new("m2").with_file(FileCoverage::new("a.cpp").with_line(10, true)));

        let written = verbatim_export(&output).export(&data, None).unwrap();
        assert_eq!(written, output);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.matches("<file path=").count(), 1);
        assert!(content.contains(r#"<file path="a.cpp">"#));
        assert!(content.contains(r#"<lineToCover lineNumber="10" covered="true"/>"#));
        assert_eq!(content.matches("<lineToCover").count(), 1);
    }

    #[test]
    fn test_export_empty_data_writes_root_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("SonarQube.xml");

        let data = CoverageData::new("empty").with_module(ModuleCoverage::new("no-files.dll"));
        let _ = verbatim_export(&output).export(&data, None).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<coverage version=\"1\">\n</coverage>\n"
        );
    }

    #[test]
    fn test_export_argument_overrides_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let default_output = temp_dir.path().join("default.xml");
        let override_output = temp_dir.path().join("override.xml");

        let written = verbatim_export(&default_output)
            .export(&CoverageData::default(), override_output.to_str())
            .unwrap();

        assert_eq!(written, override_output);
        assert!(override_output.exists());
        assert!(!default_output.exists());
    }

    #[test]
    fn test_export_unwritable_destination() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("missing-dir").join("out.xml");

        let err = verbatim_export(&output)
            .export(&CoverageData::default(), None)
            .unwrap_err();
        assert!(matches!(err, ExportError::OutputUnavailable { .. }));
        assert!(!err.is_usage_error());
    }

    #[test]
    fn test_export_canonicalizes_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("out.xml");

        let resolver = TableResolver::new()
            .with_entry("c:\\temp", "Temp")
            .with_entry("c:\\temp\\file.cpp", "File.cpp");
        let config = ExportConfig::new()
            .with_output(&output)
            .with_path_style(PathStyle::Windows);
        let plugin = SonarQubeExport::with_resolver(config, resolver);

        let data = CoverageData::new("run").with_module(
            ModuleCoverage::new("m")
                .with_file(FileCoverage::new("c:\\temp\\file.cpp").with_line(3, false))
                .with_file(FileCoverage::new("C:\\TEMP\\FILE.CPP").with_line(3, true)),
        );
        let _ = plugin.export(&data, None).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.matches("<file path=").count(), 1);
        assert!(content.contains(r#"<file path="C:\Temp\File.cpp">"#));
        assert!(content.contains(r#"<lineToCover lineNumber="3" covered="true"/>"#));
    }

    #[test]
    fn test_canonicalize_then_write_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("out.xml");

        let resolver = TableResolver::new().with_entry("main.cpp", "Main.cpp");
        let config = ExportConfig::new().with_path_style(PathStyle::Windows);
        let plugin = SonarQubeExport::with_resolver(config, resolver);

        let mut coverage = AggregatedCoverage::new();
        coverage.record_line("main.cpp", 1, true);
        coverage.record_line("MAIN.CPP", 1, false);
        let coverage = plugin.canonicalize(coverage);

        let summary = coverage.summary();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.total_lines, 1);
        assert_eq!(summary.covered_lines, 1);

        let written = plugin.write_report(&coverage, output.to_str()).unwrap();
        assert_eq!(written, output);
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#"<file path="Main.cpp">"#));
        assert!(content.contains(r#"<lineToCover lineNumber="1" covered="true"/>"#));
    }

    #[test]
    fn test_canonicalize_disabled_keeps_raw_keys() {
        let resolver = TableResolver::new().with_entry("a", "A");
        let config = ExportConfig::new().with_canonicalize(false);
        let plugin = SonarQubeExport::with_resolver(config, resolver);

        let mut coverage = AggregatedCoverage::new();
        coverage.record_line("a", 1, true);
        let coverage = plugin.canonicalize(coverage);
        assert!(coverage.get("a").is_some());
    }

    #[test]
    fn test_export_does_not_leak_between_calls() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("out.xml");
        let plugin = verbatim_export(&output);

        let first = CoverageData::new("1")
            .with_module(ModuleCoverage::new("m").with_file(FileCoverage::new("first.cpp").with_line(1, true)));
        let second = CoverageData::new("2")
            .with_module(ModuleCoverage::new("m").with_file(FileCoverage::new("second.cpp").with_line(1, true)));

        let _ = plugin.export(&first, None).unwrap();
        let _ = plugin.export(&second, None).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(!content.contains("first.cpp"));
        assert!(content.contains("second.cpp"));
    }
}
