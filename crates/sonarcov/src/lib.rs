//! Sonarcov: SonarQube Generic Coverage Export
//!
//! Turns line coverage measured by a coverage-collection host into a single
//! SonarQube generic coverage report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   SONARCOV Export Pipeline                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Aggregator │    │ Path       │    │ Report     │            │
//! │   │ (OR fold)  │───►│ Canonical- │───►│ Writer     │            │
//! │   │            │    │ izer       │    │ (XML)      │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```no_run
//! use sonarcov::{create_plugin, CoverageData, FileCoverage, ModuleCoverage};
//!
//! let data = CoverageData::new("run").with_module(
//!     ModuleCoverage::new("app.exe")
//!         .with_file(FileCoverage::new("src/main.cpp").with_line(12, true)),
//! );
//!
//! let plugin = create_plugin();
//! plugin.check_argument(Some("coverage.xml"))?;
//! let written = plugin.export(&data, Some("coverage.xml"))?;
//! println!("report written to {}", written.display());
//! # Ok::<(), sonarcov::ExportError>(())
//! ```

#![warn(missing_docs)]

pub mod canonical;
mod config;
pub mod coverage;
mod plugin;
pub mod report;
mod result;

pub use canonical::{
    FsSegmentResolver, PathCanonicalizer, PathStyle, SegmentResolver, TableResolver,
    VerbatimResolver,
};
pub use config::{ExportConfig, DEFAULT_OUTPUT_FILE};
pub use coverage::{
    aggregate, AggregatedCoverage, AggregatedFile, CoverageData, CoverageSummary, FileCoverage,
    LineCoverage, ModuleCoverage,
};
pub use plugin::{
    create_plugin, has_file_name, ExportPlugin, SonarQubeExport, CURRENT_EXPORT_PLUGIN_VERSION,
};
pub use report::{escape_attribute, ReportEncoding, SonarQubeFormatter, FORMAT_VERSION};
pub use result::{ExportError, ExportResult};
