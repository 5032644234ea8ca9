//! Export configuration

use crate::canonical::PathStyle;
use crate::report::ReportEncoding;
use crate::result::ExportResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report file written when no destination override is given
pub const DEFAULT_OUTPUT_FILE: &str = "SonarQube.xml";

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination used when the export argument is absent
    pub output: PathBuf,
    /// Report text encoding
    pub encoding: ReportEncoding,
    /// Separator convention of the raw paths
    pub path_style: PathStyle,
    /// Resolve on-disk casing of every path before writing
    pub canonicalize: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            encoding: ReportEncoding::Utf8,
            path_style: PathStyle::native(),
            canonicalize: true,
        }
    }
}

impl ExportConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file; absent keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> ExportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Set default output path
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set report encoding
    #[must_use]
    pub const fn with_encoding(mut self, encoding: ReportEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set path style
    #[must_use]
    pub const fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Enable or disable canonicalization
    #[must_use]
    pub const fn with_canonicalize(mut self, canonicalize: bool) -> Self {
        self.canonicalize = canonicalize;
        self
    }
}
