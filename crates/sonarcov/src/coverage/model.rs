//! Host-supplied coverage model
//!
//! Mirrors what a coverage-collection host hands to an exporter: a list of
//! modules, each owning the source files it reported, each file owning its
//! per-line execution status. The exporter only ever reads this model.

use crate::result::{ExportError, ExportResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Execution status of a single source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCoverage {
    /// 1-based line number
    pub line_number: u32,
    /// Whether the line ran at least once
    pub executed: bool,
}

impl LineCoverage {
    /// Create a line record
    #[must_use]
    pub const fn new(line_number: u32, executed: bool) -> Self {
        Self {
            line_number,
            executed,
        }
    }
}

/// Coverage for one source file as reported by one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    /// Path exactly as supplied by the host
    pub path: String,
    /// Line records, in any order, duplicates allowed
    #[serde(default)]
    pub lines: Vec<LineCoverage>,
}

impl FileCoverage {
    /// Create an empty file record
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    /// Add a line record
    #[must_use]
    pub fn with_line(mut self, line_number: u32, executed: bool) -> Self {
        self.lines.push(LineCoverage::new(line_number, executed));
        self
    }
}

/// Coverage reported by one instrumented binary or library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCoverage {
    /// Module path (informational)
    #[serde(default)]
    pub path: String,
    /// Files the module reported
    #[serde(default)]
    pub files: Vec<FileCoverage>,
}

impl ModuleCoverage {
    /// Create an empty module record
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
        }
    }

    /// Add a file record
    #[must_use]
    pub fn with_file(mut self, file: FileCoverage) -> Self {
        self.files.push(file);
        self
    }
}

/// Everything measured during one coverage run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageData {
    /// Run name (informational)
    #[serde(default)]
    pub name: String,
    /// Modules in discovery order
    #[serde(default)]
    pub modules: Vec<ModuleCoverage>,
}

impl CoverageData {
    /// Create empty coverage data
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
        }
    }

    /// Add a module record
    #[must_use]
    pub fn with_module(mut self, module: ModuleCoverage) -> Self {
        self.modules.push(module);
        self
    }

    /// Parse coverage data from JSON text
    pub fn from_json_str(content: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse coverage data from YAML text
    pub fn from_yaml_str(content: &str) -> ExportResult<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load coverage data from a `.json`, `.yaml` or `.yml` file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, has an unknown extension,
    /// or does not parse
    pub fn load(path: &Path) -> ExportResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path)?;

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Err(ExportError::invalid_input(format!(
                "unsupported coverage file format: {}",
                path.display()
            ))),
        }
    }
}
