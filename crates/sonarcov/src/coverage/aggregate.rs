//! Line coverage aggregation
//!
//! Folds every observation of a (path, line) pair into a single
//! "ever executed" flag. The fold is a logical OR, so it is commutative,
//! associative and idempotent: the order modules, files or runs arrive in
//! never changes the resulting flags, only the first-seen file order.

use super::model::{CoverageData, FileCoverage, ModuleCoverage};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Merged line coverage for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedFile {
    path: String,
    lines: BTreeMap<u32, bool>,
}

impl AggregatedFile {
    fn new(path: String) -> Self {
        Self {
            path,
            lines: BTreeMap::new(),
        }
    }

    /// Path key of this entry
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lines in ascending order with their merged executed flag
    pub fn lines(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.lines.iter().map(|(line, executed)| (*line, *executed))
    }

    /// Merged flag for a line, if the line was observed
    #[must_use]
    pub fn is_executed(&self, line_number: u32) -> Option<bool> {
        self.lines.get(&line_number).copied()
    }

    /// Number of distinct lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of lines executed at least once
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.lines.values().filter(|executed| **executed).count()
    }

    fn record(&mut self, line_number: u32, executed: bool) {
        *self.lines.entry(line_number).or_insert(false) |= executed;
    }

    fn absorb(&mut self, other: &Self) {
        for (line, executed) in other.lines() {
            self.record(line, executed);
        }
    }
}

/// Coverage summary statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSummary {
    /// Number of distinct files
    pub files: usize,
    /// Number of distinct (file, line) pairs
    pub total_lines: usize,
    /// Number of those executed at least once
    pub covered_lines: usize,
    /// Coverage percentage
    pub coverage_percent: f64,
}

/// Path-keyed map of merged line coverage, iterated in first-seen order
#[derive(Debug, Clone, Default)]
pub struct AggregatedCoverage {
    files: Vec<AggregatedFile>,
    index: HashMap<String, usize>,
}

impl AggregatedCoverage {
    /// Create an empty aggregation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every module of a coverage run
    pub fn add_coverage_data(&mut self, data: &CoverageData) {
        for module in &data.modules {
            self.add_module(module);
        }
    }

    /// Fold one module; modules without files contribute nothing
    pub fn add_module(&mut self, module: &ModuleCoverage) {
        if module.files.is_empty() {
            debug!(module = %module.path, "skipping module without files");
            return;
        }

        for file in &module.files {
            self.add_file(file);
        }
    }

    /// Fold one file; files without lines contribute nothing
    pub fn add_file(&mut self, file: &FileCoverage) {
        if file.lines.is_empty() {
            debug!(file = %file.path, "skipping file without lines");
            return;
        }

        let entry = self.entry(&file.path);
        for line in &file.lines {
            entry.record(line.line_number, line.executed);
        }
    }

    /// Record one observation of a line
    pub fn record_line(&mut self, path: &str, line_number: u32, executed: bool) {
        self.entry(path).record(line_number, executed);
    }

    /// Files in first-seen order
    pub fn files(&self) -> impl ExactSizeIterator<Item = &AggregatedFile> {
        self.files.iter()
    }

    /// Look up a file by its path key
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&AggregatedFile> {
        self.index.get(path).map(|&i| &self.files[i])
    }

    /// Number of distinct files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Calculate summary statistics
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        let total_lines: usize = self.files.iter().map(AggregatedFile::line_count).sum();
        let covered_lines: usize = self.files.iter().map(AggregatedFile::covered_count).sum();

        let coverage_percent = if total_lines > 0 {
            covered_lines as f64 / total_lines as f64 * 100.0
        } else {
            0.0
        };

        CoverageSummary {
            files: self.files.len(),
            total_lines,
            covered_lines,
            coverage_percent,
        }
    }

    /// Re-key every file through `key_fn`, keeping first-seen order.
    ///
    /// `key_fn` runs once per distinct path. Files whose new keys coincide
    /// are merged with the same OR rule.
    #[must_use]
    pub fn rekey<F>(self, mut key_fn: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        let mut rekeyed = Self::new();

        for file in self.files {
            let key = key_fn(&file.path);
            if let Some(&i) = rekeyed.index.get(&key) {
                warn!(
                    raw = %file.path,
                    collated = %key,
                    "collating duplicate file under one path"
                );
                rekeyed.files[i].absorb(&file);
            } else {
                let _ = rekeyed.index.insert(key.clone(), rekeyed.files.len());
                rekeyed.files.push(AggregatedFile {
                    path: key,
                    lines: file.lines,
                });
            }
        }

        rekeyed
    }

    fn entry(&mut self, path: &str) -> &mut AggregatedFile {
        let i = match self.index.get(path) {
            Some(&i) => i,
            None => {
                let i = self.files.len();
                self.files.push(AggregatedFile::new(path.to_string()));
                let _ = self.index.insert(path.to_string(), i);
                i
            }
        };
        &mut self.files[i]
    }
}

/// Aggregate a sequence of modules into a path-keyed coverage map
#[must_use]
pub fn aggregate<'a, I>(modules: I) -> AggregatedCoverage
where
    I: IntoIterator<Item = &'a ModuleCoverage>,
{
    let mut coverage = AggregatedCoverage::new();
    for module in modules {
        coverage.add_module(module);
    }
    coverage
}
