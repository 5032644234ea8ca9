//! Status reporting on stderr

use console::{style, Style, Term};
use sonarcov::CoverageSummary;
use std::path::Path;

/// Status reporter for command results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print the coverage summary of a written report
    pub fn summary(&self, summary: &CoverageSummary, output: &Path) {
        if self.quiet {
            return;
        }

        let line = format_summary(summary);
        let line = if self.use_color {
            Style::new().bold().apply_to(line).to_string()
        } else {
            line
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&line);
        let _ = self
            .term
            .write_line(&format!("Report written to {}", output.display()));
    }
}

/// One-line summary text
#[must_use]
pub fn format_summary(summary: &CoverageSummary) -> String {
    format!(
        "{} files, {}/{} lines covered ({:.1}%)",
        summary.files, summary.covered_lines, summary.total_lines, summary.coverage_percent
    )
}
