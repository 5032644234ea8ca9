//! SonarQube Generic Coverage Report Writer
//!
//! Serializes aggregated line coverage into the generic test coverage
//! format understood by SonarQube's `sonar.coverageReportPaths`.
//!
//! ## Format
//!
//! ```xml
//! <coverage version="1">
//!   <file path="C:\Src\Game.cpp">
//!     <lineToCover lineNumber="10" covered="true"/>
//!     <lineToCover lineNumber="12" covered="false"/>
//!   </file>
//! </coverage>
//! ```

use crate::coverage::AggregatedCoverage;
use crate::result::{ExportError, ExportResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Version attribute of the root `<coverage>` element
pub const FORMAT_VERSION: u32 = 1;

/// Text encoding of the written report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportEncoding {
    /// UTF-8 without byte-order mark
    #[default]
    Utf8,
    /// UTF-16 little endian with byte-order mark
    Utf16le,
}

impl ReportEncoding {
    fn write_bom<W: Write>(self, sink: &mut W) -> io::Result<()> {
        match self {
            Self::Utf8 => Ok(()),
            Self::Utf16le => sink.write_all(&[0xFF, 0xFE]),
        }
    }

    fn write_str<W: Write>(self, sink: &mut W, text: &str) -> io::Result<()> {
        match self {
            Self::Utf8 => sink.write_all(text.as_bytes()),
            Self::Utf16le => {
                let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
                sink.write_all(&bytes)
            }
        }
    }
}

/// SonarQube generic coverage report generator
#[derive(Debug)]
pub struct SonarQubeFormatter<'a> {
    coverage: &'a AggregatedCoverage,
    encoding: ReportEncoding,
}

impl<'a> SonarQubeFormatter<'a> {
    /// Create a formatter; file keys of `coverage` are emitted as-is
    #[must_use]
    pub fn new(coverage: &'a AggregatedCoverage) -> Self {
        Self {
            coverage,
            encoding: ReportEncoding::default(),
        }
    }

    /// Set the output encoding
    #[must_use]
    pub fn with_encoding(mut self, encoding: ReportEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Generate the report as a string
    #[must_use]
    pub fn generate(&self) -> String {
        let mut xml = String::new();
        self.for_each_line(|line| {
            xml.push_str(line);
            Ok::<(), std::convert::Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
        xml
    }

    /// Stream the report into an already opened sink, one line at a time
    ///
    /// # Errors
    ///
    /// Returns error if the sink rejects a write
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        let encoding = self.encoding;
        encoding.write_bom(sink)?;
        self.for_each_line(|line| encoding.write_str(&mut *sink, line))?;
        sink.flush()
    }

    /// Create or overwrite `path` and write the report into it
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::OutputUnavailable`] if the file cannot be
    /// created; a later write failure is reported as [`ExportError::Io`]
    /// and may leave a partial file behind.
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        let file = File::create(path).map_err(|e| ExportError::output_unavailable(path, e))?;
        let mut sink = BufWriter::new(file);
        self.write_to(&mut sink)?;

        info!(
            path = %path.display(),
            files = self.coverage.len(),
            "wrote SonarQube coverage report"
        );
        Ok(())
    }

    fn for_each_line<E, F>(&self, mut emit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        let mut line = String::new();

        let _ = writeln!(line, r#"<coverage version="{FORMAT_VERSION}">"#);
        emit(&line)?;

        for file in self.coverage.files() {
            line.clear();
            let _ = writeln!(line, r#"  <file path="{}">"#, escape_attribute(file.path()));
            emit(&line)?;

            for (number, executed) in file.lines() {
                line.clear();
                let _ = writeln!(
                    line,
                    r#"    <lineToCover lineNumber="{number}" covered="{executed}"/>"#
                );
                emit(&line)?;
            }

            emit("  </file>\n")?;
        }

        emit("</coverage>\n")
    }
}

/// Escape text for use inside a double-quoted XML attribute
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn create_test_coverage() -> AggregatedCoverage {
        let mut coverage = AggregatedCoverage::new();
        coverage.record_line("src/game.cpp", 15, false);
        coverage.record_line("src/game.cpp", 10, true);
        coverage.record_line("src/player.cpp", 5, true);
        coverage
    }

    #[test]
    fn test_generate_empty_report() {
        let coverage = AggregatedCoverage::new();
        let output = SonarQubeFormatter::new(&coverage).generate();
        assert_eq!(output, "<coverage version=\"1\">\n</coverage>\n");
    }

    #[test]
    fn test_generate_full_document() {
        let coverage = create_test_coverage();
        let output = SonarQubeFormatter::new(&coverage).generate();

        let expected = "\
<coverage version=\"1\">
  <file path=\"src/game.cpp\">
    <lineToCover lineNumber=\"10\" covered=\"true\"/>
    <lineToCover lineNumber=\"15\" covered=\"false\"/>
  </file>
  <file path=\"src/player.cpp\">
    <lineToCover lineNumber=\"5\" covered=\"true\"/>
  </file>
</coverage>
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_path_attribute_is_escaped() {
        let mut coverage = AggregatedCoverage::new();
        coverage.record_line("a&b<\"c\">.cpp", 1, true);
        let output = SonarQubeFormatter::new(&coverage).generate();
        assert!(output.contains(r#"path="a&amp;b&lt;&quot;c&quot;&gt;.cpp""#));
    }

    #[test]
    fn test_escape_attribute_passthrough() {
        assert_eq!(escape_attribute("C:\\Src\\Main.cpp"), "C:\\Src\\Main.cpp");
        assert_eq!(escape_attribute("it's"), "it&apos;s");
    }

    #[test]
    fn test_write_to_utf8_matches_generate() {
        let coverage = create_test_coverage();
        let formatter = SonarQubeFormatter::new(&coverage);
        let mut sink = Vec::new();
        formatter.write_to(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), formatter.generate());
    }

    #[test]
    fn test_write_to_utf16le_has_bom_and_decodes() {
        let coverage = create_test_coverage();
        let formatter = SonarQubeFormatter::new(&coverage).with_encoding(ReportEncoding::Utf16le);
        let mut sink = Vec::new();
        formatter.write_to(&mut sink).unwrap();

        assert_eq!(&sink[..2], &[0xFF, 0xFE]);
        let units: Vec<u16> = sink[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(String::from_utf16(&units).unwrap(), formatter.generate());
    }

    #[test]
    fn test_save_creates_file() {
        let coverage = create_test_coverage();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("SonarQube.xml");

        SonarQubeFormatter::new(&coverage).save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<coverage version=\"1\">"));
        assert!(content.contains("<lineToCover lineNumber=\"5\" covered=\"true\"/>"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.xml");
        std::fs::write(&path, "stale content that is longer than the report itself").unwrap();

        let coverage = AggregatedCoverage::new();
        SonarQubeFormatter::new(&coverage).save(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<coverage version=\"1\">\n</coverage>\n"
        );
    }

    #[test]
    fn test_save_into_missing_directory_is_output_unavailable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("out.xml");

        let coverage = create_test_coverage();
        let err = SonarQubeFormatter::new(&coverage).save(&path).unwrap_err();
        assert!(matches!(err, ExportError::OutputUnavailable { .. }));
    }

    #[test]
    fn test_encoding_serde() {
        let encoding: ReportEncoding = serde_json::from_str("\"utf16le\"").unwrap();
        assert_eq!(encoding, ReportEncoding::Utf16le);
    }
}
