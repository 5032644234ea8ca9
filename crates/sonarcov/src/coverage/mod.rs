//! Coverage input model and aggregation
//!
//! ```text
//! CoverageData ─► ModuleCoverage ─► FileCoverage ─► LineCoverage
//!        │
//!        └──► AggregatedCoverage  (raw path → line → ever executed)
//! ```

mod aggregate;
mod model;

pub use aggregate::{aggregate, AggregatedCoverage, AggregatedFile, CoverageSummary};
pub use model::{CoverageData, FileCoverage, LineCoverage, ModuleCoverage};
