//! Dataset quality reports: completeness, duplicates, type summaries and recommendations.

mod analyzer;
mod checks;
mod report;

pub use analyzer::{QualityConfig, QualityReportBuilder};
pub use checks::{DuplicatesCheck, LowCardinalityCheck, MissingValuesCheck, QualityCheck};
pub use report::{
    ColumnCompleteness, ColumnTypeSummary, CompletenessSummary, DuplicateSummary, QualityReport,
};
