//! Quality report data structures.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::ScalarValue;
use crate::schema::ColumnType;

/// Quality report for one dataset. Generated once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub dataset_name: String,
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
    pub record_count: usize,
    pub column_count: usize,
    /// Weighted score in `[0, 100]`, rounded to 2 decimals.
    pub quality_score: f64,
    pub completeness: CompletenessSummary,
    pub duplicates: DuplicateSummary,
    /// Per-column storage type summary, in column order.
    pub data_types: IndexMap<String, ColumnTypeSummary>,
    pub recommendations: Vec<String>,
}

/// Missing-value summary for the whole dataset and per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessSummary {
    pub overall_completeness_pct: f64,
    /// `record_count * column_count`.
    pub total_cells: usize,
    pub missing_cells: usize,
    pub column_completeness: IndexMap<String, ColumnCompleteness>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCompleteness {
    pub missing_count: usize,
    pub completeness_pct: f64,
}

/// Duplicate-row summary.
///
/// A duplicate is a row equal to an earlier row over the compared columns; the
/// first occurrence is not counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateSummary {
    pub duplicate_count: usize,
    pub duplicate_pct: f64,
    /// Rows that are not duplicates, `total_records - duplicate_count`.
    pub unique_count: usize,
    pub total_records: usize,
    /// Columns compared, when not all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTypeSummary {
    pub dtype: ColumnType,
    pub unique_values: usize,
    pub sample_values: Vec<ScalarValue>,
}

impl QualityReport {
    /// Whether the report produced no recommendations.
    pub fn is_clean(&self) -> bool {
        self.recommendations.is_empty()
    }
}
