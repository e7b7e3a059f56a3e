//! Per-column statistics.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::input::ScalarValue;

/// Statistics computed for a column.
///
/// A snapshot of the table at profiling time; not kept in sync with later edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Number of non-missing values.
    pub non_null_count: usize,
    /// Number of null/missing values.
    pub null_count: usize,
    /// `null_count / total_rows * 100`.
    pub null_percentage: f64,
    /// Number of distinct non-null values.
    pub unique_count: usize,
    /// First non-null values in row order.
    #[serde(default)]
    pub sample_values: Vec<ScalarValue>,
    /// Storage type summarized over the non-null values.
    pub data_type: ColumnType,
}

impl ColumnStatistics {
    /// Total number of values (including nulls).
    pub fn count(&self) -> usize {
        self.non_null_count + self.null_count
    }

    /// Whether null values are present.
    pub fn nullable(&self) -> bool {
        self.null_count > 0
    }
}
