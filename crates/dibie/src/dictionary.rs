//! Data dictionary generation.
//!
//! One record per column: statistics, a business type inferred from the column
//! name, a cardinality class and a generated description. A column that cannot
//! be profiled gets a degraded record instead of failing the whole dictionary.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{DibieError, Result};
use crate::inference::{classify_cardinality, ColumnClassifier, ColumnProfiler, DEFAULT_SAMPLE_SIZE};
use crate::input::{DataTable, ScalarValue};
use crate::schema::{BusinessType, CardinalityClass, ColumnStatistics, ColumnType};

/// Below this many distinct values the description spells out the count.
const DESCRIBE_UNIQUE_BELOW: usize = 10;

/// Dictionary builder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Number of sample values kept per column.
    pub sample_size: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl DictionaryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(DibieError::Config("sample_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Dictionary entry for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    /// Column name as it appears in the table.
    pub column_name: String,
    /// Inferred from the name, case-insensitively.
    pub business_type: BusinessType,
    #[serde(rename = "cardinality_class")]
    pub cardinality: CardinalityClass,
    pub nullable: bool,
    #[serde(flatten)]
    pub statistics: ColumnStatistics,
    pub description: String,
    /// Why the column could not be profiled, for degraded records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Data dictionary for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDictionary {
    pub table_name: String,
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<ColumnRecord>,
}

impl DataDictionary {
    /// Get a column record by name.
    pub fn column(&self, name: &str) -> Option<&ColumnRecord> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    /// Records that could not be profiled.
    pub fn degraded_columns(&self) -> impl Iterator<Item = &ColumnRecord> {
        self.columns.iter().filter(|c| c.error.is_some())
    }

    /// Complete columns whose values are all distinct.
    pub fn key_candidates(&self) -> impl Iterator<Item = &ColumnRecord> {
        self.columns
            .iter()
            .filter(|c| c.cardinality.is_key_candidate() && !c.nullable && c.error.is_none())
    }

    /// Write the dictionary as CSV, one row per column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "column_name",
            "data_type",
            "business_type",
            "cardinality_class",
            "nullable",
            "non_null_count",
            "null_count",
            "null_percentage",
            "unique_count",
            "sample_values",
            "description",
        ])?;

        for record in &self.columns {
            let stats = &record.statistics;
            let samples: Vec<String> = stats.sample_values.iter().map(ScalarValue::to_string).collect();
            csv.write_record([
                record.column_name.clone(),
                stats.data_type.to_string(),
                record.business_type.to_string(),
                record.cardinality.to_string(),
                record.nullable.to_string(),
                stats.non_null_count.to_string(),
                stats.null_count.to_string(),
                format!("{:.2}", stats.null_percentage),
                stats.unique_count.to_string(),
                samples.join(" | "),
                record.description.clone(),
            ])?;
        }

        csv.flush().map_err(|e| DibieError::Io {
            path: "<csv writer>".into(),
            source: e,
        })?;
        Ok(())
    }
}

/// Builds [`DataDictionary`] values from tables.
#[derive(Debug, Clone, Default)]
pub struct DataDictionaryBuilder {
    profiler: ColumnProfiler,
    classifier: ColumnClassifier,
}

impl DataDictionaryBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: &DictionaryConfig) -> Self {
        Self {
            profiler: ColumnProfiler::with_sample_size(config.sample_size),
            classifier: ColumnClassifier::new(),
        }
    }

    /// Use a different business type classifier.
    pub fn with_classifier(mut self, classifier: ColumnClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Build the dictionary for `table`.
    ///
    /// # Errors
    ///
    /// [`DibieError::InvalidInput`] if the table has no rows. Failures of single
    /// columns are recorded on the column instead.
    pub fn build(&self, table: &DataTable, table_name: &str) -> Result<DataDictionary> {
        let total_rows = table.row_count();
        if total_rows == 0 {
            return Err(DibieError::invalid_input(
                "data dictionary",
                format!("table '{}' has no rows", table_name),
            ));
        }

        let mut columns = Vec::with_capacity(table.column_count());
        for (index, name) in table.headers.iter().enumerate() {
            let record = match self.profiler.profile_column(table, index) {
                Ok(statistics) => self.record(name, statistics, total_rows, None)?,
                Err(e) => {
                    tracing::warn!(column = %name, error = %e, "Column degraded in data dictionary");
                    self.record(name, degraded_statistics(total_rows), total_rows, Some(e.to_string()))?
                }
            };
            columns.push(record);
        }

        tracing::info!(
            table = table_name,
            rows = total_rows,
            columns = columns.len(),
            "Built data dictionary"
        );

        Ok(DataDictionary {
            table_name: table_name.to_string(),
            total_rows,
            total_columns: table.column_count(),
            columns,
        })
    }

    fn record(
        &self,
        name: &str,
        mut statistics: ColumnStatistics,
        total_rows: usize,
        error: Option<String>,
    ) -> Result<ColumnRecord> {
        let business_type = if error.is_some() {
            BusinessType::Other
        } else {
            self.classifier.classify(name)
        };
        let cardinality = classify_cardinality(statistics.unique_count, total_rows)?;
        let description = describe_column(name, &statistics);
        statistics.null_percentage = round2(statistics.null_percentage);

        Ok(ColumnRecord {
            column_name: name.to_string(),
            business_type,
            cardinality,
            nullable: statistics.nullable(),
            statistics,
            description,
            error,
        })
    }
}

/// Statistics for a column whose values could not be read: everything missing.
fn degraded_statistics(total_rows: usize) -> ColumnStatistics {
    ColumnStatistics {
        non_null_count: 0,
        null_count: total_rows,
        null_percentage: 100.0,
        unique_count: 0,
        sample_values: Vec::new(),
        data_type: ColumnType::Empty,
    }
}

/// Generated description of a column, e.g. `Column 'tipo' - with 3 unique values - (12.5% null)`.
pub fn describe_column(name: &str, stats: &ColumnStatistics) -> String {
    let mut parts = vec![format!("Column '{}'", name)];

    if stats.unique_count == 1 {
        parts.push("with constant value".to_string());
    } else if stats.unique_count < DESCRIBE_UNIQUE_BELOW {
        parts.push(format!("with {} unique values", stats.unique_count));
    }

    if stats.null_count > 0 {
        parts.push(format!("({:.1}% null)", stats.null_percentage));
    }

    parts.join(" - ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
