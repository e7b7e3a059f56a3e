//! Quality report builder.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::checks::{DuplicatesCheck, LowCardinalityCheck, MissingValuesCheck, QualityCheck};
use super::report::{
    ColumnCompleteness, ColumnTypeSummary, CompletenessSummary, DuplicateSummary, QualityReport,
};
use crate::error::{DibieError, Result};
use crate::inference::{column_positions, distinct_row_count, ColumnProfiler};
use crate::input::DataTable;

/// Configuration for quality scoring and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Weight of overall completeness in the score.
    pub completeness_weight: f64,
    /// Weight of `100 - duplicate_pct` in the score.
    pub uniqueness_weight: f64,
    /// Columns missing more than this percentage get a recommendation.
    pub missing_pct_threshold: f64,
    /// Datasets with more duplicates than this percentage get a recommendation.
    pub duplicate_pct_threshold: f64,
    /// Distinct-to-row percentage below which a column is low cardinality.
    pub low_cardinality_pct: f64,
    /// Low cardinality is only reported above this many rows.
    pub low_cardinality_min_rows: usize,
    /// Sample values kept per column in the type summary.
    pub type_sample_size: usize,
    /// Columns compared for duplicates; all columns when absent.
    pub duplicate_subset: Option<Vec<String>>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            completeness_weight: 0.6,
            uniqueness_weight: 0.4,
            missing_pct_threshold: 20.0,
            duplicate_pct_threshold: 5.0,
            low_cardinality_pct: 1.0,
            low_cardinality_min_rows: 100,
            type_sample_size: 5,
            duplicate_subset: None,
        }
    }
}

impl QualityConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [self.completeness_weight, self.uniqueness_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DibieError::Config(
                "quality weights must be non-negative numbers".to_string(),
            ));
        }
        if ((self.completeness_weight + self.uniqueness_weight) - 1.0).abs() > 1e-9 {
            return Err(DibieError::Config(format!(
                "quality weights must sum to 1, got {} + {}",
                self.completeness_weight, self.uniqueness_weight
            )));
        }

        let thresholds = [
            ("missing_pct_threshold", self.missing_pct_threshold),
            ("duplicate_pct_threshold", self.duplicate_pct_threshold),
            ("low_cardinality_pct", self.low_cardinality_pct),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(DibieError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.type_sample_size == 0 {
            return Err(DibieError::Config("type_sample_size must be at least 1".to_string()));
        }
        if matches!(&self.duplicate_subset, Some(subset) if subset.is_empty()) {
            return Err(DibieError::Config("duplicate_subset must name at least one column".to_string()));
        }
        Ok(())
    }
}

/// Builds [`QualityReport`] values from tables.
#[derive(Debug)]
pub struct QualityReportBuilder {
    config: QualityConfig,
    profiler: ColumnProfiler,
    checks: Vec<Box<dyn QualityCheck>>,
}

impl QualityReportBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::with_config(QualityConfig::default())
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: QualityConfig) -> Self {
        let checks: Vec<Box<dyn QualityCheck>> = vec![
            Box::new(MissingValuesCheck {
                threshold_pct: config.missing_pct_threshold,
            }),
            Box::new(DuplicatesCheck {
                threshold_pct: config.duplicate_pct_threshold,
            }),
            Box::new(LowCardinalityCheck {
                max_unique_pct: config.low_cardinality_pct,
                min_rows: config.low_cardinality_min_rows,
            }),
        ];

        Self {
            profiler: ColumnProfiler::with_sample_size(config.type_sample_size),
            config,
            checks,
        }
    }

    /// Append a check; its recommendations follow those of the built-in checks.
    pub fn with_check(mut self, check: impl QualityCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Build the report, stamped with the current time.
    pub fn build(&self, table: &DataTable, dataset_name: &str) -> Result<QualityReport> {
        self.build_at(table, dataset_name, Utc::now())
    }

    /// Build the report with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// - [`DibieError::InvalidInput`] if the table has no rows or no columns.
    /// - [`DibieError::ColumnNotFound`] if the duplicate subset names an unknown column.
    pub fn build_at(
        &self,
        table: &DataTable,
        dataset_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<QualityReport> {
        let record_count = table.row_count();
        let column_count = table.column_count();
        if record_count == 0 {
            return Err(DibieError::invalid_input(
                "quality report",
                format!("dataset '{}' has no rows", dataset_name),
            ));
        }
        if column_count == 0 {
            return Err(DibieError::invalid_input(
                "quality report",
                format!("dataset '{}' has no columns", dataset_name),
            ));
        }

        let (completeness, data_types) = self.profile_columns(table);
        let duplicates = self.duplicates(table)?;

        let score = self.config.completeness_weight * completeness.overall_completeness_pct
            + self.config.uniqueness_weight * (100.0 - duplicates.duplicate_pct);
        let quality_score = round2(score.clamp(0.0, 100.0));

        let mut report = QualityReport {
            dataset_name: dataset_name.to_string(),
            timestamp,
            record_count,
            column_count,
            quality_score,
            completeness,
            duplicates,
            data_types,
            recommendations: Vec::new(),
        };

        let mut recommendations = Vec::new();
        for check in &self.checks {
            let found = check.check(&report);
            tracing::debug!(check = check.name(), count = found.len(), "Ran quality check");
            recommendations.extend(found);
        }
        report.recommendations = recommendations;

        tracing::info!(
            dataset = dataset_name,
            score = report.quality_score,
            recommendations = report.recommendations.len(),
            "Built quality report"
        );
        Ok(report)
    }

    fn profile_columns(
        &self,
        table: &DataTable,
    ) -> (CompletenessSummary, IndexMap<String, ColumnTypeSummary>) {
        let rows = table.row_count();
        let mut column_completeness = IndexMap::with_capacity(table.column_count());
        let mut data_types = IndexMap::with_capacity(table.column_count());
        let mut missing_cells = 0;

        for (index, name) in table.headers.iter().enumerate() {
            let stats = self.profiler.profile_values(&table.column_lenient(index));
            missing_cells += stats.null_count;

            column_completeness.insert(
                name.clone(),
                ColumnCompleteness {
                    missing_count: stats.null_count,
                    completeness_pct: (rows - stats.null_count) as f64 / rows as f64 * 100.0,
                },
            );
            data_types.insert(
                name.clone(),
                ColumnTypeSummary {
                    dtype: stats.data_type,
                    unique_values: stats.unique_count,
                    sample_values: stats.sample_values,
                },
            );
        }

        let total_cells = rows * table.column_count();
        let completeness = CompletenessSummary {
            overall_completeness_pct: (total_cells - missing_cells) as f64 / total_cells as f64
                * 100.0,
            total_cells,
            missing_cells,
            column_completeness,
        };
        (completeness, data_types)
    }

    fn duplicates(&self, table: &DataTable) -> Result<DuplicateSummary> {
        let positions = match &self.config.duplicate_subset {
            Some(subset) if subset.is_empty() => {
                return Err(DibieError::invalid_input(
                    "duplicate detection",
                    "column subset is empty",
                ));
            }
            Some(subset) => column_positions(table, subset)?,
            None => (0..table.column_count()).collect(),
        };

        let total_records = table.row_count();
        let unique_count = distinct_row_count(table, &positions);
        let duplicate_count = total_records - unique_count;

        Ok(DuplicateSummary {
            duplicate_count,
            duplicate_pct: duplicate_count as f64 / total_records as f64 * 100.0,
            unique_count,
            total_records,
            subset: self.config.duplicate_subset.clone(),
        })
    }
}

impl Default for QualityReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
