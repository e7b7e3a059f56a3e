//! Threshold checks that turn report metrics into recommendations.

use std::fmt;

use super::report::QualityReport;

/// A rule that inspects a report's metrics and emits recommendations.
pub trait QualityCheck: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Recommendations for `report`, in column order where per-column.
    fn check(&self, report: &QualityReport) -> Vec<String>;
}

/// Flags columns whose missing percentage exceeds a threshold.
#[derive(Debug, Clone)]
pub struct MissingValuesCheck {
    pub threshold_pct: f64,
}

impl QualityCheck for MissingValuesCheck {
    fn name(&self) -> &'static str {
        "missing_values"
    }

    fn check(&self, report: &QualityReport) -> Vec<String> {
        let rows = report.record_count as f64;
        report
            .completeness
            .column_completeness
            .iter()
            .filter_map(|(column, stats)| {
                let missing_pct = stats.missing_count as f64 / rows * 100.0;
                (missing_pct > self.threshold_pct).then(|| {
                    format!(
                        "Column '{}' has {:.1}% missing values - consider imputation or removal",
                        column, missing_pct
                    )
                })
            })
            .collect()
    }
}

/// Flags a dataset whose duplicate percentage exceeds a threshold.
#[derive(Debug, Clone)]
pub struct DuplicatesCheck {
    pub threshold_pct: f64,
}

impl QualityCheck for DuplicatesCheck {
    fn name(&self) -> &'static str {
        "duplicates"
    }

    fn check(&self, report: &QualityReport) -> Vec<String> {
        let pct = report.duplicates.duplicate_pct;
        if pct > self.threshold_pct {
            vec![format!(
                "Dataset contains {:.1}% duplicates - consider deduplication",
                pct
            )]
        } else {
            Vec::new()
        }
    }
}

/// Flags columns with very few distinct values relative to a large row count.
#[derive(Debug, Clone)]
pub struct LowCardinalityCheck {
    /// Distinct values as a percentage of rows must be below this.
    pub max_unique_pct: f64,
    /// Only applies to datasets with more rows than this.
    pub min_rows: usize,
}

impl QualityCheck for LowCardinalityCheck {
    fn name(&self) -> &'static str {
        "low_cardinality"
    }

    fn check(&self, report: &QualityReport) -> Vec<String> {
        if report.record_count <= self.min_rows {
            return Vec::new();
        }

        let rows = report.record_count as f64;
        report
            .data_types
            .iter()
            .filter(|(_, summary)| (summary.unique_values as f64 / rows * 100.0) < self.max_unique_pct)
            .map(|(column, _)| {
                format!(
                    "Column '{}' has very low cardinality - may not be useful for analysis",
                    column
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use indexmap::IndexMap;

    use super::*;
    use crate::quality::report::{
        ColumnCompleteness, ColumnTypeSummary, CompletenessSummary, DuplicateSummary,
    };
    use crate::schema::ColumnType;

    fn report(rows: usize, columns: &[(&str, usize, usize)], duplicate_pct: f64) -> QualityReport {
        let mut column_completeness = IndexMap::new();
        let mut data_types = IndexMap::new();
        for (name, missing, unique) in columns {
            column_completeness.insert(
                name.to_string(),
                ColumnCompleteness {
                    missing_count: *missing,
                    completeness_pct: (rows - missing) as f64 / rows as f64 * 100.0,
                },
            );
            data_types.insert(
                name.to_string(),
                ColumnTypeSummary {
                    dtype: ColumnType::String,
                    unique_values: *unique,
                    sample_values: Vec::new(),
                },
            );
        }

        QualityReport {
            dataset_name: "t".to_string(),
            timestamp: Utc::now(),
            record_count: rows,
            column_count: columns.len(),
            quality_score: 0.0,
            completeness: CompletenessSummary {
                overall_completeness_pct: 0.0,
                total_cells: rows * columns.len(),
                missing_cells: 0,
                column_completeness,
            },
            duplicates: DuplicateSummary {
                duplicate_count: 0,
                duplicate_pct,
                unique_count: rows,
                total_records: rows,
                subset: None,
            },
            data_types,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn test_missing_threshold_is_strict() {
        let check = MissingValuesCheck { threshold_pct: 20.0 };
        let r = report(100, &[("a", 20, 5), ("ingresos", 30, 5)], 0.0);
        assert_eq!(
            check.check(&r),
            vec!["Column 'ingresos' has 30.0% missing values - consider imputation or removal"]
        );
    }

    #[test]
    fn test_duplicates_message() {
        let check = DuplicatesCheck { threshold_pct: 5.0 };
        assert!(check.check(&report(10, &[("a", 0, 1)], 5.0)).is_empty());
        assert_eq!(
            check.check(&report(10, &[("a", 0, 1)], 20.0)),
            vec!["Dataset contains 20.0% duplicates - consider deduplication"]
        );
    }

    #[test]
    fn test_low_cardinality_needs_enough_rows() {
        let check = LowCardinalityCheck {
            max_unique_pct: 1.0,
            min_rows: 100,
        };
        assert!(check.check(&report(100, &[("pais", 0, 0)], 0.0)).is_empty());

        let r = report(200, &[("pais", 0, 1), ("tipo", 0, 2)], 0.0);
        assert_eq!(
            check.check(&r),
            vec!["Column 'pais' has very low cardinality - may not be useful for analysis"]
        );
    }
}
