//! Column profiling: null counts, distinct values, samples and storage type.

use std::collections::HashSet;

use crate::error::{DibieError, Result};
use crate::input::{DataTable, ScalarValue, ValueKey};
use crate::schema::{ColumnStatistics, ColumnType};

/// Default number of sample values kept per column.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Computes [`ColumnStatistics`] for table columns.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    /// Maximum number of non-null sample values to keep.
    sample_size: usize,
}

impl ColumnProfiler {
    /// Create a profiler keeping [`DEFAULT_SAMPLE_SIZE`] samples.
    pub fn new() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Create a profiler keeping `sample_size` samples.
    pub fn with_sample_size(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Profile the column at `col_index`.
    ///
    /// # Errors
    ///
    /// - [`DibieError::ColumnFailure`] if a row is too short to hold the column.
    /// - [`DibieError::InvalidInput`] if the table has no rows.
    pub fn profile_column(&self, table: &DataTable, col_index: usize) -> Result<ColumnStatistics> {
        let values = table.column(col_index)?;
        let name = &table.headers[col_index];

        if values.is_empty() {
            return Err(DibieError::invalid_input(
                "null percentage",
                format!("column '{}' has no rows", name),
            ));
        }

        Ok(self.profile_values(&values))
    }

    /// Profile a non-empty slice of values. Percentages use `values.len()` as denominator.
    pub(crate) fn profile_values(&self, values: &[&ScalarValue]) -> ColumnStatistics {
        let total = values.len();

        let mut null_count = 0;
        let mut distinct: HashSet<ValueKey<'_>> = HashSet::new();
        let mut sample_values = Vec::with_capacity(self.sample_size);
        let mut data_type = ColumnType::Empty;

        for value in values {
            let Some(key) = value.key() else {
                null_count += 1;
                continue;
            };

            distinct.insert(key);
            if sample_values.len() < self.sample_size {
                sample_values.push((*value).clone());
            }
            if let Some(t) = value.column_type() {
                data_type = data_type.merge(t);
            }
        }

        ColumnStatistics {
            non_null_count: total - null_count,
            null_count,
            null_percentage: null_count as f64 / total as f64 * 100.0,
            unique_count: distinct.len(),
            sample_values,
            data_type,
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of distinct non-null values.
pub fn distinct_count<'a, I>(values: I) -> usize
where
    I: IntoIterator<Item = &'a ScalarValue>,
{
    values
        .into_iter()
        .filter_map(ScalarValue::key)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of distinct rows over the given column positions.
///
/// Missing cells compare equal to each other, so two rows that are both empty
/// in the same places and agree elsewhere are the same row. Cells beyond the
/// end of a short row read as missing.
pub fn distinct_row_count(table: &DataTable, columns: &[usize]) -> usize {
    let mut seen: HashSet<Vec<Option<ValueKey<'_>>>> = HashSet::with_capacity(table.row_count());

    for row in &table.rows {
        let key = columns
            .iter()
            .map(|&col| row.get(col).and_then(ScalarValue::key))
            .collect();
        seen.insert(key);
    }

    seen.len()
}

/// Resolve column names to positions.
pub fn column_positions(table: &DataTable, names: &[String]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| DibieError::ColumnNotFound(name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::from_strings(headers, rows, true)
    }

    #[test]
    fn test_null_counts_and_percentage() {
        let table = make_table(
            vec!["monto"],
            vec![vec!["1"], vec!["NA"], vec!["3"], vec![""], vec!["5"]],
        );
        let stats = ColumnProfiler::new().profile_column(&table, 0).unwrap();

        assert_eq!(stats.null_count, 2);
        assert_eq!(stats.non_null_count, 3);
        assert!((stats.null_percentage - 40.0).abs() < 1e-9);
        assert_eq!(stats.data_type, ColumnType::Integer);
    }

    #[test]
    fn test_samples_follow_row_order() {
        let table = make_table(
            vec!["municipio"],
            vec![vec!["Pasto"], vec![""], vec!["Cali"], vec!["Pasto"], vec!["Tunja"]],
        );
        let stats = ColumnProfiler::new().profile_column(&table, 0).unwrap();

        assert_eq!(
            stats.sample_values,
            vec![
                ScalarValue::from("Pasto"),
                ScalarValue::from("Cali"),
                ScalarValue::from("Pasto"),
            ]
        );
        assert_eq!(stats.unique_count, 3);
    }

    #[test]
    fn test_integral_reals_are_not_distinct_from_integers() {
        let table = DataTable::new(
            vec!["valor".to_string()],
            vec![
                vec![ScalarValue::Integer(1)],
                vec![ScalarValue::Real(1.0)],
                vec![ScalarValue::Real(f64::NAN)],
            ],
        );
        let stats = ColumnProfiler::new().profile_column(&table, 0).unwrap();

        assert_eq!(stats.unique_count, 1);
        assert_eq!(stats.null_count, 1);
        assert_eq!(stats.data_type, ColumnType::Float);
    }

    #[test]
    fn test_empty_table_is_invalid() {
        let table = make_table(vec!["a"], vec![]);
        let result = ColumnProfiler::new().profile_column(&table, 0);
        assert!(matches!(result, Err(DibieError::InvalidInput { .. })));
    }

    #[test]
    fn test_distinct_rows_treat_nulls_as_equal() {
        let table = make_table(
            vec!["a", "b"],
            vec![vec!["1", ""], vec!["1", "NA"], vec!["2", "x"], vec!["1", "x"]],
        );
        assert_eq!(distinct_row_count(&table, &[0, 1]), 3);
        assert_eq!(distinct_row_count(&table, &[0]), 2);
        assert_eq!(distinct_row_count(&table, &[]), 1);
    }

    #[test]
    fn test_short_rows_read_as_missing() {
        let table = DataTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![ScalarValue::Integer(1)],
                vec![ScalarValue::Integer(1), ScalarValue::Null],
            ],
        );
        assert_eq!(distinct_row_count(&table, &[0, 1]), 1);
    }

    #[test]
    fn test_column_positions() {
        let table = make_table(vec!["a", "b"], vec![]);
        assert_eq!(
            column_positions(&table, &["b".to_string(), "a".to_string()]).unwrap(),
            vec![1, 0]
        );
        assert!(matches!(
            column_positions(&table, &["c".to_string()]),
            Err(DibieError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_distinct_count() {
        let values = [
            ScalarValue::from("a"),
            ScalarValue::Null,
            ScalarValue::from("a"),
            ScalarValue::Integer(2),
        ];
        assert_eq!(distinct_count(values.iter()), 2);
    }
}
