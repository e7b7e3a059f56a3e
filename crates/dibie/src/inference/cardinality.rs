//! Cardinality classification from distinct-value ratios.

use crate::error::{DibieError, Result};
use crate::schema::CardinalityClass;

const ALMOST_UNIQUE_RATIO: f64 = 0.95;
const HIGH_RATIO: f64 = 0.50;
const MEDIUM_RATIO: f64 = 0.10;

/// Classify `unique_count` distinct values over `total_rows` rows.
///
/// Rules are checked in order: a single distinct value is `Constant` even when
/// the table has a single row.
///
/// # Errors
///
/// [`DibieError::InvalidInput`] when `total_rows` is zero.
pub fn classify_cardinality(unique_count: usize, total_rows: usize) -> Result<CardinalityClass> {
    if total_rows == 0 {
        return Err(DibieError::invalid_input(
            "cardinality ratio",
            format!("{} unique values over 0 rows", unique_count),
        ));
    }

    let ratio = unique_count as f64 / total_rows as f64;

    let class = if unique_count == 1 {
        CardinalityClass::Constant
    } else if unique_count == total_rows {
        CardinalityClass::Unique
    } else if ratio > ALMOST_UNIQUE_RATIO {
        CardinalityClass::AlmostUnique
    } else if ratio > HIGH_RATIO {
        CardinalityClass::High
    } else if ratio > MEDIUM_RATIO {
        CardinalityClass::Medium
    } else {
        CardinalityClass::Low
    };

    tracing::trace!(unique_count, total_rows, ratio, class = %class, "Classified cardinality");
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_beats_unique() {
        assert_eq!(classify_cardinality(1, 1).unwrap(), CardinalityClass::Constant);
        assert_eq!(classify_cardinality(1, 500).unwrap(), CardinalityClass::Constant);
    }

    #[test]
    fn test_unique() {
        assert_eq!(classify_cardinality(2, 2).unwrap(), CardinalityClass::Unique);
        assert_eq!(classify_cardinality(100, 100).unwrap(), CardinalityClass::Unique);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(classify_cardinality(96, 100).unwrap(), CardinalityClass::AlmostUnique);
        assert_eq!(classify_cardinality(95, 100).unwrap(), CardinalityClass::High);
        assert_eq!(classify_cardinality(51, 100).unwrap(), CardinalityClass::High);
        assert_eq!(classify_cardinality(50, 100).unwrap(), CardinalityClass::Medium);
        assert_eq!(classify_cardinality(11, 100).unwrap(), CardinalityClass::Medium);
        assert_eq!(classify_cardinality(10, 100).unwrap(), CardinalityClass::Low);
        assert_eq!(classify_cardinality(0, 100).unwrap(), CardinalityClass::Low);
    }

    #[test]
    fn test_zero_rows_is_invalid() {
        match classify_cardinality(0, 0) {
            Err(DibieError::InvalidInput { context, .. }) => {
                assert_eq!(context, "cardinality ratio");
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert!(classify_cardinality(1, 0).is_err());
    }
}
