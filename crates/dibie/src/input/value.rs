//! Cell values as a closed set of scalar variants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::ColumnType;

/// A single cell, typed once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Missing value.
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

/// Canonical form of a non-null value, used for distinctness and duplicate detection.
///
/// An integral `Real` maps onto the same key as the equal `Integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Bool(bool),
    Integer(i64),
    Real(u64),
    Text(&'a str),
}

impl ScalarValue {
    /// Parse a raw cell. Surrounding whitespace is dropped.
    ///
    /// Only finite numbers become reals, so `Inf` and `infinity` stay text.
    /// With `keep_leading_zeros`, numeric-looking strings such as `05001` stay text
    /// so that institution and municipality codes are not truncated.
    pub fn parse(raw: &str, keep_leading_zeros: bool) -> Self {
        let trimmed = raw.trim();
        if Self::is_null_token(trimmed) {
            return ScalarValue::Null;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return ScalarValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return ScalarValue::Bool(false);
        }

        if keep_leading_zeros && has_leading_zero(trimmed) {
            return ScalarValue::Text(trimmed.to_string());
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return ScalarValue::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => ScalarValue::Real(f),
            _ => ScalarValue::Text(trimmed.to_string()),
        }
    }

    /// Check if a raw string represents a missing value.
    pub fn is_null_token(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed == "."
            || trimmed == "-"
    }

    /// Whether the cell is missing. A NaN real counts as missing.
    pub fn is_null(&self) -> bool {
        match self {
            ScalarValue::Null => true,
            ScalarValue::Real(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Canonical key for equality, or `None` for missing cells.
    pub fn key(&self) -> Option<ValueKey<'_>> {
        match self {
            ScalarValue::Null => None,
            ScalarValue::Bool(b) => Some(ValueKey::Bool(*b)),
            ScalarValue::Integer(i) => Some(ValueKey::Integer(*i)),
            ScalarValue::Real(f) if f.is_nan() => None,
            ScalarValue::Real(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(ValueKey::Integer(*f as i64))
                } else {
                    Some(ValueKey::Real(f.to_bits()))
                }
            }
            ScalarValue::Text(s) => Some(ValueKey::Text(s.as_str())),
        }
    }

    /// The storage type of this cell, or `None` when missing.
    pub fn column_type(&self) -> Option<ColumnType> {
        if self.is_null() {
            return None;
        }
        Some(match self {
            ScalarValue::Bool(_) => ColumnType::Boolean,
            ScalarValue::Integer(_) => ColumnType::Integer,
            ScalarValue::Real(_) => ColumnType::Float,
            _ => ColumnType::String,
        })
    }
}

impl Default for ScalarValue {
    fn default() -> Self {
        ScalarValue::Null
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Real(r) => write!(f, "{}", r),
            ScalarValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Integer(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Real(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ScalarValue::Null)
    }
}

fn has_leading_zero(trimmed: &str) -> bool {
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    let mut chars = digits.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('0'), Some(c)) if c.is_ascii_digit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(ScalarValue::parse("42", true), ScalarValue::Integer(42));
        assert_eq!(ScalarValue::parse(" -7 ", true), ScalarValue::Integer(-7));
        assert_eq!(ScalarValue::parse("3.5", true), ScalarValue::Real(3.5));
        assert_eq!(ScalarValue::parse("TRUE", true), ScalarValue::Bool(true));
        assert_eq!(ScalarValue::parse("false", true), ScalarValue::Bool(false));
        assert_eq!(ScalarValue::parse("Bogotá", true), ScalarValue::from("Bogotá"));
        assert_eq!(ScalarValue::parse("Inf", true), ScalarValue::from("Inf"));
        assert_eq!(ScalarValue::parse("-infinity", true), ScalarValue::from("-infinity"));
        assert_eq!(ScalarValue::parse("+INF", false), ScalarValue::from("+INF"));
        assert_eq!(ScalarValue::parse("1e400", true), ScalarValue::from("1e400"));
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(ScalarValue::parse("  Cali ", true), ScalarValue::from("Cali"));
        assert_eq!(ScalarValue::parse(" 0501 ", true), ScalarValue::from("0501"));
        assert_eq!(
            ScalarValue::parse("Cali ", true).key(),
            ScalarValue::parse("Cali", true).key()
        );
    }

    #[test]
    fn test_null_tokens() {
        for token in ["", "  ", "NA", "n/a", "NULL", "None", "nil", "NaN", ".", "-"] {
            assert_eq!(ScalarValue::parse(token, true), ScalarValue::Null, "{token:?}");
        }
        assert!(!ScalarValue::is_null_token("0"));
        assert!(!ScalarValue::is_null_token("value"));
    }

    #[test]
    fn test_leading_zero_codes_stay_text() {
        assert_eq!(ScalarValue::parse("05001", true), ScalarValue::from("05001"));
        assert_eq!(ScalarValue::parse("05001", false), ScalarValue::Integer(5001));
        assert_eq!(ScalarValue::parse("0", true), ScalarValue::Integer(0));
        assert_eq!(ScalarValue::parse("0.25", true), ScalarValue::Real(0.25));
    }

    #[test]
    fn test_nan_is_missing() {
        let nan = ScalarValue::Real(f64::NAN);
        assert!(nan.is_null());
        assert_eq!(nan.key(), None);
        assert_eq!(nan.column_type(), None);
    }

    #[test]
    fn test_integral_real_matches_integer() {
        assert_eq!(ScalarValue::Real(1.0).key(), ScalarValue::Integer(1).key());
        assert_eq!(ScalarValue::Real(-0.0).key(), ScalarValue::Integer(0).key());
        assert_ne!(ScalarValue::Real(1.5).key(), ScalarValue::Integer(1).key());
        assert_ne!(ScalarValue::from("1").key(), ScalarValue::Integer(1).key());
    }

    #[test]
    fn test_json_shape() {
        let values = vec![
            ScalarValue::Null,
            ScalarValue::Bool(true),
            ScalarValue::Integer(3),
            ScalarValue::Real(2.5),
            ScalarValue::from("x"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,3,2.5,"x"]"#);
        let back: Vec<ScalarValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
