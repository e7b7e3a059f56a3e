//! Data source abstraction and metadata.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value::ScalarValue;
use crate::error::{DibieError, Result};

static MISSING: ScalarValue = ScalarValue::Null;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Header names that were renamed to make them unique.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renamed_headers: Vec<String>,
    /// When the file was loaded.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            renamed_headers: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    /// Dataset label derived from the file name (stem without extension).
    pub fn dataset_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone())
    }
}

/// An in-memory table: ordered, uniquely named columns over typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<ScalarValue>>,
}

impl DataTable {
    /// Create a table from headers and typed rows as given.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<ScalarValue>>) -> Self {
        Self { headers, rows }
    }

    /// Create a table from raw headers, making duplicate or blank names unique first.
    pub fn from_raw(headers: Vec<String>, rows: Vec<Vec<ScalarValue>>) -> Self {
        let (headers, renamed) = disambiguate_headers(headers);
        if !renamed.is_empty() {
            tracing::warn!(
                count = renamed.len(),
                renamed = ?renamed,
                "Renamed duplicate column headers"
            );
        }
        Self { headers, rows }
    }

    /// Create a table from raw string cells, typing every cell once.
    pub fn from_strings<H, R, C>(headers: H, rows: R, keep_leading_zeros: bool) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let headers = headers.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| ScalarValue::parse(cell.as_ref(), keep_leading_zeros))
                    .collect()
            })
            .collect();
        Self::from_raw(headers, rows)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    ///
    /// Fails with [`DibieError::ColumnFailure`] if any row is too short to hold the column.
    pub fn column(&self, index: usize) -> Result<Vec<&ScalarValue>> {
        let name = self
            .headers
            .get(index)
            .ok_or_else(|| DibieError::ColumnNotFound(format!("#{}", index)))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row.get(index).ok_or_else(|| DibieError::ColumnFailure {
                    column: name.clone(),
                    message: format!("row {} has only {} cells", row_idx + 1, row.len()),
                })
            })
            .collect()
    }

    /// Get all values for a column by index, reading cells past the end of a short row as missing.
    pub fn column_lenient(&self, index: usize) -> Vec<&ScalarValue> {
        self.rows
            .iter()
            .map(|row| row.get(index).unwrap_or(&MISSING))
            .collect()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&ScalarValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Make header names unique.
///
/// Blank names become `column_<n>` (1-based position). The second and later
/// occurrences of a name get `_1`, `_2`, ... appended, skipping any suffix that
/// would collide with another header. Returns the unique headers and the
/// resulting names of every renamed header.
pub fn disambiguate_headers(raw: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut taken: HashSet<String> = raw.iter().cloned().collect();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    let mut renamed = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let name = if name.trim().is_empty() {
            let generated = format!("column_{}", idx + 1);
            taken.insert(generated.clone());
            generated
        } else {
            name
        };

        match next_suffix.get(&name).copied() {
            None => {
                next_suffix.insert(name.clone(), 1);
                headers.push(name);
            }
            Some(mut suffix) => {
                let mut candidate = format!("{}_{}", name, suffix);
                while taken.contains(&candidate) {
                    suffix += 1;
                    candidate = format!("{}_{}", name, suffix);
                }
                next_suffix.insert(name, suffix + 1);
                taken.insert(candidate.clone());
                renamed.push(candidate.clone());
                headers.push(candidate);
            }
        }
    }

    (headers, renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        disambiguate_headers(raw.iter().map(|s| s.to_string()).collect()).0
    }

    #[test]
    fn test_duplicate_headers_get_suffixes() {
        assert_eq!(
            names(&["valor", "fecha", "valor", "valor"]),
            vec!["valor", "fecha", "valor_1", "valor_2"]
        );
    }

    #[test]
    fn test_suffix_skips_existing_names() {
        assert_eq!(names(&["a", "a", "a_1"]), vec!["a", "a_2", "a_1"]);
    }

    #[test]
    fn test_blank_headers_are_named() {
        assert_eq!(names(&["id", "", " "]), vec!["id", "column_2", "column_3"]);
    }

    #[test]
    fn test_column_reports_short_rows() {
        let table = DataTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![ScalarValue::Integer(1), ScalarValue::Integer(2)],
                vec![ScalarValue::Integer(3)],
            ],
        );

        assert_eq!(table.column(0).unwrap().len(), 2);
        assert_eq!(table.column_lenient(1)[1], &ScalarValue::Null);
        match table.column(1) {
            Err(DibieError::ColumnFailure { column, message }) => {
                assert_eq!(column, "b");
                assert!(message.contains("row 2"));
            }
            other => panic!("expected column failure, got {:?}", other),
        }
    }

    #[test]
    fn test_from_strings_types_cells() {
        let table = DataTable::from_strings(
            ["codigo", "monto"],
            vec![vec!["0501", "100"], vec!["0502", ""]],
            true,
        );
        assert_eq!(table.get(0, 0), Some(&ScalarValue::from("0501")));
        assert_eq!(table.get(0, 1), Some(&ScalarValue::Integer(100)));
        assert_eq!(table.get(1, 1), Some(&ScalarValue::Null));
    }
}
