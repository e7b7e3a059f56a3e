//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use super::value::ScalarValue;
use crate::error::{DibieError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: char,
    /// Keep numeric-looking values with leading zeros (DANE codes) as text.
    pub keep_leading_zeros: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: '"',
            keep_leading_zeros: true,
        }
    }
}

impl ParserConfig {
    /// Check that delimiter and quote are single-byte characters.
    pub fn validate(&self) -> Result<()> {
        if let Some(d) = self.delimiter {
            ascii_byte(d, "delimiter")?;
        }
        ascii_byte(self.quote, "quote")?;
        Ok(())
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let io_err = |e| DibieError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents)?;
        let (table, renamed_headers) = self.parse_with_delimiter(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let mut source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );
        source.renamed_headers = renamed_headers;

        tracing::info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            format = %source.format,
            "Loaded table"
        );

        Ok((table, source))
    }

    /// Parse in-memory bytes, detecting the delimiter unless one is configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let delimiter = self.resolve_delimiter(bytes)?;
        Ok(self.parse_with_delimiter(bytes, delimiter)?.0)
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => ascii_byte(d, "delimiter"),
            None => detect_delimiter(bytes),
        }
    }

    fn parse_with_delimiter(&self, bytes: &[u8], delimiter: u8) -> Result<(DataTable, Vec<String>)> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let quote = ascii_byte(self.config.quote, "quote")?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.byte_records();

        let first = match records.next() {
            Some(record) => Some(decode(&record?)),
            None => None,
        };

        let (raw_headers, mut pending) = match first {
            None => return Err(DibieError::EmptyData("No columns found".to_string())),
            Some(first) if self.config.has_header => (first, None),
            Some(first) => (
                (0..first.len()).map(|i| format!("column_{}", i + 1)).collect(),
                Some(first),
            ),
        };

        if raw_headers.is_empty() {
            return Err(DibieError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = raw_headers.len();
        let mut rows = Vec::new();

        loop {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let mut row = match pending.take() {
                Some(row) => row,
                None => match records.next() {
                    Some(record) => decode(&record?),
                    None => break,
                },
            };

            // Pad short rows, truncate long ones
            row.resize(expected_cols, String::new());

            rows.push(
                row.iter()
                    .map(|cell| ScalarValue::parse(cell, self.config.keep_leading_zeros))
                    .collect(),
            );
        }

        let (headers, renamed) = super::source::disambiguate_headers(raw_headers);
        if !renamed.is_empty() {
            tracing::warn!(
                count = renamed.len(),
                renamed = ?renamed,
                "Renamed duplicate column headers"
            );
        }

        Ok((DataTable::new(headers, rows), renamed))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

fn ascii_byte(c: char, what: &str) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(DibieError::Config(format!(
            "{} must be a single-byte character, got {:?}",
            what, c
        )))
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DibieError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
