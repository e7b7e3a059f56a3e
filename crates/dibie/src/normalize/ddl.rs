//! SQL DDL rendering for table proposals.
//!
//! Every column is typed `VARCHAR(255)`: the proposal carries no storage types.

use once_cell::sync::Lazy;
use regex::Regex;

use super::proposal::AtomicTableProposal;
use crate::input::disambiguate_headers;

const COLUMN_TYPE: &str = "VARCHAR(255)";

static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("identifier pattern compiles"));

/// Renders an [`AtomicTableProposal`] as a SQL script.
pub struct SchemaDdl;

impl SchemaDdl {
    /// Render `CREATE TABLE` statements for every proposed table.
    ///
    /// Foreign keys and primary key candidates are emitted as comments since the
    /// referenced key columns do not exist in the source data.
    pub fn render(proposal: &AtomicTableProposal, source_name: &str) -> String {
        let mut lines = vec![
            "-- DIBIE database schema".to_string(),
            format!("-- Generated from: {}", source_name),
            format!("-- {}", "=".repeat(60)),
            String::new(),
        ];

        for (name, table) in proposal.iter() {
            lines.push(format!("-- {}", table.description));
            lines.push(format!("CREATE TABLE {} (", sql_identifier(name)));

            let (columns, _) = disambiguate_headers(table.columns.iter().map(|c| normalize_column(c)).collect());
            let last = columns.len().saturating_sub(1);
            for (i, column) in columns.iter().enumerate() {
                let separator = if i < last { "," } else { "" };
                lines.push(format!("    {} {}{}", sql_identifier(column), COLUMN_TYPE, separator));
            }
            lines.push(");".to_string());

            if let Some(keys) = table.primary_key_candidates.as_ref().filter(|k| !k.is_empty()) {
                let keys: Vec<String> = keys.iter().map(|k| sql_identifier(&normalize_column(k))).collect();
                lines.push(format!("-- Primary key candidates: {}", keys.join(", ")));
            }
            for fk in &table.foreign_keys {
                lines.push(format!(
                    "-- FOREIGN KEY ({}) REFERENCES {}",
                    sql_identifier(&fk.column),
                    sql_identifier(&fk.references)
                ));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// Lower-case a source column name and replace spaces with underscores.
pub fn normalize_column(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

/// Quote `name` unless it is a plain lower-case identifier.
fn sql_identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
