//! Atomic table proposals derived from entity grouping.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::inference::{distinct_count, distinct_row_count, is_key_like, EntityClassifier, EntityGroups};
use crate::input::DataTable;
use crate::schema::EntityGroup;

pub const MASTER_TABLE: &str = "maestro_instituciones";
pub const LOCATION_TABLE: &str = "ubicacion_geografica";
pub const FACT_TABLE: &str = "hechos_financieros";
pub const TIME_TABLE: &str = "dim_tiempo";

const INSTITUTION_KEY: &str = "institucion_id";
const TIME_KEY: &str = "fecha_id";

/// Role of a proposed table in the normalized layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// One row per institution.
    Master,
    /// Geographic attributes of institutions.
    Location,
    /// One row per source record.
    FactTable,
    /// Distinct values of one or more attributes.
    Dimension,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableKind::Master => "master",
            TableKind::Location => "location",
            TableKind::FactTable => "fact_table",
            TableKind::Dimension => "dimension",
        };
        f.write_str(s)
    }
}

/// A declared reference from a column of one table to another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub references: String,
}

impl ForeignKey {
    fn new(column: &str, references: &str) -> Self {
        Self {
            column: column.to_string(),
            references: references.to_string(),
        }
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (references {})", self.column, self.references)
    }
}

/// One proposed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedTable {
    pub description: String,
    /// Source columns, in source order.
    pub columns: Vec<String>,
    #[serde(rename = "type")]
    pub kind: TableKind,
    /// Only set on the master table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key_candidates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
    pub estimated_rows: usize,
}

/// Proposed table name to table, in proposal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomicTableProposal {
    pub tables: IndexMap<String, ProposedTable>,
}

impl AtomicTableProposal {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProposedTable> {
        self.tables.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProposedTable)> {
        self.tables.iter()
    }

    /// Names of dimension tables.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .filter(|(_, t)| t.kind == TableKind::Dimension)
            .map(|(name, _)| name.as_str())
    }
}

/// Proposes a normalized table layout for a table.
#[derive(Debug, Clone, Default)]
pub struct AtomicTableProposer {
    classifier: EntityClassifier,
}

impl AtomicTableProposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different entity classifier.
    pub fn with_classifier(classifier: EntityClassifier) -> Self {
        Self { classifier }
    }

    /// Group the table's columns by entity.
    pub fn group_columns(&self, table: &DataTable) -> EntityGroups {
        self.classifier
            .group_columns(table.headers.iter().map(String::as_str))
    }

    /// Propose tables for `table`. A table without columns yields an empty proposal.
    pub fn propose(&self, table: &DataTable) -> AtomicTableProposal {
        let groups = self.group_columns(table);
        self.propose_from_groups(table, &groups)
    }

    /// Propose tables from an existing grouping of `table`'s columns.
    pub fn propose_from_groups(&self, table: &DataTable, groups: &EntityGroups) -> AtomicTableProposal {
        let mut proposal = AtomicTableProposal::default();

        for (group, columns) in groups {
            match group {
                EntityGroup::Instituciones => {
                    let keys: Vec<String> =
                        columns.iter().filter(|c| is_key_like(c)).cloned().collect();
                    proposal.tables.insert(
                        MASTER_TABLE.to_string(),
                        ProposedTable {
                            description: "Master table of educational institutions".to_string(),
                            columns: columns.clone(),
                            kind: TableKind::Master,
                            primary_key_candidates: Some(keys),
                            foreign_keys: Vec::new(),
                            estimated_rows: distinct_rows(table, columns),
                        },
                    );
                }
                EntityGroup::Ubicacion => {
                    proposal.tables.insert(
                        LOCATION_TABLE.to_string(),
                        ProposedTable {
                            description: "Geographic location of institutions".to_string(),
                            columns: columns.clone(),
                            kind: TableKind::Location,
                            primary_key_candidates: None,
                            foreign_keys: vec![ForeignKey::new(INSTITUTION_KEY, MASTER_TABLE)],
                            estimated_rows: distinct_rows(table, columns),
                        },
                    );
                }
                EntityGroup::Financiero => {
                    proposal.tables.insert(
                        FACT_TABLE.to_string(),
                        ProposedTable {
                            description: "Financial transactions and allocations".to_string(),
                            columns: columns.clone(),
                            kind: TableKind::FactTable,
                            primary_key_candidates: None,
                            foreign_keys: vec![
                                ForeignKey::new(INSTITUTION_KEY, MASTER_TABLE),
                                ForeignKey::new(TIME_KEY, TIME_TABLE),
                            ],
                            estimated_rows: table.row_count(),
                        },
                    );
                }
                EntityGroup::Temporal => {
                    proposal.tables.insert(
                        TIME_TABLE.to_string(),
                        ProposedTable {
                            description: "Time dimension for temporal analysis".to_string(),
                            columns: columns.clone(),
                            kind: TableKind::Dimension,
                            primary_key_candidates: None,
                            foreign_keys: Vec::new(),
                            estimated_rows: distinct_rows(table, columns),
                        },
                    );
                }
                EntityGroup::Categorias => {
                    for column in columns {
                        let name = unique_table_name(&proposal, &dimension_name(column));
                        let estimated_rows = table
                            .column_index(column)
                            .map(|idx| distinct_count(table.column_lenient(idx)))
                            .unwrap_or(0);
                        proposal.tables.insert(
                            name,
                            ProposedTable {
                                description: format!("Dimension of {}", column),
                                columns: vec![column.clone()],
                                kind: TableKind::Dimension,
                                primary_key_candidates: None,
                                foreign_keys: Vec::new(),
                                estimated_rows,
                            },
                        );
                    }
                }
                EntityGroup::Otros => {}
            }
        }

        tracing::info!(tables = proposal.len(), "Proposed atomic tables");
        proposal
    }
}

fn distinct_rows(table: &DataTable, columns: &[String]) -> usize {
    let positions: Vec<usize> = columns.iter().filter_map(|c| table.column_index(c)).collect();
    if positions.is_empty() {
        return 0;
    }
    distinct_row_count(table, &positions)
}

/// `dim_` + the column name, lower-cased with spaces as underscores.
pub fn dimension_name(column: &str) -> String {
    format!("dim_{}", column.trim().to_lowercase().replace(' ', "_"))
}

fn unique_table_name(proposal: &AtomicTableProposal, base: &str) -> String {
    if !proposal.tables.contains_key(base) {
        return base.to_string();
    }
    let taken: HashSet<&str> = proposal.tables.keys().map(String::as_str).collect();
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken.contains(candidate.as_str()) {
            tracing::warn!(table = base, renamed = %candidate, "Dimension table name collision");
            return candidate;
        }
        n += 1;
    }
}
