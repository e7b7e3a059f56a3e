//! Core type definitions for column classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage type summarized over a column's non-null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers, or integers mixed with floats.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Text values.
    String,
    /// Incompatible variants in the same column.
    Mixed,
    /// No non-null values.
    Empty,
}

impl ColumnType {
    /// Combine the summary so far with the type of one more cell.
    pub fn merge(self, other: ColumnType) -> ColumnType {
        use ColumnType::{Empty, Float, Integer, Mixed};
        match (self, other) {
            (Empty, t) | (t, Empty) => t,
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Mixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Mixed => "mixed",
            ColumnType::Empty => "empty",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Empty
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Semantic category of a column, inferred from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    /// Codes and keys (DANE code, NIT, ids).
    Identifier,
    /// Names and denominations.
    Name,
    /// Addresses, municipalities, departments.
    Location,
    /// Latitude/longitude.
    Coordinate,
    /// Amounts, budgets, income and expenses.
    Financial,
    /// Dates, years, months, fiscal periods.
    Temporal,
    /// Counts and totals.
    Quantity,
    /// Matches no keyword group.
    Other,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Identifier => "identifier",
            BusinessType::Name => "name",
            BusinessType::Location => "location",
            BusinessType::Coordinate => "coordinate",
            BusinessType::Financial => "financial",
            BusinessType::Temporal => "temporal",
            BusinessType::Quantity => "quantity",
            BusinessType::Other => "other",
        }
    }
}

impl Default for BusinessType {
    fn default() -> Self {
        BusinessType::Other
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How many distinct values a column has relative to its row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalityClass {
    /// Exactly one distinct value.
    #[serde(rename = "constant")]
    Constant,
    /// One distinct value per row.
    #[serde(rename = "unique (primary-key candidate)")]
    Unique,
    /// Distinct ratio above 0.95.
    #[serde(rename = "high (almost unique)")]
    AlmostUnique,
    /// Distinct ratio above 0.50.
    #[serde(rename = "high")]
    High,
    /// Distinct ratio above 0.10.
    #[serde(rename = "medium")]
    Medium,
    /// Everything else.
    #[serde(rename = "low (dimension candidate)")]
    Low,
}

impl CardinalityClass {
    pub fn label(&self) -> &'static str {
        match self {
            CardinalityClass::Constant => "constant",
            CardinalityClass::Unique => "unique (primary-key candidate)",
            CardinalityClass::AlmostUnique => "high (almost unique)",
            CardinalityClass::High => "high",
            CardinalityClass::Medium => "medium",
            CardinalityClass::Low => "low (dimension candidate)",
        }
    }

    /// Whether the column could serve as a primary key.
    pub fn is_key_candidate(&self) -> bool {
        matches!(self, CardinalityClass::Unique)
    }
}

impl fmt::Display for CardinalityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Table-design grouping of a column, used when proposing atomic tables.
///
/// Deliberately coarser than [`BusinessType`] and keyed by its own keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityGroup {
    /// Institution master data.
    Instituciones,
    /// Geographic location.
    Ubicacion,
    /// Financial measures.
    Financiero,
    /// Time attributes.
    Temporal,
    /// Classifications that become dimension tables.
    Categorias,
    /// Everything else.
    Otros,
}

impl EntityGroup {
    /// All groups in classification priority order.
    pub const ALL: [EntityGroup; 6] = [
        EntityGroup::Instituciones,
        EntityGroup::Ubicacion,
        EntityGroup::Financiero,
        EntityGroup::Temporal,
        EntityGroup::Categorias,
        EntityGroup::Otros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityGroup::Instituciones => "instituciones",
            EntityGroup::Ubicacion => "ubicacion",
            EntityGroup::Financiero => "financiero",
            EntityGroup::Temporal => "temporal",
            EntityGroup::Categorias => "categorias",
            EntityGroup::Otros => "otros",
        }
    }
}

impl fmt::Display for EntityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
