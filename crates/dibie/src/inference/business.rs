//! Business type classification from column names.

use once_cell::sync::Lazy;

use super::keywords::KeywordTable;
use crate::error::Result;
use crate::schema::BusinessType;

/// Keyword groups for per-column business types, in priority order.
pub const BUSINESS_KEYWORDS: &[(BusinessType, &[&str])] = &[
    (BusinessType::Identifier, &["id", "codigo", "dane", "nit"]),
    (BusinessType::Name, &["nombre", "name", "denominacion"]),
    (
        BusinessType::Location,
        &["direccion", "address", "municipio", "departamento", "ciudad"],
    ),
    (
        BusinessType::Coordinate,
        &["latitud", "longitud", "lat", "lon", "coordenada"],
    ),
    (
        BusinessType::Financial,
        &["monto", "valor", "presupuesto", "ingresos", "egresos", "saldo"],
    ),
    (
        BusinessType::Temporal,
        &["fecha", "date", "año", "mes", "vigencia"],
    ),
    (BusinessType::Quantity, &["cantidad", "numero", "total", "count"]),
];

static DEFAULT_TABLE: Lazy<KeywordTable<BusinessType>> = Lazy::new(|| {
    KeywordTable::from_entries(BUSINESS_KEYWORDS.iter().map(|(t, k)| (*t, k.iter())))
        .expect("built-in business keywords compile")
});

/// Maps a column name to a [`BusinessType`].
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    table: KeywordTable<BusinessType>,
}

impl ColumnClassifier {
    /// Classifier over [`BUSINESS_KEYWORDS`].
    pub fn new() -> Self {
        Self {
            table: DEFAULT_TABLE.clone(),
        }
    }

    /// Classifier over a custom keyword table, tested in the given order.
    pub fn with_keywords<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BusinessType, K)>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Ok(Self {
            table: KeywordTable::from_entries(entries)?,
        })
    }

    /// Classify a column by name. Total: unmatched or blank names are `Other`.
    pub fn classify(&self, column_name: &str) -> BusinessType {
        if column_name.trim().is_empty() {
            return BusinessType::Other;
        }

        let business_type = self.table.lookup(column_name).unwrap_or(BusinessType::Other);
        tracing::debug!(column = column_name, %business_type, "Classified column");
        business_type
    }
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new()
    }
}
