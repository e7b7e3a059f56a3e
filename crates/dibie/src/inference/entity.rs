//! Entity grouping of columns for table design.
//!
//! Uses its own keyword table, separate from the business type table: the
//! groups here decide which proposed table a column lands in, not what the
//! column means.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::keywords::KeywordTable;
use crate::error::Result;
use crate::schema::EntityGroup;

/// Keyword groups for entity grouping, in priority order. `Otros` is the fallback.
pub const ENTITY_KEYWORDS: &[(EntityGroup, &[&str])] = &[
    (
        EntityGroup::Instituciones,
        &[
            "institucion",
            "colegio",
            "iebm",
            "dane",
            "establecimiento",
            "nombre_ie",
            "razon_social",
            "tipo_institucion",
        ],
    ),
    (
        EntityGroup::Ubicacion,
        &[
            "direccion",
            "municipio",
            "departamento",
            "ciudad",
            "vereda",
            "latitud",
            "longitud",
            "zona",
            "barrio",
            "localidad",
        ],
    ),
    (
        EntityGroup::Financiero,
        &[
            "monto",
            "valor",
            "presupuesto",
            "ingresos",
            "egresos",
            "asignacion",
            "ejecutado",
            "saldo",
            "recurso",
            "transferencia",
        ],
    ),
    (
        EntityGroup::Temporal,
        &["fecha", "vigencia", "año", "mes", "periodo", "trimestre"],
    ),
    (
        EntityGroup::Categorias,
        &[
            "tipo",
            "categoria",
            "clasificacion",
            "sector",
            "nivel",
            "estado",
            "fuente",
            "rubro",
            "concepto",
        ],
    ),
];

/// Substrings marking an institution column as a primary key candidate.
pub const PRIMARY_KEY_KEYWORDS: &[&str] = &["id", "codigo", "dane"];

static DEFAULT_TABLE: Lazy<KeywordTable<EntityGroup>> = Lazy::new(|| {
    KeywordTable::from_entries(ENTITY_KEYWORDS.iter().map(|(g, k)| (*g, k.iter())))
        .expect("built-in entity keywords compile")
});

/// Columns grouped by entity, in [`EntityGroup::ALL`] order, empty groups omitted.
pub type EntityGroups = IndexMap<EntityGroup, Vec<String>>;

/// Assigns columns to entity groups.
#[derive(Debug, Clone)]
pub struct EntityClassifier {
    table: KeywordTable<EntityGroup>,
}

impl EntityClassifier {
    /// Classifier over [`ENTITY_KEYWORDS`].
    pub fn new() -> Self {
        Self {
            table: DEFAULT_TABLE.clone(),
        }
    }

    /// Classifier over a custom keyword table, tested in the given order.
    pub fn with_keywords<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EntityGroup, K)>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Ok(Self {
            table: KeywordTable::from_entries(entries)?,
        })
    }

    /// Entity group for one column name.
    pub fn classify(&self, column_name: &str) -> EntityGroup {
        if column_name.trim().is_empty() {
            return EntityGroup::Otros;
        }
        self.table.lookup(column_name).unwrap_or(EntityGroup::Otros)
    }

    /// Group column names by entity, keeping the original column order within a group.
    pub fn group_columns<'a, I>(&self, columns: I) -> EntityGroups
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut buckets: IndexMap<EntityGroup, Vec<String>> = EntityGroup::ALL
            .iter()
            .map(|g| (*g, Vec::new()))
            .collect();

        for column in columns {
            let group = self.classify(column);
            if let Some(bucket) = buckets.get_mut(&group) {
                bucket.push(column.to_string());
            }
        }

        buckets.retain(|_, cols| !cols.is_empty());
        tracing::debug!(groups = buckets.len(), "Grouped columns by entity");
        buckets
    }
}

impl Default for EntityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a column name looks like a key (contains an id/code keyword).
pub fn is_key_like(column_name: &str) -> bool {
    let lower = column_name.to_lowercase();
    PRIMARY_KEY_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_columns() {
        let classifier = EntityClassifier::new();
        assert_eq!(classifier.classify("dane_institucion"), EntityGroup::Instituciones);
        assert_eq!(classifier.classify("municipio"), EntityGroup::Ubicacion);
        assert_eq!(classifier.classify("ingresos"), EntityGroup::Financiero);
        assert_eq!(classifier.classify("fecha"), EntityGroup::Temporal);
        assert_eq!(classifier.classify("tipo"), EntityGroup::Categorias);
        assert_eq!(classifier.classify("observaciones"), EntityGroup::Otros);
    }

    #[test]
    fn test_institution_keywords_win() {
        let classifier = EntityClassifier::new();
        // "tipo_institucion" is an institution attribute, not a category
        assert_eq!(classifier.classify("tipo_institucion"), EntityGroup::Instituciones);
        assert_eq!(classifier.classify("Valor Transferencia"), EntityGroup::Financiero);
        assert_eq!(classifier.classify("Periodo"), EntityGroup::Temporal);
    }

    #[test]
    fn test_group_columns_orders_and_omits_empty() {
        let classifier = EntityClassifier::new();
        let groups = classifier.group_columns(
            ["tipo", "monto", "codigo_dane", "nivel", "municipio"].into_iter(),
        );

        let keys: Vec<EntityGroup> = groups.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                EntityGroup::Instituciones,
                EntityGroup::Ubicacion,
                EntityGroup::Financiero,
                EntityGroup::Categorias,
            ]
        );
        assert_eq!(groups[&EntityGroup::Categorias], vec!["tipo", "nivel"]);
    }

    #[test]
    fn test_no_columns_no_groups() {
        let classifier = EntityClassifier::new();
        assert!(classifier.group_columns(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_key_like_names() {
        assert!(is_key_like("codigo_dane"));
        assert!(is_key_like("ID_Colegio"));
        assert!(!is_key_like("nombre_colegio"));
    }
}
