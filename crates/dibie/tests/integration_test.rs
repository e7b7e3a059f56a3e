//! Integration tests for Dibie.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use dibie::normalize::{TableKind, FACT_TABLE, LOCATION_TABLE, MASTER_TABLE, TIME_TABLE};
use dibie::{
    group_columns_by_entity, BusinessType, CardinalityClass, Dibie, DibieConfig, DibieError,
    EntityGroup, QualityConfig, ScalarValue,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

// =============================================================================
// Master table scenario
// =============================================================================

#[test]
fn test_master_table_dictionary() {
    let result = Dibie::new()
        .analyze(fixture("tabla_maestra.csv"))
        .expect("Analysis failed");
    let dictionary = &result.dictionary;

    assert_eq!(dictionary.table_name, "tabla_maestra");
    assert_eq!(dictionary.total_rows, 100);
    assert_eq!(dictionary.total_columns, 5);

    let business = |name: &str| dictionary.column(name).unwrap().business_type;
    assert_eq!(business("dane_institucion"), BusinessType::Identifier);
    assert_eq!(business("municipio"), BusinessType::Location);
    assert_eq!(business("ingresos"), BusinessType::Financial);
    assert_eq!(business("fecha"), BusinessType::Temporal);
    // Business types know nothing about categories; entity grouping does.
    assert_eq!(business("tipo"), BusinessType::Other);

    let ingresos = dictionary.column("ingresos").unwrap();
    assert_eq!(ingresos.statistics.null_count, 30);
    assert_eq!(ingresos.statistics.null_percentage, 30.0);
    assert!(ingresos.nullable);

    let dane = dictionary.column("dane_institucion").unwrap();
    assert_eq!(dane.cardinality, CardinalityClass::Unique);
    assert_eq!(dane.statistics.sample_values[0], ScalarValue::from("05000"));

    let tipo = dictionary.column("tipo").unwrap();
    assert_eq!(tipo.cardinality, CardinalityClass::Low);
    assert_eq!(tipo.description, "Column 'tipo' - with 3 unique values");
}

#[test]
fn test_master_table_entity_groups() {
    let result = Dibie::new()
        .analyze(fixture("tabla_maestra.csv"))
        .expect("Analysis failed");

    assert_eq!(result.entity_groups[&EntityGroup::Categorias], vec!["tipo"]);
    assert_eq!(
        result.entity_groups.keys().copied().collect::<Vec<_>>(),
        vec![
            EntityGroup::Instituciones,
            EntityGroup::Ubicacion,
            EntityGroup::Financiero,
            EntityGroup::Temporal,
            EntityGroup::Categorias,
        ]
    );
}

#[test]
fn test_master_table_quality() {
    let result = Dibie::new()
        .analyze(fixture("tabla_maestra.csv"))
        .expect("Analysis failed");
    let quality = &result.quality;

    assert_eq!(quality.record_count, 100);
    assert_eq!(quality.completeness.missing_cells, 30);
    assert!((quality.completeness.overall_completeness_pct - 94.0).abs() < 1e-9);
    assert_eq!(quality.duplicates.duplicate_count, 0);
    assert_eq!(quality.quality_score, 96.4);
    assert_eq!(
        quality.recommendations,
        vec!["Column 'ingresos' has 30.0% missing values - consider imputation or removal"]
    );
}

#[test]
fn test_master_table_proposal() {
    let result = Dibie::new()
        .analyze(fixture("tabla_maestra.csv"))
        .expect("Analysis failed");
    let proposal = &result.proposal;

    assert_eq!(proposal.get(MASTER_TABLE).unwrap().estimated_rows, 100);
    assert_eq!(proposal.get(LOCATION_TABLE).unwrap().estimated_rows, 5);
    assert_eq!(proposal.get(FACT_TABLE).unwrap().estimated_rows, 100);
    assert_eq!(proposal.get(TIME_TABLE).unwrap().estimated_rows, 12);

    let tipo = proposal.get("dim_tipo").unwrap();
    assert_eq!(tipo.kind, TableKind::Dimension);
    assert_eq!(tipo.estimated_rows, 3);

    let sql = result.schema_sql();
    assert!(sql.contains("-- Generated from: tabla_maestra"));
    assert!(sql.contains("    dane_institucion VARCHAR(255)\n);"));
}

// =============================================================================
// Parsing edge cases
// =============================================================================

#[test]
fn test_tsv_auto_detect() {
    let content = "codigo\tmunicipio\tvalor\n\
                   001\tCali\t10\n\
                   002\tPasto\t20\n";
    let file = create_test_file(content);

    let result = Dibie::new().analyze(file.path()).expect("Analysis failed");
    let source = result.source.unwrap();
    assert_eq!(source.format, "tsv");
    assert_eq!(source.column_count, 3);
    assert!(source.hash.starts_with("sha256:"));
}

#[test]
fn test_duplicate_headers_are_renamed() {
    let content = "valor,valor,fecha\n1,2,2024\n3,4,2025\n";
    let file = create_test_file(content);

    let result = Dibie::new().analyze(file.path()).expect("Analysis failed");
    let names: Vec<&str> = result
        .dictionary
        .columns
        .iter()
        .map(|c| c.column_name.as_str())
        .collect();
    assert_eq!(names, vec!["valor", "valor_1", "fecha"]);
    assert_eq!(result.source.unwrap().renamed_headers, vec!["valor_1"]);
}

#[test]
fn test_header_only_file_is_invalid_input() {
    let file = create_test_file("dane,municipio\n");
    let result = Dibie::new().analyze(file.path());
    assert!(matches!(result, Err(DibieError::InvalidInput { .. })));
}

#[test]
fn test_missing_file() {
    let result = Dibie::new().analyze("/nonexistent/tabla.csv");
    assert!(matches!(result, Err(DibieError::Io { .. })));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_changes_thresholds() {
    let config = DibieConfig {
        quality: QualityConfig {
            missing_pct_threshold: 50.0,
            ..QualityConfig::default()
        },
        ..DibieConfig::default()
    };

    let result = Dibie::with_config(config)
        .analyze(fixture("tabla_maestra.csv"))
        .expect("Analysis failed");
    assert!(result.quality.is_clean());
}

#[test]
fn test_config_without_leading_zero_protection() {
    let mut config = DibieConfig::default();
    config.parser.keep_leading_zeros = false;

    let result = Dibie::with_config(config)
        .analyze(fixture("tabla_maestra.csv"))
        .expect("Analysis failed");
    let dane = result.dictionary.column("dane_institucion").unwrap();
    assert_eq!(dane.statistics.sample_values[0], ScalarValue::Integer(5000));
}

#[test]
fn test_group_columns_by_entity() {
    let groups = group_columns_by_entity(["observaciones", "vigencia", "colegio"]);
    assert_eq!(groups[&EntityGroup::Instituciones], vec!["colegio"]);
    assert_eq!(groups[&EntityGroup::Temporal], vec!["vigencia"]);
    assert_eq!(groups[&EntityGroup::Otros], vec!["observaciones"]);
}
