//! Main Dibie struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DibieConfig;
use crate::dictionary::{DataDictionary, DataDictionaryBuilder};
use crate::error::Result;
use crate::inference::EntityGroups;
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::normalize::{AtomicTableProposal, AtomicTableProposer, SchemaDdl};
use crate::quality::{QualityReport, QualityReportBuilder};

/// Everything produced for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file, absent for in-memory tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub dictionary: DataDictionary,
    pub quality: QualityReport,
    pub entity_groups: EntityGroups,
    pub proposal: AtomicTableProposal,
}

impl AnalysisResult {
    /// SQL script for the proposed tables.
    pub fn schema_sql(&self) -> String {
        SchemaDdl::render(&self.proposal, &self.dictionary.table_name)
    }
}

/// The main analysis engine.
pub struct Dibie {
    config: DibieConfig,
    parser: Parser,
    dictionary: DataDictionaryBuilder,
    quality: QualityReportBuilder,
    proposer: AtomicTableProposer,
}

impl Dibie {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(DibieConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: DibieConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let dictionary = DataDictionaryBuilder::with_config(&config.dictionary);
        let quality = QualityReportBuilder::with_config(config.quality.clone());

        Self {
            config,
            parser,
            dictionary,
            quality,
            proposer: AtomicTableProposer::new(),
        }
    }

    pub fn config(&self) -> &DibieConfig {
        &self.config
    }

    /// Parse a data file into a table.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Parse and analyze a data file. The dataset is named after the file stem.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (table, source) = self.load(path)?;
        let name = source.dataset_name();

        let mut result = self.analyze_table(&table, &name)?;
        result.source = Some(source);
        Ok(result)
    }

    /// Analyze a table that is already in memory.
    pub fn analyze_table(&self, table: &DataTable, name: &str) -> Result<AnalysisResult> {
        let dictionary = self.data_dictionary(table, name)?;
        let quality = self.quality_report(table, name)?;
        let entity_groups = self.group_columns(table);
        let proposal = self.proposer.propose_from_groups(table, &entity_groups);

        tracing::info!(
            dataset = name,
            columns = dictionary.total_columns,
            score = quality.quality_score,
            tables = proposal.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            source: None,
            dictionary,
            quality,
            entity_groups,
            proposal,
        })
    }

    pub fn data_dictionary(&self, table: &DataTable, name: &str) -> Result<DataDictionary> {
        self.dictionary.build(table, name)
    }

    pub fn quality_report(&self, table: &DataTable, name: &str) -> Result<QualityReport> {
        self.quality.build(table, name)
    }

    pub fn propose(&self, table: &DataTable) -> AtomicTableProposal {
        self.proposer.propose(table)
    }

    pub fn group_columns(&self, table: &DataTable) -> EntityGroups {
        self.proposer.group_columns(table)
    }
}

impl Default for Dibie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::error::DibieError;
    use crate::schema::{BusinessType, EntityGroup};

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analyze_simple_csv() {
        let content = "codigo_dane,municipio,valor\n05001,Medellín,100\n05002,Bello,200\n05002,Bello,200\n";
        let file = create_test_file(content);

        let result = Dibie::new().analyze(file.path()).unwrap();
        let source = result.source.as_ref().unwrap();

        assert_eq!(source.row_count, 3);
        assert_eq!(result.dictionary.total_columns, 3);
        assert_eq!(result.dictionary.table_name, source.dataset_name());
        assert_eq!(
            result.dictionary.column("valor").unwrap().business_type,
            BusinessType::Financial
        );
        assert_eq!(result.quality.duplicates.duplicate_count, 1);
        assert_eq!(result.entity_groups.len(), 3);
        assert_eq!(result.proposal.len(), 3);
        assert!(result.schema_sql().contains("CREATE TABLE hechos_financieros ("));
    }

    #[test]
    fn test_analyze_table_in_memory() {
        let table = DataTable::from_strings(
            vec!["fecha", "tipo"],
            vec![vec!["2024-01-01", "A"], vec!["2024-01-02", "B"]],
            true,
        );
        let result = Dibie::new().analyze_table(&table, "memoria").unwrap();

        assert!(result.source.is_none());
        assert_eq!(result.quality.dataset_name, "memoria");
        assert_eq!(
            result.entity_groups.keys().copied().collect::<Vec<_>>(),
            vec![EntityGroup::Temporal, EntityGroup::Categorias]
        );
    }

    #[test]
    fn test_header_only_file_is_rejected() {
        let file = create_test_file("a,b\n");
        let result = Dibie::new().analyze(file.path());
        assert!(matches!(result, Err(DibieError::InvalidInput { .. })));
    }
}
