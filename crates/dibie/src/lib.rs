//! Dibie: data dictionaries, quality reports and normalized table proposals for
//! school finance spreadsheets.
//!
//! Columns are classified by name into business types and entity groups using
//! declarative keyword tables, profiled for nulls and distinct values, and
//! summarized into JSON-serializable reports. Nothing here writes files or
//! installs a logger: the library emits `tracing` events and leaves both to
//! the caller.
//!
//! # Example
//!
//! ```no_run
//! use dibie::Dibie;
//!
//! let dibie = Dibie::new();
//! let result = dibie.analyze("tabla_maestra.csv").unwrap();
//!
//! println!("Quality score: {}", result.quality.quality_score);
//! println!("Proposed tables: {}", result.proposal.len());
//! ```

pub mod config;
pub mod dictionary;
pub mod error;
pub mod inference;
pub mod input;
pub mod normalize;
pub mod quality;
pub mod schema;

mod dibie;

pub use crate::dibie::{AnalysisResult, Dibie};
pub use config::DibieConfig;
pub use dictionary::{ColumnRecord, DataDictionary, DataDictionaryBuilder, DictionaryConfig};
pub use error::{DibieError, Result};
pub use inference::{classify_cardinality, ColumnClassifier, EntityClassifier, EntityGroups};
pub use input::{DataTable, Parser, ParserConfig, ScalarValue, SourceMetadata};
pub use normalize::{AtomicTableProposal, AtomicTableProposer, ProposedTable, SchemaDdl};
pub use quality::{QualityConfig, QualityReport, QualityReportBuilder};
pub use schema::{BusinessType, CardinalityClass, ColumnStatistics, ColumnType, EntityGroup};

/// Group column names by entity with the built-in keyword table.
pub fn group_columns_by_entity<'a, I>(columns: I) -> EntityGroups
where
    I: IntoIterator<Item = &'a str>,
{
    EntityClassifier::new().group_columns(columns)
}
