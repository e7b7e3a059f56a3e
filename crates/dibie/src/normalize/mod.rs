//! Normalized table proposals and their SQL rendering.

mod ddl;
mod proposal;

pub use ddl::{normalize_column, SchemaDdl};
pub use proposal::{
    dimension_name, AtomicTableProposal, AtomicTableProposer, ForeignKey, ProposedTable, TableKind,
    FACT_TABLE, LOCATION_TABLE, MASTER_TABLE, TIME_TABLE,
};
