//! Column classification and profiling.

mod business;
mod cardinality;
mod entity;
mod keywords;
mod statistical;

pub use business::{ColumnClassifier, BUSINESS_KEYWORDS};
pub use cardinality::classify_cardinality;
pub use entity::{is_key_like, EntityClassifier, EntityGroups, ENTITY_KEYWORDS, PRIMARY_KEY_KEYWORDS};
pub use keywords::KeywordTable;
pub use statistical::{
    column_positions, distinct_count, distinct_row_count, ColumnProfiler, DEFAULT_SAMPLE_SIZE,
};
