//! Schema types for column classification and statistics.

mod column;
mod types;

pub use column::ColumnStatistics;
pub use types::{BusinessType, CardinalityClass, ColumnType, EntityGroup};
