mod column;
mod table;

pub use column::{extract_columns, predicate_columns, projection_columns};
pub use table::extract_tables;
