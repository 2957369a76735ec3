use indexmap::IndexMap;

use super::{ColumnReference, DependencyReport, TableReference};

/// Compose table and column references into a dependency report.
///
/// Each table maps to the entire column list. There is no alias resolution
/// behind the extraction, so a column is never attributed to one table.
pub fn build_dependencies(
    tables: &[TableReference],
    columns: &[ColumnReference]
) -> DependencyReport {
    let dependency_graph: IndexMap<_, _> = tables
        .iter()
        .map(|table| (table.full_name.clone(), columns.to_vec()))
        .collect();
    DependencyReport {
        tables: tables.to_vec(),
        columns: columns.to_vec(),
        dependency_graph,
        table_count: tables.len(),
        column_count: columns.len()
    }
}
