use indexmap::IndexMap;
use regex::Captures;

use crate::query::{
    AnalyzerOptions, TableReference,
    patterns::{TableParts, table_patterns}
};

/// Extract table references from raw SQL.
///
/// Patterns run most specific first; every match is a candidate and the
/// candidates are deduplicated by `full_name`, keeping first-occurrence
/// order across the whole pass.
///
/// # Notes
///
/// - Single-identifier candidates naming a reserved word are dropped
/// - Single-identifier candidates whose name is already the `table` part of
///   an earlier candidate are dropped
/// - Tables inside subqueries, CTE bodies or string literals may or may not
///   be found
pub fn extract_tables(sql: &str, options: &AnalyzerOptions) -> Vec<TableReference> {
    let mut candidates: Vec<TableReference> = Vec::new();
    for (pattern, parts) in table_patterns() {
        for caps in pattern.captures_iter(sql) {
            if let Some(candidate) = candidate(&caps, parts, options, &candidates) {
                candidates.push(candidate);
            }
        }
    }
    let mut unique: IndexMap<_, TableReference> = IndexMap::with_capacity(candidates.len());
    for table in candidates {
        unique.entry(table.full_name.clone()).or_insert(table);
    }
    unique.into_values().collect()
}

fn candidate(
    caps: &Captures<'_>,
    parts: TableParts,
    options: &AnalyzerOptions,
    seen: &[TableReference]
) -> Option<TableReference> {
    let part = |idx: usize| caps.get(idx).map(|m| m.as_str());
    match parts {
        TableParts::Three => Some(TableReference::new(part(1), part(2), part(3)?)),
        TableParts::Two => Some(TableReference::new(None, part(1), part(2)?)),
        TableParts::One => {
            let name = part(1)?;
            if options.is_table_stopword(name) || seen.iter().any(|t| t.table == name) {
                return None;
            }
            Some(TableReference::bare(name))
        }
    }
}
