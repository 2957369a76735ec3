use std::collections::BTreeSet;

use crate::query::{
    ColumnReference,
    patterns::{IDENTIFIER, PREDICATE_OPERAND, SELECT_WINDOW, WHERE_WINDOW}
};

/// Tokens of the projection list that are never columns
const PROJECTION_STOPWORDS: [&str; 7] = ["AS", "DISTINCT", "CASE", "WHEN", "THEN", "ELSE", "END"];

/// Extract column references from raw SQL.
///
/// Unions the projection window (first SELECT up to FROM) with the predicate
/// window (WHERE up to GROUP BY, ORDER BY, LIMIT or the end), returned
/// sorted and deduplicated. A missing clause contributes nothing.
pub fn extract_columns(sql: &str) -> Vec<ColumnReference> {
    let mut columns = BTreeSet::new();
    columns.extend(projection_columns(sql));
    columns.extend(predicate_columns(sql));
    columns.into_iter().collect()
}

/// Every identifier between the first SELECT and the following FROM,
/// except projection keywords.
pub fn projection_columns(sql: &str) -> Vec<ColumnReference> {
    let Some(window) = SELECT_WINDOW.captures(sql).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    IDENTIFIER
        .captures_iter(window.as_str())
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|token| {
            !PROJECTION_STOPWORDS
                .iter()
                .any(|stop| stop.eq_ignore_ascii_case(token))
        })
        .map(ColumnReference::from)
        .collect()
}

/// Identifiers in the WHERE window that are directly followed by a
/// comparison or membership operator.
pub fn predicate_columns(sql: &str) -> Vec<ColumnReference> {
    let Some(window) = WHERE_WINDOW.captures(sql).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    PREDICATE_OPERAND
        .captures_iter(window.as_str())
        .filter_map(|c| c.get(1))
        .map(|m| ColumnReference::from(m.as_str()))
        .collect()
}
