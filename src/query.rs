//! Heuristic analysis of raw SQL text.
//!
//! A [`Query`] wraps SQL text and answers, without executing or parsing it
//! into a tree:
//!
//! - which tables and columns it touches ([`Query::extract_dependencies`])
//! - which structural features it uses ([`Query::analyze_structure`])
//! - which common anti-patterns it exhibits ([`Query::validate_syntax`])
//!
//! Everything is driven by the patterns in [`patterns`]. The analysis is a
//! best-effort approximation: names inside string literals or comments may be
//! picked up, and tables referenced only inside subqueries may be missed.
//! Malformed or empty input never fails; it yields empty collections and
//! default flags.
//!
//! # Example
//!
//! ```
//! use bq_sql_analyzer::query::{Query, QueryType};
//!
//! let query = Query::new("SELECT id, name FROM project.dataset.users");
//! let deps = query.extract_dependencies();
//!
//! assert_eq!(deps.table_count, 1);
//! assert_eq!(deps.tables[0].full_name, "project.dataset.users");
//! assert_eq!(query.analyze_structure().query_type, QueryType::Select);
//! ```

mod dependencies;
mod extract;
pub mod patterns;
mod structure;
mod types;

use compact_str::CompactString;
use serde::Serialize;
pub use dependencies::build_dependencies;
pub use extract::{extract_columns, extract_tables, predicate_columns, projection_columns};
pub use structure::{
    ComplexityLevel, classify_query_type, complexity_score, functions_used, join_types,
    structure_report
};
pub use types::{
    ColumnReference, DependencyReport, JoinType, JoinVec, Query, QueryType, StructureReport,
    TableReference
};

use crate::rules::{RuleRunner, SyntaxReport, default_runner};

/// Reserved words that are never bare table names
pub const DEFAULT_TABLE_STOPWORDS: [&str; 10] =
    ["AS", "ON", "WHERE", "AND", "OR", "LEFT", "RIGHT", "INNER", "FULL", "CROSS"];

/// Tunable data for the heuristics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Upper-cased words rejected as single-identifier table names
    pub table_stopwords: Vec<CompactString>
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            table_stopwords: DEFAULT_TABLE_STOPWORDS
                .iter()
                .map(|w| CompactString::from(*w))
                .collect()
        }
    }
}

impl AnalyzerOptions {
    /// Extend the stopword list; the built-in words always stay
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        for word in words {
            let upper = CompactString::from(word.as_ref().trim().to_ascii_uppercase());
            if !upper.is_empty() && !self.table_stopwords.contains(&upper) {
                self.table_stopwords.push(upper);
            }
        }
        self
    }

    pub fn is_table_stopword(&self, token: &str) -> bool {
        self.table_stopwords
            .iter()
            .any(|w| w.eq_ignore_ascii_case(token))
    }
}

/// All three reports for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryAnalysis {
    pub dependencies: DependencyReport,
    pub structure:    StructureReport,
    pub syntax:       SyntaxReport
}

impl Query {
    /// Tables, columns and the table-to-columns map.
    ///
    /// Served from the memoized table and column lists.
    pub fn extract_dependencies(&self) -> DependencyReport {
        build_dependencies(self.tables(), self.columns())
    }

    /// Structural features and complexity score
    pub fn analyze_structure(&self) -> StructureReport {
        structure_report(self)
    }

    /// Heuristic anti-pattern checks with the built-in rule set
    pub fn validate_syntax(&self) -> SyntaxReport {
        default_runner().validate(self)
    }

    /// Every report, with syntax checks run by `runner`
    pub fn analyze_with(&self, runner: &RuleRunner) -> QueryAnalysis {
        QueryAnalysis {
            dependencies: self.extract_dependencies(),
            structure:    self.analyze_structure(),
            syntax:       runner.validate(self)
        }
    }
}

/// Dependency report for SQL text with default options
pub fn extract_dependencies(sql: &str) -> DependencyReport {
    Query::new(sql).extract_dependencies()
}

/// Syntax report for SQL text with the built-in rule set
pub fn validate_syntax(sql: &str) -> SyntaxReport {
    Query::new(sql).validate_syntax()
}

/// Structure report for SQL text with default options
pub fn analyze_structure(sql: &str) -> StructureReport {
    Query::new(sql).analyze_structure()
}
