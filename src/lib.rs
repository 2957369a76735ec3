//! # BigQuery SQL Analyzer Library
//!
//! Heuristic static analysis of BigQuery SQL text: referenced tables and
//! columns, structural features with a complexity score, and common
//! anti-patterns. Nothing is executed and no parse tree is built.
//!
//! ```
//! use bq_sql_analyzer::{analyze_structure, extract_dependencies, validate_syntax};
//!
//! let deps = extract_dependencies("SELECT id FROM `proj.ds.users` WHERE active = TRUE");
//! assert_eq!(deps.columns, vec!["active", "id"]);
//!
//! assert!(!validate_syntax("DELETE FROM users").is_valid);
//! assert!(!analyze_structure("SELECT 1").has_joins);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod rules;

pub use query::{
    AnalyzerOptions, DependencyReport, Query, QueryAnalysis, StructureReport, analyze_structure,
    extract_dependencies, validate_syntax
};
pub use rules::SyntaxReport;
