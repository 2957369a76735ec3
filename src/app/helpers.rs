//! Helper functions for CLI operations.
//!
//! Reading input under the size budget, running one command on one input,
//! and mapping findings to an exit code.

use std::{
    fs::{self, File},
    io::{self, Read}
};

use super::types::{CommandKind, SqlInput};
use crate::{
    error::{AppResult, file_read_error, input_too_large_error, missing_input_error},
    output::{Report, SourcedReport},
    query::{AnalyzerOptions, Query},
    rules::{RuleRunner, Severity}
};

/// Source name used for stdin
pub const STDIN_SOURCE: &str = "<stdin>";

/// Source name used for `--sql`
pub const INLINE_SOURCE: &str = "<sql>";

/// Calculates the process exit code from the syntax reports.
///
/// - `0` - No issues or only informational messages
/// - `1` - At least one warning present
/// - `2` - At least one error present
///
/// Reports without a syntax section count as clean.
pub fn calculate_exit_code(reports: &[SourcedReport]) -> i32 {
    let worst = reports
        .iter()
        .filter_map(|r| r.report.syntax())
        .filter_map(|s| s.max_severity())
        .max();
    match worst {
        Some(Severity::Error) => 2,
        Some(Severity::Warning) => 1,
        Some(Severity::Info) | None => 0
    }
}

/// Rejects text over `limit` bytes
pub fn check_size(input: &SqlInput, limit: usize) -> AppResult<()> {
    check_len(&input.source, input.sql.len(), limit)
}

fn check_len(source: &str, size: usize, limit: usize) -> AppResult<()> {
    if size > limit {
        tracing::warn!(source, size, limit, "input rejected");
        return Err(input_too_large_error(source, size, limit));
    }
    Ok(())
}

/// Reads at most `limit + 1` bytes, so an oversized stream is rejected
/// without being buffered whole.
pub fn read_limited<R: Read>(reader: R, source: &str, limit: usize) -> AppResult<String> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    reader
        .take(cap)
        .read_to_end(&mut bytes)
        .map_err(|e| file_read_error(source, e))?;
    check_len(source, bytes.len(), limit)?;
    String::from_utf8(bytes)
        .map_err(|e| file_read_error(source, io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Reads SQL from a file, or from stdin when the path is "-".
///
/// A file's size is checked from its metadata before it is opened for
/// reading.
pub fn read_input(path: &str, limit: usize) -> AppResult<SqlInput> {
    if path == "-" {
        return Ok(SqlInput {
            source: STDIN_SOURCE.to_string(),
            sql:    read_limited(io::stdin(), STDIN_SOURCE, limit)?
        });
    }
    let size = fs::metadata(path)
        .map_err(|e| file_read_error(path, e))?
        .len();
    check_len(path, usize::try_from(size).unwrap_or(usize::MAX), limit)?;
    let file = File::open(path).map_err(|e| file_read_error(path, e))?;
    Ok(SqlInput {
        source: path.to_string(),
        sql:    read_limited(file, path, limit)?
    })
}

/// Collects every input, in order, before any analysis starts
pub fn collect_inputs(
    paths: &[String],
    sql: Option<&str>,
    limit: usize
) -> AppResult<Vec<SqlInput>> {
    if let Some(sql) = sql {
        let input = SqlInput {
            source: INLINE_SOURCE.to_string(),
            sql:    sql.to_string()
        };
        check_size(&input, limit)?;
        return Ok(vec![input]);
    }
    if paths.is_empty() {
        return Err(missing_input_error());
    }
    paths.iter().map(|p| read_input(p, limit)).collect()
}

/// Runs one command against one input
pub fn analyze_input(
    command: CommandKind,
    input: &SqlInput,
    options: &AnalyzerOptions,
    runner: &RuleRunner
) -> SourcedReport {
    let query = Query::with_options(input.sql.as_str(), options.clone());
    let report = match command {
        CommandKind::Dependencies => Report::Dependencies(query.extract_dependencies()),
        CommandKind::Validate => Report::Syntax(runner.validate(&query)),
        CommandKind::Structure => Report::Structure(query.analyze_structure()),
        CommandKind::Analyze => Report::Analysis(query.analyze_with(runner))
    };
    tracing::info!(source = %input.source, bytes = input.sql.len(), "input analyzed");
    SourcedReport {
        source: input.source.clone(),
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;

    fn inline(sql: &str) -> SqlInput {
        SqlInput {
            source: INLINE_SOURCE.to_string(),
            sql:    sql.to_string()
        }
    }

    fn validate(sql: &str) -> SourcedReport {
        analyze_input(
            CommandKind::Validate,
            &inline(sql),
            &AnalyzerOptions::default(),
            &RuleRunner::new()
        )
    }

    #[test]
    fn test_exit_code_no_reports() {
        assert_eq!(calculate_exit_code(&[]), 0);
    }

    #[test]
    fn test_exit_code_info_only() {
        assert_eq!(calculate_exit_code(&[validate("SELECT a FROM t")]), 0);
    }

    #[test]
    fn test_exit_code_warning() {
        assert_eq!(calculate_exit_code(&[validate("SELECT * FROM `t`")]), 1);
    }

    #[test]
    fn test_exit_code_error_takes_precedence() {
        let reports = [validate("SELECT * FROM `t`"), validate("DELETE FROM t")];
        assert_eq!(calculate_exit_code(&reports), 2);
    }

    #[test]
    fn test_exit_code_ignores_non_syntax_reports() {
        let report = analyze_input(
            CommandKind::Structure,
            &inline("DELETE FROM t"),
            &AnalyzerOptions::default(),
            &RuleRunner::new()
        );
        assert_eq!(calculate_exit_code(&[report]), 0);
    }

    #[test]
    fn test_exit_code_uses_configured_runner() {
        let runner = RuleRunner::with_config(&RulesConfig {
            disabled: vec!["safety".to_string()],
            ..Default::default()
        });
        let report = analyze_input(
            CommandKind::Analyze,
            &inline("DELETE FROM `t`"),
            &AnalyzerOptions::default(),
            &runner
        );
        assert_eq!(calculate_exit_code(&[report]), 0);
    }

    #[test]
    fn test_check_size_boundary() {
        assert!(check_size(&inline("SELECT 1"), 8).is_ok());
        assert!(check_size(&inline("SELECT 1"), 7).is_err());
    }

    #[test]
    fn test_collect_inputs_prefers_inline_sql() {
        let inputs = collect_inputs(&["missing.sql".to_string()], Some("SELECT 1"), 100).unwrap();
        assert_eq!(inputs, vec![inline("SELECT 1")]);
    }

    #[test]
    fn test_collect_inputs_requires_something() {
        assert!(collect_inputs(&[], None, 100).is_err());
    }

    #[test]
    fn test_read_limited_stops_at_budget() {
        assert_eq!(read_limited("SELECT 1".as_bytes(), STDIN_SOURCE, 8).unwrap(), "SELECT 1");
        assert!(read_limited("SELECT 1".as_bytes(), STDIN_SOURCE, 7).is_err());
        assert!(read_limited(io::repeat(b'a'), STDIN_SOURCE, 16).is_err());
    }

    #[test]
    fn test_read_input_checks_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.sql");
        fs::write(&path, "SELECT a FROM `ds.t` WHERE a = 1").unwrap();
        let path = path.to_string_lossy();

        assert!(read_input(&path, 10).is_err());
        assert_eq!(read_input(&path, 100).unwrap().sql, "SELECT a FROM `ds.t` WHERE a = 1");
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input("/nonexistent/path/query.sql", 100).is_err());
    }
}
