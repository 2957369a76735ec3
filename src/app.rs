//! Application logic for the BigQuery SQL Analyzer CLI.
//!
//! This module contains the core application logic separated from the main
//! entry point to enable testing.

mod convert;
mod helpers;
mod types;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

pub use convert::{convert_format, create_output_options};
pub use helpers::{
    INLINE_SOURCE, STDIN_SOURCE, analyze_input, calculate_exit_code, check_size, collect_inputs,
    read_input
};
pub use types::{CommandKind, RunParams, RunResult, SqlInput};

use crate::{
    config::Config,
    error::AppResult,
    output::{SourcedReport, render_batch},
    rules::RuleRunner
};

/// Batches at least this large get a progress bar
pub const PROGRESS_THRESHOLD: usize = 8;

/// Executes one CLI command.
///
/// 1. Reads every input, rejecting any over `max_input_bytes`
/// 2. Analyzes the inputs in parallel
/// 3. Renders the reports in input order
///
/// # Errors
///
/// Returns an error if an input cannot be read or is too large. Analysis
/// itself never fails.
///
/// # Example
///
/// ```
/// use bq_sql_analyzer::{
///     app::{CommandKind, RunParams, run},
///     cli::Format,
///     config::Config
/// };
///
/// let params = RunParams {
///     command:       CommandKind::Validate,
///     inputs:        vec![],
///     sql:           Some("DELETE FROM users".to_string()),
///     output_format: Format::Json,
///     verbose:       false,
///     no_color:      true
/// };
///
/// let result = run(params, &Config::default()).unwrap();
/// assert_eq!(result.exit_code, 2);
/// ```
pub fn run(params: RunParams, config: &Config) -> AppResult<RunResult> {
    let limit = config.analyzer.max_input_bytes;
    let inputs = collect_inputs(&params.inputs, params.sql.as_deref(), limit)?;
    let options = config.analyzer_options();
    let runner = RuleRunner::with_config(&config.rules);

    let pb = if inputs.len() >= PROGRESS_THRESHOLD {
        let pb = ProgressBar::new(inputs.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message("analyzing");
        pb
    } else {
        ProgressBar::hidden()
    };

    let reports: Vec<SourcedReport> = inputs
        .par_iter()
        .map(|input| {
            let report = analyze_input(params.command, input, &options, &runner);
            pb.inc(1);
            report
        })
        .collect();
    pb.finish_and_clear();

    let exit_code = if params.command.checks_syntax() {
        calculate_exit_code(&reports)
    } else {
        0
    };
    let output_opts = create_output_options(params.output_format, params.no_color, params.verbose);
    Ok(RunResult {
        exit_code,
        output: render_batch(&reports, &output_opts)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;

    fn params(command: CommandKind, inputs: Vec<String>, sql: Option<&str>) -> RunParams {
        RunParams {
            command,
            inputs,
            sql: sql.map(String::from),
            output_format: Format::Json,
            verbose: false,
            no_color: true
        }
    }

    #[test]
    fn test_structure_never_sets_exit_code() {
        let result = run(
            params(CommandKind::Structure, vec![], Some("DELETE FROM t")),
            &Config::default()
        )
        .unwrap();
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("\"query_type\": \"DELETE\""));
    }

    #[test]
    fn test_oversized_inline_sql_rejected() {
        let mut config = Config::default();
        config.analyzer.max_input_bytes = 4;
        let result = run(params(CommandKind::Validate, vec![], Some("SELECT 1")), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<String> = (0..PROGRESS_THRESHOLD + 2)
            .map(|i| {
                let path = dir.path().join(format!("q{}.sql", i));
                std::fs::write(&path, format!("SELECT c{} FROM t{}", i, i)).unwrap();
                path.display().to_string()
            })
            .collect();
        let result = run(
            params(CommandKind::Dependencies, paths.clone(), None),
            &Config::default()
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        let sources: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["source"].as_str().unwrap())
            .collect();
        assert_eq!(sources, paths.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(value[3]["report"]["columns"][0], "c3");
    }
}
