//! # BigQuery SQL Analyzer
//!
//! Heuristic static analysis for BigQuery SQL.
//!
//! `bq-sql-analyzer` reads SQL text and, without running it or talking to a
//! warehouse, reports which tables and columns it references, which
//! structural features it uses, and which common anti-patterns it contains.
//! Everything is pattern based, so results are a best-effort approximation.
//!
//! # Quick Start
//!
//! ```bash
//! # Tables, columns and the dependency graph
//! bq-sql-analyzer dependencies query.sql
//!
//! # Anti-pattern checks; exit code reflects the worst finding
//! bq-sql-analyzer validate -f json query.sql
//!
//! # Structure with the complexity label
//! bq-sql-analyzer structure -v --sql "SELECT COUNT(*) FROM ds.t"
//!
//! # Everything at once, many files in parallel, stdin supported
//! cat query.sql | bq-sql-analyzer analyze - other.sql
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`BQ_SQL_ANALYZER_LOG_LEVEL`,
//!    `BQ_SQL_ANALYZER_MAX_INPUT_BYTES`)
//! 3. `.bq-sql-analyzer.toml` in current directory
//! 4. `~/.config/bq-sql-analyzer/config.toml`
//!
//! ```toml
//! log_level = "info"
//!
//! [analyzer]
//! table_stopwords = ["USING"]
//!
//! [rules]
//! disabled = ["style"]
//!
//! [rules.severity]
//! consistency = "error"
//! ```
//!
//! # Rules
//!
//! | ID | Kind | Severity | Description |
//! |----|------|----------|-------------|
//! | PERF001 | performance | warning | `SELECT *` reads every column |
//! | SAFE001 | safety | error | `DELETE`/`UPDATE` without `WHERE` |
//! | CONS001 | consistency | warning | `LIMIT` without `ORDER BY` |
//! | STYLE001 | style | info | Table reference without backticks |
//! | COMPAT001 | compatibility | warning | `#legacySQL` marker |
//!
//! # Exit Codes
//!
//! For `validate` and `analyze`, the exit code reflects the highest severity
//! found:
//!
//! - `0` - Success, no issues or only informational messages
//! - `1` - Warnings found
//! - `2` - Errors found
//!
//! Failures (unreadable input, oversized input, bad configuration) exit
//! with `1` after printing `Error: ...` to stderr.
//!
//! # Output Formats
//!
//! - `text` - Human-readable colored output (default)
//! - `json` - Structured JSON for programmatic processing
//! - `yaml` - YAML format

use std::process;

use bq_sql_analyzer::{
    app::{RunParams, run},
    cli::Cli,
    config::Config,
    error::AppResult,
    logging::init_tracing
};
use clap::Parser;

fn main() {
    match run_cli() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_cli() -> AppResult<i32> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
        config.validate()?;
    }
    init_tracing(&config.log_level, config.log_format);

    let result = run(RunParams::from(&cli.command), &config)?;
    println!("{}", result.output.trim_end());
    Ok(result.exit_code)
}
