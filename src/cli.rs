use clap::{Args, Parser, Subcommand, ValueEnum};

/// BigQuery SQL Analyzer - heuristic static analysis of BigQuery SQL
#[derive(Parser, Debug)]
#[command(name = "bq-sql-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (debug, info, warning, error, critical)
    #[arg(long, global = true)]
    pub log_level: Option<String>
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract referenced tables, columns and the table-to-columns map
    Dependencies(InputArgs),
    /// Check for common anti-patterns and BigQuery-specific issues
    Validate(InputArgs),
    /// Report structural features and a complexity score
    Structure(InputArgs),
    /// Run dependencies, structure and validate in one pass
    Analyze(InputArgs)
}

impl Commands {
    pub fn input(&self) -> &InputArgs {
        match self {
            Self::Dependencies(args)
            | Self::Validate(args)
            | Self::Structure(args)
            | Self::Analyze(args) => args
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// SQL files to analyze (use - for stdin)
    #[arg(required_unless_present = "sql")]
    pub inputs: Vec<String>,

    /// Analyze this SQL text instead of reading files
    #[arg(long, conflicts_with = "inputs")]
    pub sql: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: Format,

    /// Add the complexity label to text output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
