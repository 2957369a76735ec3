//! Application types for CLI commands.

use crate::cli::{Commands, Format};

/// Which report a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Dependencies,
    Validate,
    Structure,
    Analyze
}

impl CommandKind {
    /// Whether syntax issue severity drives the exit code
    pub fn checks_syntax(self) -> bool {
        matches!(self, Self::Validate | Self::Analyze)
    }
}

impl From<&Commands> for CommandKind {
    fn from(command: &Commands) -> Self {
        match command {
            Commands::Dependencies(_) => Self::Dependencies,
            Commands::Validate(_) => Self::Validate,
            Commands::Structure(_) => Self::Structure,
            Commands::Analyze(_) => Self::Analyze
        }
    }
}

/// Parameters for a run.
///
/// # Example
///
/// ```
/// use bq_sql_analyzer::{
///     app::{CommandKind, RunParams},
///     cli::Format
/// };
///
/// let params = RunParams {
///     command:       CommandKind::Validate,
///     inputs:        vec![],
///     sql:           Some("SELECT 1".to_string()),
///     output_format: Format::Json,
///     verbose:       false,
///     no_color:      true
/// };
/// assert!(params.command.checks_syntax());
/// ```
#[derive(Debug, Clone)]
pub struct RunParams {
    pub command:       CommandKind,
    /// File paths, "-" for stdin
    pub inputs:        Vec<String>,
    /// Inline SQL, used instead of `inputs` when present
    pub sql:           Option<String>,
    pub output_format: Format,
    /// Add the complexity label to text output
    pub verbose:       bool,
    pub no_color:      bool
}

impl From<&Commands> for RunParams {
    fn from(command: &Commands) -> Self {
        let args = command.input();
        Self {
            command:       CommandKind::from(command),
            inputs:        args.inputs.clone(),
            sql:           args.sql.clone(),
            output_format: args.format,
            verbose:       args.verbose,
            no_color:      args.no_color
        }
    }
}

/// SQL text with the name it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlInput {
    pub source: String,
    pub sql:    String
}

/// Rendered output and the process exit code
#[derive(Debug, Clone)]
pub struct RunResult {
    /// 0 clean, 1 warnings, 2 errors
    pub exit_code: i32,
    pub output:    String
}
