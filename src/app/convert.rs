//! CLI to internal type conversions.

use crate::{
    cli::Format,
    output::{OutputFormat, OutputOptions}
};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use bq_sql_analyzer::{app::convert_format, cli::Format, output::OutputFormat};
///
/// assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}
