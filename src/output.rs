//! Report rendering.
//!
//! JSON and YAML are the serde shapes of the report types. Text is a short
//! human summary, optionally colored.

use colored::{Color, Colorize};
use serde::Serialize;

use crate::{
    query::{ComplexityLevel, DependencyReport, QueryAnalysis, StructureReport},
    rules::{Severity, SyntaxReport}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Any report a command can produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Dependencies(DependencyReport),
    Syntax(SyntaxReport),
    Structure(StructureReport),
    Analysis(QueryAnalysis)
}

impl Report {
    /// Syntax report carried by this report, if any
    pub fn syntax(&self) -> Option<&SyntaxReport> {
        match self {
            Self::Syntax(report) => Some(report),
            Self::Analysis(analysis) => Some(&analysis.syntax),
            Self::Dependencies(_) | Self::Structure(_) => None
        }
    }
}

/// A report labelled with the input it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcedReport {
    pub source: String,
    pub report: Report
}

/// Render one report
pub fn render(report: &Report, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Text => match report {
            Report::Dependencies(r) => format_dependencies_text(r, opts),
            Report::Syntax(r) => format_syntax_text(r, opts),
            Report::Structure(r) => format_structure_text(r, opts),
            Report::Analysis(a) => format_analysis_text(a, opts)
        }
    }
}

/// Render reports for several inputs.
///
/// A single input renders exactly like [`render`]. More inputs become a
/// list of `{source, report}` documents, or text sections headed by the
/// source name.
pub fn render_batch(reports: &[SourcedReport], opts: &OutputOptions) -> String {
    if let [single] = reports {
        return render(&single.report, opts);
    }
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(reports).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            for item in reports {
                let header = format!("==> {} <==", item.source);
                output.push_str(&paint(&header, Color::Cyan, true, opts));
                output.push('\n');
                output.push_str(&render(&item.report, opts));
                output.push('\n');
            }
            output
        }
    }
}

pub fn render_dependencies(report: &DependencyReport, opts: &OutputOptions) -> String {
    render(&Report::Dependencies(report.clone()), opts)
}

pub fn render_syntax(report: &SyntaxReport, opts: &OutputOptions) -> String {
    render(&Report::Syntax(report.clone()), opts)
}

pub fn render_structure(report: &StructureReport, opts: &OutputOptions) -> String {
    render(&Report::Structure(report.clone()), opts)
}

fn paint(text: &str, color: Color, bold: bool, opts: &OutputOptions) -> String {
    if !opts.colored {
        return text.to_string();
    }
    let styled = text.color(color);
    if bold {
        styled.bold().to_string()
    } else {
        styled.to_string()
    }
}

fn heading(text: &str, opts: &OutputOptions) -> String {
    if opts.colored {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn join_or_none<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
{
    let joined: Vec<String> = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    if joined.is_empty() {
        String::from("none")
    } else {
        joined.join(", ")
    }
}

fn format_dependencies_text(report: &DependencyReport, opts: &OutputOptions) -> String {
    let mut out = String::new();
    out.push_str(&heading(&format!("Tables ({}):", report.table_count), opts));
    out.push('\n');
    for table in &report.tables {
        out.push_str(&format!("  {}\n", table.full_name));
    }
    out.push_str(&heading(&format!("Columns ({}):", report.column_count), opts));
    out.push_str(&format!(" {}\n", join_or_none(&report.columns)));
    if !report.dependency_graph.is_empty() {
        out.push_str(&heading("Dependency graph:", opts));
        out.push('\n');
        for (table, columns) in &report.dependency_graph {
            out.push_str(&format!("  {} -> {}\n", table, join_or_none(columns)));
        }
    }
    out
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue
    }
}

fn format_syntax_text(report: &SyntaxReport, opts: &OutputOptions) -> String {
    let mut out = String::new();
    let status = if report.is_valid {
        paint("valid", Color::Green, true, opts)
    } else {
        paint("invalid", Color::Red, true, opts)
    };
    out.push_str(&format!("Syntax: {}\n", status));
    for (issue, suggestion) in report.issues.iter().zip(&report.suggestions) {
        let tag = paint(
            &format!("[{}]", issue.severity),
            severity_color(issue.severity),
            true,
            opts
        );
        out.push_str(&format!("{} {}: {}\n", tag, issue.kind, issue.message));
        out.push_str(&format!("  suggestion: {}\n", suggestion));
    }
    out.push_str(&format!(
        "Summary: {} errors, {} warnings, {} info\n",
        report.error_count(),
        report.warning_count(),
        report.info_count()
    ));
    let features = &report.bigquery_specific;
    out.push_str(&format!(
        "BigQuery: legacy SQL {}, ARRAY syntax {}, STRUCT syntax {}\n",
        yes_no(features.uses_legacy_sql),
        yes_no(features.has_array_syntax),
        yes_no(features.has_struct_syntax)
    ));
    out
}

fn complexity_label(score: u32, opts: &OutputOptions) -> String {
    let level = ComplexityLevel::from_score(score);
    let color = match level {
        ComplexityLevel::Low => Color::Green,
        ComplexityLevel::Medium => Color::Yellow,
        ComplexityLevel::High => Color::Red
    };
    paint(&level.to_string(), color, false, opts)
}

fn format_structure_text(report: &StructureReport, opts: &OutputOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        heading("Query type:", opts),
        report.query_type
    ));
    out.push_str(&format!("Tables: {}\n", report.table_count));
    out.push_str(&format!(
        "Joins: {}\n",
        join_or_none(report.join_types.iter().map(|j| j.as_str()))
    ));
    out.push_str(&format!(
        "Subqueries: {}, CTE: {}, aggregations: {}, window functions: {}, UNION: {}\n",
        yes_no(report.has_subqueries),
        yes_no(report.has_cte),
        yes_no(report.has_aggregations),
        yes_no(report.has_window_functions),
        yes_no(report.has_union)
    ));
    out.push_str(&format!(
        "Functions: {}\n",
        join_or_none(&report.functions_used)
    ));
    if opts.verbose {
        out.push_str(&format!(
            "Complexity: {} (score: {})\n",
            complexity_label(report.complexity_score, opts),
            report.complexity_score
        ));
    } else {
        out.push_str(&format!("Complexity score: {}\n", report.complexity_score));
    }
    out
}

fn format_analysis_text(analysis: &QueryAnalysis, opts: &OutputOptions) -> String {
    let mut out = String::new();
    out.push_str(&heading("=== Dependencies ===", opts));
    out.push('\n');
    out.push_str(&format_dependencies_text(&analysis.dependencies, opts));
    out.push('\n');
    out.push_str(&heading("=== Structure ===", opts));
    out.push('\n');
    out.push_str(&format_structure_text(&analysis.structure, opts));
    out.push('\n');
    out.push_str(&heading("=== Syntax ===", opts));
    out.push('\n');
    out.push_str(&format_syntax_text(&analysis.syntax, opts));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    fn plain(format: OutputFormat, verbose: bool) -> OutputOptions {
        OutputOptions {
            format,
            colored: false,
            verbose
        }
    }

    #[test]
    fn test_complexity_label_thresholds() {
        let opts = plain(OutputFormat::Text, true);
        assert_eq!(complexity_label(0, &opts), "Low");
        assert_eq!(complexity_label(19, &opts), "Low");
        assert_eq!(complexity_label(20, &opts), "Medium");
        assert_eq!(complexity_label(49, &opts), "Medium");
        assert_eq!(complexity_label(50, &opts), "High");
    }

    #[test]
    fn test_structure_text_verbose_label() {
        let report = Query::new("SELECT a FROM t").analyze_structure();
        let text = render_structure(&report, &plain(OutputFormat::Text, true));
        assert!(text.contains("Query type: SELECT"));
        assert!(text.contains("Complexity: Low (score: 0)"));
        let quiet = render_structure(&report, &plain(OutputFormat::Text, false));
        assert!(quiet.contains("Complexity score: 0"));
    }

    #[test]
    fn test_syntax_text_lists_issues() {
        let report = Query::new("DELETE FROM t").validate_syntax();
        let text = render_syntax(&report, &plain(OutputFormat::Text, false));
        assert!(text.starts_with("Syntax: invalid"));
        assert!(text.contains("[ERROR] safety: DELETE/UPDATE without WHERE clause affects all rows"));
        assert!(text.contains("Summary: 1 errors, 0 warnings, 1 info"));
    }

    #[test]
    fn test_json_is_report_shape() {
        let report = Query::new("SELECT a FROM ds.t").extract_dependencies();
        let json = render_dependencies(&report, &plain(OutputFormat::Json, false));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["table_count"], 1);
        assert_eq!(value["tables"][0]["full_name"], "ds.t");
    }

    #[test]
    fn test_batch_of_one_is_plain_render() {
        let report = Report::Syntax(Query::new("SELECT 1").validate_syntax());
        let opts = plain(OutputFormat::Json, false);
        let batch = render_batch(
            &[SourcedReport {
                source: String::from("a.sql"),
                report: report.clone()
            }],
            &opts
        );
        assert_eq!(batch, render(&report, &opts));
    }

    #[test]
    fn test_batch_text_headers() {
        let opts = plain(OutputFormat::Text, false);
        let reports: Vec<SourcedReport> = ["a.sql", "b.sql"]
            .iter()
            .map(|s| SourcedReport {
                source: s.to_string(),
                report: Report::Structure(Query::new("SELECT 1").analyze_structure())
            })
            .collect();
        let text = render_batch(&reports, &opts);
        assert!(text.contains("==> a.sql <=="));
        assert!(text.find("a.sql") < text.find("b.sql"));
    }
}
