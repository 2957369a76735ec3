//! Type definitions for the heuristic syntax checks.
//!
//! - [`Severity`] - Issue severity levels (Info, Warning, Error)
//! - [`IssueKind`] - What an issue is about, and how to fix it
//! - [`Issue`] - A single finding
//! - [`SyntaxReport`] - Complete validation results

use serde::Serialize;

/// Severity level of an issue.
///
/// Ordered from lowest to highest severity. Only `Error` makes a report
/// invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational suggestion
    Info,
    /// Likely problem worth a look
    Warning,
    /// Dangerous statement that should not run as written
    Error
}

impl Severity {
    /// Parse a configured severity name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

/// Kind of an issue, serialized as its `type`.
///
/// Each kind owns exactly one remediation text, see
/// [`suggestion`](Self::suggestion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Performance,
    Safety,
    Consistency,
    Style,
    Compatibility
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Safety => "safety",
            Self::Consistency => "consistency",
            Self::Style => "style",
            Self::Compatibility => "compatibility"
        }
    }

    /// Remediation text shown for issues of this kind
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Performance => "Specify exact columns needed instead of using SELECT *",
            Self::Safety => "Add a WHERE clause to limit the scope of the operation",
            Self::Consistency => "Add ORDER BY clause before LIMIT for consistent results",
            Self::Style => "Use backticks (`) around table and column names",
            Self::Compatibility => "Migrate to Standard SQL for better support"
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single heuristic finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Kind of the issue
    #[serde(rename = "type")]
    pub kind:     IssueKind,
    /// Human-readable description
    pub message:  String,
    /// Severity, possibly overridden by configuration
    pub severity: Severity,
    /// Identifier of the rule that raised it (e.g., "SAFE001")
    #[serde(skip)]
    pub rule_id:  &'static str
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., "PERF001")
    pub id:       &'static str,
    /// Human-readable rule name
    pub name:     &'static str,
    /// Kind of issue the rule raises
    pub kind:     IssueKind,
    /// Default severity level
    pub severity: Severity
}

impl RuleInfo {
    /// Build the issue this rule reports
    pub fn issue(&self, message: impl Into<String>) -> Issue {
        Issue {
            kind:     self.kind,
            message:  message.into(),
            severity: self.severity,
            rule_id:  self.id
        }
    }
}

/// Dialect flags reported whether or not they raised an issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BigQueryFeatures {
    pub uses_legacy_sql:   bool,
    pub has_array_syntax:  bool,
    pub has_struct_syntax: bool
}

/// Result of the heuristic syntax checks.
///
/// `is_valid` and `suggestions` are always derived from `issues`; use
/// [`from_issues`](Self::from_issues) to keep them in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxReport {
    pub is_valid:          bool,
    pub issues:            Vec<Issue>,
    pub suggestions:       Vec<String>,
    pub bigquery_specific: BigQueryFeatures
}

impl SyntaxReport {
    pub fn from_issues(issues: Vec<Issue>, bigquery_specific: BigQueryFeatures) -> Self {
        let is_valid = !issues.iter().any(|i| i.severity == Severity::Error);
        let suggestions = issues
            .iter()
            .map(|i| i.kind.suggestion().to_string())
            .collect();
        Self {
            is_valid,
            issues,
            suggestions,
            bigquery_specific
        }
    }

    /// Highest severity among the issues
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }
}
