// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use bq_sql_analyzer::{
    query::{ComplexityLevel, JoinType, QueryType, TableReference},
    rules::{BigQueryFeatures, Issue, IssueKind, RuleInfo, Severity, SyntaxReport}
};

#[test]
fn test_severity_display() {
    assert_eq!(format!("{}", Severity::Info), "INFO");
    assert_eq!(format!("{}", Severity::Warning), "WARN");
    assert_eq!(format!("{}", Severity::Error), "ERROR");
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
}

#[test]
fn test_severity_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
}

#[test]
fn test_issue_kind_suggestions_are_distinct() {
    let kinds = [
        IssueKind::Performance,
        IssueKind::Safety,
        IssueKind::Consistency,
        IssueKind::Style,
        IssueKind::Compatibility
    ];
    let mut suggestions: Vec<&str> = kinds.iter().map(|k| k.suggestion()).collect();
    suggestions.sort_unstable();
    suggestions.dedup();

    assert_eq!(suggestions.len(), kinds.len());
}

#[test]
fn test_syntax_report_from_issues() {
    let info = RuleInfo {
        id:       "TEST001",
        name:     "Test",
        kind:     IssueKind::Style,
        severity: Severity::Info
    };
    let report = SyntaxReport::from_issues(vec![info.issue("first")], BigQueryFeatures::default());

    assert!(report.is_valid);
    assert_eq!(report.suggestions, vec![IssueKind::Style.suggestion()]);
    assert_eq!(report.max_severity(), Some(Severity::Info));
}

#[test]
fn test_syntax_report_error_invalidates() {
    let issue = Issue {
        kind:     IssueKind::Safety,
        message:  "boom".to_string(),
        severity: Severity::Error,
        rule_id:  "TEST002"
    };
    let report = SyntaxReport::from_issues(vec![issue], BigQueryFeatures::default());

    assert!(!report.is_valid);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn test_table_reference_full_name() {
    assert_eq!(
        TableReference::new(Some("p"), Some("d"), "t").full_name,
        "p.d.t"
    );
    assert_eq!(TableReference::new(None, Some("d"), "t").full_name, "d.t");
    assert_eq!(TableReference::bare("t").full_name, "t");
    assert!(TableReference::bare("t").dataset.is_none());
}

#[test]
fn test_query_type_from_keyword() {
    assert_eq!(QueryType::from_keyword("DROP"), QueryType::Drop);
    assert_eq!(QueryType::from_keyword("MERGE"), QueryType::Unknown);
    assert_eq!(serde_json::to_string(&QueryType::With).unwrap(), "\"WITH\"");
}

#[test]
fn test_join_type_from_qualifier() {
    assert_eq!(JoinType::from_qualifier(None), JoinType::Inner);
    assert_eq!(JoinType::from_qualifier(Some("FULL")), JoinType::FullOuter);
    assert_eq!(JoinType::FullOuter.to_string(), "FULL OUTER");
}

#[test]
fn test_complexity_level_from_score() {
    assert_eq!(ComplexityLevel::from_score(5), ComplexityLevel::Low);
    assert_eq!(ComplexityLevel::from_score(35), ComplexityLevel::Medium);
    assert_eq!(ComplexityLevel::from_score(100), ComplexityLevel::High);
}
