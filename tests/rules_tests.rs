use bq_sql_analyzer::{
    config::RulesConfig,
    query::Query,
    rules::{IssueKind, RuleRunner, Severity, SyntaxReport, default_runner}
};
use pretty_assertions::assert_eq;

fn validate(sql: &str) -> SyntaxReport {
    default_runner().validate(&Query::new(sql))
}

fn kinds(report: &SyntaxReport) -> Vec<IssueKind> {
    report.issues.iter().map(|i| i.kind).collect()
}

#[test]
fn test_clean_query_has_no_issues() {
    let report = validate("SELECT id FROM `proj.ds.users` WHERE id = 1");

    assert!(report.is_valid);
    assert!(report.issues.is_empty());
}

#[test]
fn test_wildcard_select() {
    let report = validate("SELECT * FROM `ds.users`");

    assert_eq!(kinds(&report), vec![IssueKind::Performance]);
    assert_eq!(report.issues[0].severity, Severity::Warning);
    assert_eq!(
        report.issues[0].message,
        "SELECT * may impact performance - consider specifying columns"
    );
}

#[test]
fn test_update_without_where() {
    let report = validate("UPDATE `ds.users` SET active = FALSE");

    assert!(!report.is_valid);
    assert_eq!(kinds(&report), vec![IssueKind::Safety]);
    assert_eq!(
        report.suggestions,
        vec!["Add a WHERE clause to limit the scope of the operation"]
    );
}

#[test]
fn test_mutation_with_where_is_valid() {
    let report = validate("DELETE FROM `ds.users` WHERE id = 1");

    assert!(report.is_valid);
    assert!(report.issues.is_empty());
}

#[test]
fn test_mutation_must_lead() {
    let report = validate("SELECT 'DELETE' FROM `ds.t`");

    assert!(report.is_valid);
}

#[test]
fn test_limit_with_order_by() {
    let report = validate("SELECT a FROM `ds.t` ORDER BY a LIMIT 10");

    assert!(report.issues.is_empty());
}

#[test]
fn test_unquoted_table_is_info() {
    let report = validate("SELECT a FROM users");

    assert_eq!(kinds(&report), vec![IssueKind::Style]);
    assert_eq!(report.issues[0].severity, Severity::Info);
    assert!(report.is_valid);
}

#[test]
fn test_lower_case_from_only_flags_wildcard() {
    assert_eq!(kinds(&validate("select * from users")), vec![IssueKind::Performance]);
    assert!(validate("SELECT a FROM _tmp").issues.is_empty());
}

#[test]
fn test_legacy_sql_marker() {
    let report = validate("#legacySQL\nSELECT a FROM [proj:ds.t]");

    assert_eq!(kinds(&report), vec![IssueKind::Compatibility]);
    assert!(report.bigquery_specific.uses_legacy_sql);
    assert_eq!(
        report.suggestions,
        vec!["Migrate to Standard SQL for better support"]
    );
}

#[test]
fn test_every_rule_in_order() {
    let report = validate("DELETE FROM users WHERE_NOT LIMIT 3 #legacySQL SELECT *");

    assert_eq!(
        kinds(&report),
        vec![
            IssueKind::Performance,
            IssueKind::Safety,
            IssueKind::Consistency,
            IssueKind::Style,
            IssueKind::Compatibility
        ]
    );
    assert_eq!(report.suggestions.len(), 5);
    assert!(!report.is_valid);
}

#[test]
fn test_disabled_kind_removed_and_validity_rederived() {
    let runner = RuleRunner::with_config(&RulesConfig {
        disabled: vec!["safety".to_string()],
        ..Default::default()
    });
    let report = runner.validate(&Query::new("DELETE FROM users"));

    assert!(report.is_valid);
    assert_eq!(kinds(&report), vec![IssueKind::Style]);
    assert_eq!(report.suggestions.len(), 1);
}

#[test]
fn test_severity_override_by_kind() {
    let mut config = RulesConfig::default();
    config
        .severity
        .insert("consistency".to_string(), "error".to_string());
    let runner = RuleRunner::with_config(&config);
    let report = runner.validate(&Query::new("SELECT a FROM `ds.t` LIMIT 1"));

    assert!(!report.is_valid);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_default_config_matches_default_runner() {
    let sql = "SELECT * FROM users LIMIT 10";
    let configured = RuleRunner::with_config(&RulesConfig::default()).validate(&Query::new(sql));

    assert_eq!(configured, validate(sql));
}

#[test]
fn test_issue_json_shape() {
    let report = validate("DELETE FROM `ds.t`");
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["is_valid"], false);
    assert_eq!(value["issues"][0]["type"], "safety");
    assert_eq!(value["issues"][0]["severity"], "error");
    assert!(value["issues"][0].get("rule_id").is_none());
    assert_eq!(value["bigquery_specific"]["has_array_syntax"], false);
}
