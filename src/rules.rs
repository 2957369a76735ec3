//! Heuristic anti-pattern checks for BigQuery SQL.
//!
//! Each check is a type implementing [`Rule`]. The [`RuleRunner`] runs the
//! enabled rules against a [`Query`] in a fixed order and folds the findings
//! into a [`SyntaxReport`].
//!
//! # Rules
//!
//! | Id          | Kind          | Severity | Fires when                                   |
//! |-------------|---------------|----------|----------------------------------------------|
//! | `PERF001`   | performance   | warning  | `SELECT *` appears anywhere                  |
//! | `SAFE001`   | safety        | error    | text starts with DELETE/UPDATE, no `WHERE`   |
//! | `CONS001`   | consistency   | warning  | `LIMIT <n>` without `ORDER BY`               |
//! | `STYLE001`  | style         | info     | `FROM name` with no backticked `FROM`        |
//! | `COMPAT001` | compatibility | warning  | the `#legacySQL` marker is present           |
//!
//! # Configuration
//!
//! Rules can be disabled, by id or by kind, or have their severity changed
//! via [`RulesConfig`]:
//!
//! ```toml
//! [rules]
//! disabled = ["STYLE001"]
//!
//! [rules.severity]
//! CONS001 = "error"
//! ```
//!
//! # Example
//!
//! ```
//! use bq_sql_analyzer::{
//!     query::Query,
//!     rules::{IssueKind, RuleRunner}
//! };
//!
//! let report = RuleRunner::new().validate(&Query::new("DELETE FROM users"));
//!
//! assert!(!report.is_valid);
//! assert_eq!(report.issues[0].kind, IssueKind::Safety);
//! ```

mod bigquery;
mod common;
mod types;

use std::{collections::HashMap, sync::LazyLock};

pub use bigquery::{detect_features, uses_legacy_sql};
pub use types::{BigQueryFeatures, Issue, IssueKind, RuleInfo, Severity, SyntaxReport};

use crate::{config::RulesConfig, query::Query};

/// A single heuristic check.
///
/// Rules are stateless and report at most one issue per query.
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Returns the issue this rule raises for `query`, if any.
    fn check(&self, query: &Query) -> Option<Issue>;
}

/// Rule execution engine.
///
/// Rules run in registration order, which is also the order of
/// [`SyntaxReport::issues`].
pub struct RuleRunner {
    rules:          Vec<Box<dyn Rule>>,
    severity_cache: HashMap<&'static str, Severity>
}

impl Default for RuleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRunner")
            .field("rules", &self.rule_ids())
            .field("severity_cache", &self.severity_cache)
            .finish()
    }
}

impl RuleRunner {
    /// Create a new runner with all built-in rules
    pub fn new() -> Self {
        Self::with_config(&RulesConfig::default())
    }

    /// Create a runner honoring disabled rules and severity overrides.
    ///
    /// Both `disabled` entries and `severity` keys match a rule id
    /// (`SAFE001`) or an issue kind (`safety`), case-insensitively. An id
    /// override wins over a kind override. Unknown severity names are
    /// ignored.
    pub fn with_config(config: &RulesConfig) -> Self {
        let all_rules: Vec<Box<dyn Rule>> = vec![
            Box::new(common::WildcardSelect),
            Box::new(common::UnscopedMutation),
            Box::new(common::UnorderedLimit),
            Box::new(bigquery::UnquotedTableReference),
            Box::new(bigquery::LegacySql)
        ];
        let rules: Vec<Box<dyn Rule>> = all_rules
            .into_iter()
            .filter(|r| {
                let info = r.info();
                !config
                    .disabled
                    .iter()
                    .any(|d| matches_rule(d, &info))
            })
            .collect();
        let mut severity_cache = HashMap::new();
        for rule in &rules {
            let info = rule.info();
            if let Some(sev) = configured_severity(config, &info) {
                severity_cache.insert(info.id, sev);
            }
        }
        tracing::debug!(
            rules = rules.len(),
            overrides = severity_cache.len(),
            "rule runner configured"
        );
        Self {
            rules,
            severity_cache
        }
    }

    /// Ids of the enabled rules, in run order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.info().id).collect()
    }

    /// Run every enabled rule against `query`
    pub fn validate(&self, query: &Query) -> SyntaxReport {
        let issues: Vec<Issue> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(query))
            .map(|mut issue| {
                if let Some(&severity) = self.severity_cache.get(issue.rule_id) {
                    issue.severity = severity;
                }
                issue
            })
            .collect();
        tracing::debug!(issues = issues.len(), "syntax checks finished");
        SyntaxReport::from_issues(issues, detect_features(query.raw()))
    }
}

static DEFAULT_RUNNER: LazyLock<RuleRunner> = LazyLock::new(RuleRunner::new);

/// Shared runner with the built-in rule set and no overrides
pub fn default_runner() -> &'static RuleRunner {
    &DEFAULT_RUNNER
}

/// Parse severity string to enum
pub fn parse_severity(s: &str) -> Option<Severity> {
    Severity::parse(s)
}

fn matches_rule(key: &str, info: &RuleInfo) -> bool {
    let key = key.trim();
    key.eq_ignore_ascii_case(info.id) || key.eq_ignore_ascii_case(info.kind.as_str())
}

fn configured_severity(config: &RulesConfig, info: &RuleInfo) -> Option<Severity> {
    let by_id = config
        .severity
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(info.id))
        .and_then(|(_, v)| parse_severity(v));
    by_id.or_else(|| {
        config
            .severity
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(info.kind.as_str()))
            .and_then(|(_, v)| parse_severity(v))
    })
}
