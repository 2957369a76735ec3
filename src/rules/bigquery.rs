use super::{BigQueryFeatures, Issue, IssueKind, Rule, RuleInfo, Severity};
use crate::query::{
    Query,
    patterns::{ARRAY_SYNTAX, FROM_BACKTICK, FROM_UNQUOTED, LEGACY_SQL_MARKER, STRUCT_SYNTAX}
};

/// Table referenced without backticks while no FROM uses them
pub struct UnquotedTableReference;

impl Rule for UnquotedTableReference {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "STYLE001",
            name:     "Unquoted table reference",
            kind:     IssueKind::Style,
            severity: Severity::Info
        }
    }

    fn check(&self, query: &Query) -> Option<Issue> {
        let sql = query.raw();
        if FROM_UNQUOTED.is_match(sql) && !FROM_BACKTICK.is_match(sql) {
            return Some(
                self.info()
                    .issue("Consider using backticks for table references in BigQuery")
            );
        }
        None
    }
}

/// Query opts into the deprecated legacy dialect
pub struct LegacySql;

impl Rule for LegacySql {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "COMPAT001",
            name:     "Legacy SQL",
            kind:     IssueKind::Compatibility,
            severity: Severity::Warning
        }
    }

    fn check(&self, query: &Query) -> Option<Issue> {
        uses_legacy_sql(query.raw()).then(|| {
            self.info()
                .issue("Legacy SQL is deprecated - consider using Standard SQL")
        })
    }
}

pub fn uses_legacy_sql(sql: &str) -> bool {
    sql.contains(LEGACY_SQL_MARKER)
}

/// Dialect flags, independent of which rules are enabled
pub fn detect_features(sql: &str) -> BigQueryFeatures {
    BigQueryFeatures {
        uses_legacy_sql:   uses_legacy_sql(sql),
        has_array_syntax:  ARRAY_SYNTAX.is_match(sql),
        has_struct_syntax: STRUCT_SYNTAX.is_match(sql)
    }
}
