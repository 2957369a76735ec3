use super::{Issue, IssueKind, Rule, RuleInfo, Severity};
use crate::query::{
    Query,
    patterns::{LEADING_MUTATION, LIMIT_CLAUSE, ORDER_BY, WHERE_KEYWORD, WILDCARD_SELECT}
};

/// SELECT * reads every column
pub struct WildcardSelect;

impl Rule for WildcardSelect {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF001",
            name:     "Wildcard select",
            kind:     IssueKind::Performance,
            severity: Severity::Warning
        }
    }

    fn check(&self, query: &Query) -> Option<Issue> {
        WILDCARD_SELECT.is_match(query.raw()).then(|| {
            self.info()
                .issue("SELECT * may impact performance - consider specifying columns")
        })
    }
}

/// DELETE or UPDATE with no WHERE anywhere in the text
pub struct UnscopedMutation;

impl Rule for UnscopedMutation {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "SAFE001",
            name:     "Unscoped mutation",
            kind:     IssueKind::Safety,
            severity: Severity::Error
        }
    }

    fn check(&self, query: &Query) -> Option<Issue> {
        let sql = query.raw();
        if LEADING_MUTATION.is_match(sql) && !WHERE_KEYWORD.is_match(sql) {
            return Some(
                self.info()
                    .issue("DELETE/UPDATE without WHERE clause affects all rows")
            );
        }
        None
    }
}

/// LIMIT without ORDER BY returns an arbitrary subset
pub struct UnorderedLimit;

impl Rule for UnorderedLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "CONS001",
            name:     "Limit without order",
            kind:     IssueKind::Consistency,
            severity: Severity::Warning
        }
    }

    fn check(&self, query: &Query) -> Option<Issue> {
        let sql = query.raw();
        if LIMIT_CLAUSE.is_match(sql) && !ORDER_BY.is_match(sql) {
            return Some(
                self.info()
                    .issue("LIMIT without ORDER BY may return inconsistent results")
            );
        }
        None
    }
}
