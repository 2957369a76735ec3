use compact_str::CompactString;
use indexmap::IndexSet;
use serde::Serialize;

use super::{
    JoinType, JoinVec, Query, QueryType, StructureReport,
    patterns::{
        AGGREGATION, CTE, FUNCTION_CALL, JOIN_CLAUSE, JOIN_KEYWORD, LEADING_KEYWORD, SUBQUERY,
        UNION, WINDOW_CLAUSE
    }
};

/// Function names reported in `functions_used`
const KNOWN_FUNCTIONS: &[&str] = &[
    // aggregate
    "COUNT", "COUNTIF", "SUM", "AVG", "MIN", "MAX", "ARRAY_AGG", "STRING_AGG", "ANY_VALUE",
    "APPROX_COUNT_DISTINCT", "LOGICAL_AND", "LOGICAL_OR", "STDDEV", "VARIANCE",
    // window
    "ROW_NUMBER", "RANK", "DENSE_RANK", "PERCENT_RANK", "NTILE", "LAG", "LEAD", "FIRST_VALUE",
    "LAST_VALUE", "NTH_VALUE",
    // date and time
    "DATE", "DATETIME", "TIME", "TIMESTAMP", "CURRENT_DATE", "CURRENT_DATETIME",
    "CURRENT_TIMESTAMP", "DATE_ADD", "DATE_SUB", "DATE_DIFF", "DATE_TRUNC", "DATETIME_TRUNC",
    "TIMESTAMP_ADD", "TIMESTAMP_SUB", "TIMESTAMP_DIFF", "TIMESTAMP_TRUNC", "FORMAT_DATE",
    "FORMAT_TIMESTAMP", "PARSE_DATE", "PARSE_TIMESTAMP", "EXTRACT",
    // conversion and conditional
    "CAST", "SAFE_CAST", "COALESCE", "IFNULL", "NULLIF", "IF",
    // string
    "CONCAT", "LOWER", "UPPER", "TRIM", "LTRIM", "RTRIM", "SUBSTR", "SUBSTRING", "REPLACE",
    "SPLIT", "LENGTH", "STARTS_WITH", "ENDS_WITH", "REGEXP_CONTAINS", "REGEXP_EXTRACT",
    "REGEXP_REPLACE", "FORMAT",
    // math
    "ABS", "ROUND", "FLOOR", "CEIL", "MOD", "POW", "SQRT", "SAFE_DIVIDE", "GREATEST", "LEAST",
    // arrays, structs and json
    "ARRAY", "ARRAY_LENGTH", "ARRAY_CONCAT", "ARRAY_TO_STRING", "GENERATE_ARRAY",
    "GENERATE_DATE_ARRAY", "UNNEST", "STRUCT", "TO_JSON_STRING", "JSON_EXTRACT",
    "JSON_EXTRACT_SCALAR", "JSON_VALUE", "JSON_QUERY",
    // hashing
    "FARM_FINGERPRINT", "MD5", "SHA256", "GENERATE_UUID"
];

const TABLE_WEIGHT: u32 = 5;
const JOIN_WEIGHT: u32 = 8;
const FUNCTION_WEIGHT: u32 = 2;
const SUBQUERY_WEIGHT: u32 = 15;
const CTE_WEIGHT: u32 = 10;
const AGGREGATION_WEIGHT: u32 = 10;
const WINDOW_WEIGHT: u32 = 15;
const UNION_WEIGHT: u32 = 10;
const MAX_COMPLEXITY: u32 = 100;

/// Coarse complexity bucket for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High
}

impl ComplexityLevel {
    pub fn from_score(score: u32) -> Self {
        if score < 20 {
            Self::Low
        } else if score < 50 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High")
        }
    }
}

/// Classify the statement by its first keyword
pub fn classify_query_type(sql: &str) -> QueryType {
    LEADING_KEYWORD
        .captures(sql)
        .and_then(|c| c.get(1))
        .map(|m| QueryType::from_keyword(&m.as_str().to_ascii_uppercase()))
        .unwrap_or(QueryType::Unknown)
}

/// Join qualifiers in order of appearance; an unqualified JOIN is INNER
pub fn join_types(sql: &str) -> JoinVec {
    JOIN_CLAUSE
        .captures_iter(sql)
        .map(|c| {
            let qualifier = c.get(1).map(|m| m.as_str().to_ascii_uppercase());
            JoinType::from_qualifier(qualifier.as_deref())
        })
        .collect()
}

/// Known functions called in the text, upper-cased, in first-appearance order
pub fn functions_used(sql: &str) -> Vec<CompactString> {
    let mut seen: IndexSet<CompactString> = IndexSet::new();
    for caps in FUNCTION_CALL.captures_iter(sql) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let upper = name.as_str().to_ascii_uppercase();
        if KNOWN_FUNCTIONS.contains(&upper.as_str()) {
            seen.insert(upper.into());
        }
    }
    seen.into_iter().collect()
}

pub fn has_joins(sql: &str) -> bool {
    JOIN_KEYWORD.is_match(sql)
}

pub fn has_subqueries(sql: &str) -> bool {
    SUBQUERY.is_match(sql)
}

pub fn has_cte(sql: &str) -> bool {
    CTE.is_match(sql)
}

pub fn has_aggregations(sql: &str) -> bool {
    AGGREGATION.is_match(sql)
}

pub fn has_window_functions(sql: &str) -> bool {
    WINDOW_CLAUSE.is_match(sql)
}

pub fn has_union(sql: &str) -> bool {
    UNION.is_match(sql)
}

/// Analyze structural features of a query.
///
/// Query type and table count come from the memoized [`Query`] state; the
/// feature flags are matched against the raw text.
pub fn structure_report(query: &Query) -> StructureReport {
    let sql = query.raw();
    let mut report = StructureReport {
        query_type:           query.query_type(),
        has_joins:            has_joins(sql),
        join_types:           join_types(sql),
        has_subqueries:       has_subqueries(sql),
        has_cte:              has_cte(sql),
        has_aggregations:     has_aggregations(sql),
        has_window_functions: has_window_functions(sql),
        has_union:            has_union(sql),
        table_count:          query.tables().len(),
        functions_used:       functions_used(sql),
        complexity_score:     0
    };
    report.complexity_score = complexity_score(&report);
    report
}

/// Weighted sum of detected features, clamped to 0..=100.
///
/// Every term is non-negative, so adding a feature never lowers the score.
pub fn complexity_score(report: &StructureReport) -> u32 {
    let flag = |on: bool, weight: u32| if on { weight } else { 0 };
    let extra_tables = report.table_count.saturating_sub(1) as u32;
    let score = extra_tables
        .saturating_mul(TABLE_WEIGHT)
        .saturating_add((report.join_types.len() as u32).saturating_mul(JOIN_WEIGHT))
        .saturating_add((report.functions_used.len() as u32).saturating_mul(FUNCTION_WEIGHT))
        .saturating_add(flag(report.has_subqueries, SUBQUERY_WEIGHT))
        .saturating_add(flag(report.has_cte, CTE_WEIGHT))
        .saturating_add(flag(report.has_aggregations, AGGREGATION_WEIGHT))
        .saturating_add(flag(report.has_window_functions, WINDOW_WEIGHT))
        .saturating_add(flag(report.has_union, UNION_WEIGHT));
    score.min(MAX_COMPLEXITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_query_type() {
        assert_eq!(classify_query_type("  select 1"), QueryType::Select);
        assert_eq!(classify_query_type("WITH x AS (SELECT 1) SELECT 1"), QueryType::With);
        assert_eq!(classify_query_type("create table t (a INT64)"), QueryType::Create);
        assert_eq!(classify_query_type("MERGE t USING s ON TRUE"), QueryType::Unknown);
        assert_eq!(classify_query_type(""), QueryType::Unknown);
        assert_eq!(classify_query_type("(SELECT 1)"), QueryType::Unknown);
    }

    #[test]
    fn test_join_types_in_order() {
        let sql = "SELECT * FROM a JOIN b ON TRUE LEFT OUTER JOIN c ON TRUE \
                   FULL OUTER JOIN d ON TRUE CROSS JOIN e RIGHT JOIN f ON TRUE LEFT JOIN g ON TRUE";
        let joins: Vec<&str> = join_types(sql).iter().map(|j| j.as_str()).collect();
        assert_eq!(
            joins,
            vec!["INNER", "LEFT", "FULL OUTER", "CROSS", "RIGHT", "LEFT"]
        );
    }

    #[test]
    fn test_functions_used_dedup_in_order() {
        let funcs = functions_used("SELECT sum(a), COUNT(*), SUM(b), my_udf(c), DATE(ts) FROM t");
        assert_eq!(funcs, vec!["SUM", "COUNT", "DATE"]);
    }

    #[test]
    fn test_over_and_in_are_not_functions() {
        let funcs = functions_used("SELECT ROW_NUMBER() OVER (ORDER BY a) FROM t WHERE b IN (1)");
        assert_eq!(funcs, vec!["ROW_NUMBER"]);
    }

    #[test]
    fn test_feature_flags() {
        let sql = "SELECT a FROM t WHERE a IN (SELECT b FROM u) UNION ALL SELECT c FROM v";
        assert!(has_subqueries(sql));
        assert!(has_union(sql));
        assert!(!has_cte(sql));
        assert!(!has_window_functions(sql));
        assert!(!has_aggregations(sql));
    }

    #[test]
    fn test_complexity_zero_for_trivial_query() {
        let report = structure_report(&Query::new("SELECT 1"));
        assert_eq!(report.complexity_score, 0);
    }

    #[test]
    fn test_complexity_clamped() {
        let mut sql = String::from("WITH c AS (SELECT 1) SELECT COUNT(*) OVER (), (SELECT 1) FROM t0");
        for i in 1..30 {
            sql.push_str(&format!(" JOIN t{} ON TRUE", i));
        }
        sql.push_str(" UNION ALL SELECT 1");
        let report = structure_report(&Query::new(sql));
        assert_eq!(report.complexity_score, 100);
    }

    #[test]
    fn test_complexity_level() {
        assert_eq!(ComplexityLevel::from_score(0), ComplexityLevel::Low);
        assert_eq!(ComplexityLevel::from_score(20), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::from_score(99), ComplexityLevel::High);
    }
}
