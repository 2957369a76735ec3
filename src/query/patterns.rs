//! Regular expressions driving the heuristic analysis.
//!
//! Every pattern is a named, lazily compiled static so it can be tested and
//! replaced on its own. The `regex` crate matches with finite automata: there
//! is no backtracking, so each search runs in time linear in the input no
//! matter how the text is constructed. Patterns must stay within that subset
//! (no look-around, no back-references).

use std::sync::LazyLock;

use regex::Regex;

/// Number of dotted parts a table pattern captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableParts {
    /// `project.dataset.table`
    Three,
    /// `dataset.table`
    Two,
    /// `table`
    One
}

/// Backticked `project.dataset.table` after FROM.
pub static FROM_QUOTED_THREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFROM\s+`([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)`")
        .expect("valid regex")
});

/// Backticked `project.dataset.table` after JOIN.
pub static JOIN_QUOTED_THREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bJOIN\s+`([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)`")
        .expect("valid regex")
});

/// Backticked `dataset.table` after FROM.
pub static FROM_QUOTED_TWO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFROM\s+`([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)`").expect("valid regex")
});

/// Backticked `dataset.table` after JOIN.
pub static JOIN_QUOTED_TWO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bJOIN\s+`([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)`").expect("valid regex")
});

/// Unquoted `project.dataset.table` after FROM, terminated by whitespace or
/// end of text.
pub static FROM_BARE_THREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFROM\s+([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)(?:\s|$)")
        .expect("valid regex")
});

/// Unquoted `project.dataset.table` after JOIN.
pub static JOIN_BARE_THREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bJOIN\s+([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)(?:\s|$)")
        .expect("valid regex")
});

/// Unquoted `dataset.table` after FROM.
pub static FROM_BARE_TWO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFROM\s+([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)(?:\s|$)").expect("valid regex")
});

/// Unquoted `dataset.table` after JOIN.
pub static JOIN_BARE_TWO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bJOIN\s+([a-zA-Z0-9_-]+)\.([a-zA-Z0-9_-]+)(?:\s|$)").expect("valid regex")
});

/// Single identifier after FROM with an optional alias. A following `.`
/// prevents the match, so qualified names never yield a bare candidate.
pub static FROM_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFROM\s+([a-zA-Z0-9_]+)(?:\s+[a-zA-Z0-9_]+)?(?:\s|$|,)")
        .expect("valid regex")
});

/// Single identifier after JOIN with an optional alias.
pub static JOIN_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bJOIN\s+([a-zA-Z0-9_]+)(?:\s+[a-zA-Z0-9_]+)?(?:\s+ON|\s|$)")
        .expect("valid regex")
});

/// Table patterns in evaluation order, most specific first.
pub fn table_patterns() -> [(&'static Regex, TableParts); 10] {
    [
        (&*FROM_QUOTED_THREE, TableParts::Three),
        (&*JOIN_QUOTED_THREE, TableParts::Three),
        (&*FROM_QUOTED_TWO, TableParts::Two),
        (&*JOIN_QUOTED_TWO, TableParts::Two),
        (&*FROM_BARE_THREE, TableParts::Three),
        (&*JOIN_BARE_THREE, TableParts::Three),
        (&*FROM_BARE_TWO, TableParts::Two),
        (&*JOIN_BARE_TWO, TableParts::Two),
        (&*FROM_SINGLE, TableParts::One),
        (&*JOIN_SINGLE, TableParts::One)
    ]
}

/// Projection list: text between the first SELECT and the next FROM.
pub static SELECT_WINDOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bSELECT\s+(.*?)\s+FROM\b").expect("valid regex"));

/// Predicate: text after WHERE up to GROUP BY, ORDER BY, LIMIT or the end.
pub static WHERE_WINDOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bWHERE\s+(.*?)(?:\s+GROUP\s+BY|\s+ORDER\s+BY|\s+LIMIT|\s*$)")
        .expect("valid regex")
});

/// Any identifier token.
pub static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-zA-Z_][a-zA-Z0-9_]*)\b").expect("valid regex"));

/// Identifier directly followed by a comparison or membership operator.
pub static PREDICATE_OPERAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-zA-Z_][a-zA-Z0-9_]*)\b\s*(?:[=<>!]|IS|IN|LIKE)").expect("valid regex")
});

/// First keyword token of the text.
pub static LEADING_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z]+)").expect("valid regex"));

/// Any JOIN keyword.
pub static JOIN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\b").expect("valid regex"));

/// JOIN keyword with its optional qualifier (`LEFT OUTER`, `CROSS`, ...).
pub static JOIN_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:(LEFT|RIGHT|FULL|INNER|CROSS)\s+(?:OUTER\s+)?)?JOIN\b")
        .expect("valid regex")
});

/// Parenthesized nested SELECT.
pub static SUBQUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*SELECT\b").expect("valid regex"));

/// Leading WITH clause.
pub static CTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*WITH\b").expect("valid regex"));

/// Aggregate function call.
pub static AGGREGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:COUNT|COUNTIF|SUM|AVG|MIN|MAX|ARRAY_AGG|STRING_AGG|ANY_VALUE|APPROX_COUNT_DISTINCT|LOGICAL_AND|LOGICAL_OR|STDDEV|VARIANCE)\s*\("
    )
    .expect("valid regex")
});

/// Window clause.
pub static WINDOW_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOVER\s*\(").expect("valid regex"));

/// UNION set operator.
pub static UNION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUNION\b").expect("valid regex"));

/// Identifier directly followed by an opening parenthesis.
pub static FUNCTION_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid regex"));

/// `SELECT *`.
pub static WILDCARD_SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT\s+\*").expect("valid regex"));

/// Leading DELETE or UPDATE.
pub static LEADING_MUTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:DELETE|UPDATE)\b").expect("valid regex"));

/// WHERE keyword anywhere.
pub static WHERE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").expect("valid regex"));

/// `LIMIT <n>`.
pub static LIMIT_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\s+\d+").expect("valid regex"));

/// `ORDER BY`.
pub static ORDER_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\b").expect("valid regex"));

/// Upper-case FROM followed by an unquoted identifier starting with a letter.
pub static FROM_UNQUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFROM\s+[a-zA-Z]").expect("valid regex"));

/// Upper-case FROM followed by a backtick.
pub static FROM_BACKTICK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFROM\s+`").expect("valid regex"));

/// `ARRAY[` or `ARRAY<`.
pub static ARRAY_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bARRAY\s*[\[<]").expect("valid regex"));

/// `STRUCT(` or `STRUCT<`.
pub static STRUCT_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSTRUCT\s*[(<]").expect("valid regex"));

/// Dialect marker selecting legacy SQL.
pub const LEGACY_SQL_MARKER: &str = "#legacySQL";
