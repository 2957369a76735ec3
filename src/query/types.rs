use std::sync::OnceLock;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use smallvec::SmallVec;

use super::AnalyzerOptions;

/// Column reference: a bare identifier with no table binding
pub type ColumnReference = CompactString;

/// Type alias for join qualifier lists (typically < 4 elements)
pub type JoinVec = SmallVec<[JoinType; 4]>;

/// SQL text under analysis with lazily memoized derived state.
///
/// The text never changes after construction. Table references, column
/// references and the leading keyword are each computed on first request and
/// reused for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct Query {
    raw:             String,
    options:         AnalyzerOptions,
    tables_cell:     OnceLock<Vec<TableReference>>,
    columns_cell:    OnceLock<Vec<ColumnReference>>,
    query_type_cell: OnceLock<QueryType>
}

impl Query {
    /// Wrap SQL text with default analyzer options
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_options(raw, AnalyzerOptions::default())
    }

    /// Wrap SQL text with custom analyzer options
    pub fn with_options(raw: impl Into<String>, options: AnalyzerOptions) -> Self {
        Self {
            raw: raw.into(),
            options,
            tables_cell: OnceLock::new(),
            columns_cell: OnceLock::new(),
            query_type_cell: OnceLock::new()
        }
    }

    /// Raw SQL text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Table references in first-occurrence order (lazily extracted)
    pub fn tables(&self) -> &[TableReference] {
        self.tables_cell.get_or_init(|| {
            let tables = super::extract::extract_tables(&self.raw, &self.options);
            tracing::debug!(count = tables.len(), "extracted table references");
            tables
        })
    }

    /// Column references, sorted and deduplicated (lazily extracted)
    pub fn columns(&self) -> &[ColumnReference] {
        self.columns_cell.get_or_init(|| {
            let columns = super::extract::extract_columns(&self.raw);
            tracing::debug!(count = columns.len(), "extracted column references");
            columns
        })
    }

    /// Statement type from the leading keyword (lazily classified)
    pub fn query_type(&self) -> QueryType {
        *self
            .query_type_cell
            .get_or_init(|| super::structure::classify_query_type(&self.raw))
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Query {}

/// Statement type, classified from the first keyword of the trimmed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[non_exhaustive]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    With,
    Unknown
}

impl QueryType {
    /// Classify an already upper-cased keyword
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "SELECT" => Self::Select,
            "INSERT" => Self::Insert,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "CREATE" => Self::Create,
            "DROP" => Self::Drop,
            "WITH" => Self::With,
            _ => Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::With => "WITH",
            Self::Unknown => "UNKNOWN"
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a (possibly qualified) table.
///
/// `full_name` is the dotted join of the present parts and is the identity
/// used for deduplication: a backticked and a bare spelling of the same
/// qualified name are the same table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    pub project:   Option<CompactString>,
    pub dataset:   Option<CompactString>,
    pub table:     CompactString,
    pub full_name: CompactString
}

impl TableReference {
    pub fn new(project: Option<&str>, dataset: Option<&str>, table: &str) -> Self {
        let mut full_name = CompactString::default();
        for part in [project, dataset].into_iter().flatten() {
            full_name.push_str(part);
            full_name.push('.');
        }
        full_name.push_str(table);
        Self {
            project: project.map(CompactString::from),
            dataset: dataset.map(CompactString::from),
            table: CompactString::from(table),
            full_name
        }
    }

    /// Single identifier with no dataset or project qualifier
    pub fn bare(table: &str) -> Self {
        Self::new(None, None, table)
    }
}

impl std::fmt::Display for TableReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

impl Serialize for TableReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TableReference", 5)?;
        state.serialize_field("project", &self.project)?;
        state.serialize_field("dataset", &self.dataset)?;
        state.serialize_field("table", &self.table)?;
        state.serialize_field("full_name", &self.full_name)?;
        state.serialize_field("name", &self.full_name)?;
        state.end()
    }
}

/// Join qualifier preceding a JOIN keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JoinType {
    #[serde(rename = "LEFT")]
    Left,
    #[serde(rename = "RIGHT")]
    Right,
    #[serde(rename = "INNER")]
    Inner,
    #[serde(rename = "FULL OUTER")]
    FullOuter,
    #[serde(rename = "CROSS")]
    Cross
}

impl JoinType {
    /// Map an optional upper-cased qualifier; a bare JOIN is an inner join
    pub fn from_qualifier(qualifier: Option<&str>) -> Self {
        match qualifier {
            Some("LEFT") => Self::Left,
            Some("RIGHT") => Self::Right,
            Some("FULL") => Self::FullOuter,
            Some("CROSS") => Self::Cross,
            _ => Self::Inner
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Inner => "INNER",
            Self::FullOuter => "FULL OUTER",
            Self::Cross => "CROSS"
        }
    }
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural features detected in a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub query_type:           QueryType,
    pub has_joins:            bool,
    pub join_types:           JoinVec,
    pub has_subqueries:       bool,
    pub has_cte:              bool,
    pub has_aggregations:     bool,
    pub has_window_functions: bool,
    pub has_union:            bool,
    pub table_count:          usize,
    pub functions_used:       Vec<CompactString>,
    pub complexity_score:     u32
}

/// Tables and columns a query depends on.
///
/// `dependency_graph` maps every table to the whole column list: columns are
/// not attributed to the table they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub tables:           Vec<TableReference>,
    pub columns:          Vec<ColumnReference>,
    pub dependency_graph: IndexMap<CompactString, Vec<ColumnReference>>,
    pub table_count:      usize,
    pub column_count:     usize
}
