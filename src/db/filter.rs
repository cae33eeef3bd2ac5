//! Translate a [`ToolFilter`] into a parameterized WHERE clause.

use crate::models::{ToolFilter, ToolPredicate};

/// SQL dialect the clause is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `$1, $2, …` placeholders; enum columns compared as text.
    Postgres,
    /// `?` placeholders.
    Sqlite,
}

impl Dialect {
    fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", index),
            Dialect::Sqlite => "?".to_string(),
        }
    }

    fn status_column(&self) -> &'static str {
        match self {
            Dialect::Postgres => "t.status::TEXT",
            Dialect::Sqlite => "t.status",
        }
    }
}

/// Result of translating a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    /// `WHERE …` fragment, empty when no predicate is active
    pub where_clause: String,
    /// Bind values in order
    pub bindings: Vec<SqlValue>,
}

impl SqlFilter {
    /// 1-based index of the next placeholder after the filter's own.
    pub fn next_index(&self) -> usize {
        self.bindings.len() + 1
    }
}

/// SQL bind value types.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
}

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE.
pub fn escape_like_pattern(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Render the filter's predicates against the `tools t` alias.
pub fn tool_filter_sql(filter: &ToolFilter, dialect: Dialect) -> SqlFilter {
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    for predicate in filter.predicates() {
        let placeholder = dialect.placeholder(bindings.len() + 1);
        match predicate {
            ToolPredicate::Status(status) => {
                conditions.push(format!("{} = {}", dialect.status_column(), placeholder));
                bindings.push(SqlValue::Text(status.as_str().to_string()));
            }
            ToolPredicate::CategoryId(id) => {
                conditions.push(format!("t.category_id = {}", placeholder));
                bindings.push(SqlValue::Int(id));
            }
            ToolPredicate::VendorContains(vendor) => {
                conditions.push(format!(
                    "LOWER(t.vendor) LIKE LOWER({}) ESCAPE '\\'",
                    placeholder
                ));
                bindings.push(SqlValue::Text(format!("%{}%", escape_like_pattern(&vendor))));
            }
            ToolPredicate::NameContains(name) => {
                conditions.push(format!(
                    "LOWER(t.name) LIKE LOWER({}) ESCAPE '\\'",
                    placeholder
                ));
                bindings.push(SqlValue::Text(format!("%{}%", escape_like_pattern(&name))));
            }
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    SqlFilter {
        where_clause,
        bindings,
    }
}
