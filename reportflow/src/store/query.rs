//! Parameterized data queries.
//!
//! A [`QuerySpec`] is structured data, not SQL text: the entity value is only ever
//! bound as a parameter, and identifiers are quoted when rendered.

use serde::Serialize;

use crate::state::EntityFilter;

/// Substring match of one value against several columns (OR-combined).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubstringFilter {
    pub columns: Vec<String>,
    pub value: String,
}

/// Select over one table, optionally filtered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    pub table: String,
    pub filter: Option<SubstringFilter>,
}

/// SQL text plus positional parameters, ready for the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl QuerySpec {
    /// Unfiltered select over `table`.
    pub fn all(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: None,
        }
    }

    /// Rows of `table` where any of `columns` contains `value`.
    pub fn matching(table: impl Into<String>, columns: &[String], value: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: Some(SubstringFilter {
                columns: columns.to_vec(),
                value: value.into(),
            }),
        }
    }

    /// Query for an entity filter: `All` selects everything, a named entity is
    /// matched against `columns`.
    pub fn for_entity(table: &str, columns: &[String], entity: &EntityFilter) -> Self {
        match entity {
            EntityFilter::All => Self::all(table),
            EntityFilter::Named(value) => Self::matching(table, columns, value.as_str()),
        }
    }

    /// Renders SQLite text with `?1` bound to the escaped `%value%` pattern.
    pub fn to_sql(&self) -> SqlQuery {
        let mut sql = format!("SELECT * FROM {}", quote_ident(&self.table));
        let mut params = Vec::new();
        if let Some(filter) = &self.filter {
            if filter.columns.is_empty() {
                sql.push_str(" WHERE 0");
            } else {
                let clauses: Vec<String> = filter
                    .columns
                    .iter()
                    .map(|c| format!("{} LIKE ?1 ESCAPE '\\'", quote_ident(c)))
                    .collect();
                sql.push_str(&format!(" WHERE ({})", clauses.join(" OR ")));
                params.push(format!("%{}%", escape_like(&filter.value)));
            }
        }
        SqlQuery { sql, params }
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
