//! Builds parameterized SELECT and UPDATE statements from sparse filters and patches.

use super::params::BindValue;

/// Ordered field-to-column mapping of a sparse filter or patch.
///
/// Implementations list every whitelisted column in a fixed order, whether or not the
/// caller supplied a value. `None` marks a field as absent; each field decides that with
/// [`text`], [`nullable_text`] or [`value`], so the same field always lands in the same
/// relative position of the generated clause.
pub trait SparseFields {
    fn fields(&self) -> Vec<(&'static str, Option<BindValue>)>;
}

/// Required text column: present when supplied and non-empty.
pub fn text(v: &Option<String>) -> Option<BindValue> {
    v.as_deref().filter(|s| !s.is_empty()).map(BindValue::from)
}

/// Optional text column: present whenever supplied, so `""` clears it.
pub fn nullable_text(v: &Option<String>) -> Option<BindValue> {
    v.clone().map(BindValue::Text)
}

/// Numeric column: present when supplied.
pub fn value<T: Into<BindValue>>(v: Option<T>) -> Option<BindValue> {
    v.map(Into::into)
}

/// Quote identifier for SQLite (safe: only from static mappings).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// `"column" = ?` fragments and their bound values, in mapping order.
#[derive(Clone, Debug, Default, PartialEq)]
struct ClauseBuilder {
    fragments: Vec<String>,
    params: Vec<BindValue>,
}

impl ClauseBuilder {
    fn from_fields<F: SparseFields + ?Sized>(source: &F) -> Self {
        let mut clause = ClauseBuilder::default();
        for (column, value) in source.fields() {
            if let Some(value) = value {
                clause.fragments.push(format!("{} = ?", quoted(column)));
                clause.params.push(value);
            }
        }
        clause
    }

    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// SELECT list with optional exact-match filters, ORDER BY id.
pub fn select_list<F: SparseFields + ?Sized>(table: &str, filter: &F) -> QueryBuf {
    let clause = ClauseBuilder::from_fields(filter);
    let where_clause = if clause.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clause.fragments.join(" AND "))
    };
    QueryBuf {
        sql: format!("SELECT * FROM {}{} ORDER BY {}", quoted(table), where_clause, quoted("id")),
        params: clause.params,
    }
}

/// UPDATE by id: SET only the present fields. `None` when the patch has nothing to apply.
pub fn update<F: SparseFields + ?Sized>(table: &str, id: i64, patch: &F) -> Option<QueryBuf> {
    let clause = ClauseBuilder::from_fields(patch);
    if clause.is_empty() {
        return None;
    }
    let mut params = clause.params;
    params.push(BindValue::Int(id));
    Some(QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quoted(table),
            clause.fragments.join(", "),
            quoted("id")
        ),
        params,
    })
}

/// SELECT rows where `column` equals the first value and `in_column` is one of `values`.
/// With no values the statement matches nothing.
pub fn select_where_in(table: &str, column: &str, key: BindValue, in_column: &str, values: &[String]) -> QueryBuf {
    if values.is_empty() {
        return QueryBuf {
            sql: format!("SELECT * FROM {} WHERE 1 = 0", quoted(table)),
            params: Vec::new(),
        };
    }
    let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
    let mut params = vec![key];
    params.extend(values.iter().map(|v| BindValue::Text(v.clone())));
    QueryBuf {
        sql: format!(
            "SELECT * FROM {} WHERE {} = ? AND {} IN ({}) ORDER BY {} LIMIT 1",
            quoted(table),
            quoted(column),
            quoted(in_column),
            placeholders.join(", "),
            quoted("id")
        ),
        params,
    }
}
