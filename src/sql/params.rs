//! Values that can be bound to a SQLite statement.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// One positional parameter. Built from typed record fields, never from SQL text.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::Int(n)
    }
}

impl From<f64> for BindValue {
    fn from(n: f64) -> Self {
        BindValue::Real(n)
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(BindValue::Null)
    }
}

/// Bind every parameter in order.
pub fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[BindValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            BindValue::Null => query.bind(None::<i64>),
            BindValue::Int(n) => query.bind(*n),
            BindValue::Real(n) => query.bind(*n),
            BindValue::Text(s) => query.bind(s.clone()),
        };
    }
    query
}
