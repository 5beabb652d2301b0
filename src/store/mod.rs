//! Persistence gateway over a single-file SQLite store.
//!
//! Exposes three primitives, `get`, `all` and `run`, on the pool and on a transaction.
//! Every call is bounded by the configured query timeout.

pub mod queries;

use crate::config::Settings;
use crate::error::AppError;
use crate::sql::{bind_all, BindValue};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Executor, FromRow, Sqlite, Transaction};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// Mutation metadata returned by `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunResult {
    pub last_insert_id: i64,
    pub rows_affected: u64,
}

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    timeout: Duration,
}

impl Store {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Store { pool, timeout }
    }

    /// Open (creating the file if missing) with foreign keys enforced. Writers blocked by
    /// another connection wait up to the query timeout.
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(settings.query_timeout);
        let in_memory = settings.database_url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.query_timeout);
        if in_memory {
            // Each in-memory connection is its own database; keep exactly one alive.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        tracing::info!(url = %settings.database_url, max_connections = settings.max_connections, "opening store");
        let pool = pool_options.connect_with(options).await?;
        Ok(Store::new(pool, settings.query_timeout))
    }

    pub async fn get<T>(&self, sql: &str, params: &[BindValue]) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        with_timeout(self.timeout, fetch_optional(&self.pool, sql, params)).await
    }

    pub async fn all<T>(&self, sql: &str, params: &[BindValue]) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        with_timeout(self.timeout, fetch_all(&self.pool, sql, params)).await
    }

    pub async fn run(&self, sql: &str, params: &[BindValue]) -> Result<RunResult, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "execute");
        with_timeout(self.timeout, execute(&self.pool, sql, params)).await
    }

    pub async fn begin(&self) -> Result<StoreTx, AppError> {
        let tx = with_timeout(self.timeout, self.pool.begin()).await?;
        Ok(StoreTx {
            tx,
            timeout: self.timeout,
        })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        with_timeout(self.timeout, async {
            sqlx::query("SELECT 1").execute(&self.pool).await.map(|_| ())
        })
        .await
    }
}

/// Transactional handle with the same primitives. Dropped without `commit` it rolls back.
pub struct StoreTx {
    tx: Transaction<'static, Sqlite>,
    timeout: Duration,
}

impl StoreTx {
    pub async fn get<T>(&mut self, sql: &str, params: &[BindValue]) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query (tx)");
        with_timeout(self.timeout, fetch_optional(&mut *self.tx, sql, params)).await
    }

    pub async fn run(&mut self, sql: &str, params: &[BindValue]) -> Result<RunResult, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "execute (tx)");
        with_timeout(self.timeout, execute(&mut *self.tx, sql, params)).await
    }

    pub async fn commit(self) -> Result<(), AppError> {
        with_timeout(self.timeout, self.tx.commit()).await
    }
}

async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::Timeout(timeout)),
    }
}

async fn fetch_optional<'c, E, T>(exec: E, sql: &str, params: &[BindValue]) -> Result<Option<T>, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let row = bind_all(sqlx::query(sql), params).fetch_optional(exec).await?;
    row.map(|r| T::from_row(&r)).transpose()
}

async fn fetch_all<'c, E, T>(exec: E, sql: &str, params: &[BindValue]) -> Result<Vec<T>, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let rows = bind_all(sqlx::query(sql), params).fetch_all(exec).await?;
    rows.iter().map(T::from_row).collect()
}

async fn execute<'c, E>(exec: E, sql: &str, params: &[BindValue]) -> Result<RunResult, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    let done = bind_all(sqlx::query(sql), params).execute(exec).await?;
    Ok(RunResult {
        last_insert_id: done.last_insert_rowid(),
        rows_affected: done.rows_affected(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> Store {
        let settings = Settings {
            database_url: "sqlite::memory:".into(),
            ..Settings::default()
        };
        let store = Store::connect(&settings).await.expect("in-memory store");
        store
            .run("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE)", &[])
            .await
            .expect("create table");
        store
    }

    #[tokio::test]
    async fn run_reports_insert_id_and_affected_rows() {
        let store = memory_store().await;
        let first = store.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("a")]).await.expect("insert");
        let second = store.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("b")]).await.expect("insert");
        assert_eq!(first, RunResult { last_insert_id: 1, rows_affected: 1 });
        assert_eq!(second.last_insert_id, 2);

        let gone = store.run("DELETE FROM t WHERE id = ?", &[BindValue::Int(99)]).await.expect("delete");
        assert_eq!(gone.rows_affected, 0);
    }

    #[tokio::test]
    async fn get_and_all_decode_rows() {
        let store = memory_store().await;
        store.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("a")]).await.expect("insert");
        let row: Option<(i64, String)> = store.get("SELECT id, name FROM t WHERE id = ?", &[BindValue::Int(1)]).await.expect("get");
        assert_eq!(row, Some((1, "a".to_string())));
        let missing: Option<(i64, String)> = store.get("SELECT id, name FROM t WHERE id = ?", &[BindValue::Int(2)]).await.expect("get");
        assert!(missing.is_none());
        let all: Vec<(i64, String)> = store.all("SELECT id, name FROM t", &[]).await.expect("all");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn unique_violations_are_constraint_errors() {
        let store = memory_store().await;
        store.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("a")]).await.expect("insert");
        let err = store.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("a")]).await.unwrap_err();
        assert!(matches!(err, AppError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let store = memory_store().await;
        {
            let mut tx = store.begin().await.expect("begin");
            tx.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("a")]).await.expect("insert");
        }
        let all: Vec<(i64, String)> = store.all("SELECT id, name FROM t", &[]).await.expect("all");
        assert!(all.is_empty());

        let mut tx = store.begin().await.expect("begin");
        tx.run("INSERT INTO t (name) VALUES (?)", &[BindValue::from("b")]).await.expect("insert");
        tx.commit().await.expect("commit");
        let all: Vec<(i64, String)> = store.all("SELECT id, name FROM t", &[]).await.expect("all");
        assert_eq!(all.len(), 1);
    }
}
