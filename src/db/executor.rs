//! Query execution over pooled connections

use super::pool::ConnectionPool;
use super::value::{Statement, WriteOutcome};
use crate::error::{AppError, Result};
use metrics::{counter, histogram};
use sqlx::mysql::MySqlRow;
use sqlx::{Connection, FromRow};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Runs parameterized statements, one pooled connection per call.
///
/// Every call runs inside a spawned task that owns its connection. If the
/// caller goes away mid-statement the task still finishes and the connection
/// still goes back to the pool.
#[derive(Clone)]
pub struct QueryExecutor {
    pool: ConnectionPool,
}

impl QueryExecutor {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub async fn fetch_all<T>(&self, statement: Statement) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin + 'static,
    {
        let pool = self.pool.clone();
        join(tokio::spawn(async move {
            let started = Instant::now();
            let result = sqlx::query_as_with::<_, T, _>(statement.sql(), statement.arguments()?)
                .fetch_all(pool.inner())
                .await;
            let rows = observe(&pool, &statement, started, result)?;
            debug!(statement = %statement, rows = rows.len(), "Query executed");
            Ok::<_, AppError>(rows)
        }))
        .await
    }

    pub async fn fetch_optional<T>(&self, statement: Statement) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin + 'static,
    {
        let pool = self.pool.clone();
        join(tokio::spawn(async move {
            let started = Instant::now();
            let result = sqlx::query_as_with::<_, T, _>(statement.sql(), statement.arguments()?)
                .fetch_optional(pool.inner())
                .await;
            let row = observe(&pool, &statement, started, result)?;
            debug!(statement = %statement, found = row.is_some(), "Query executed");
            Ok::<_, AppError>(row)
        }))
        .await
    }

    pub async fn write(&self, statement: Statement) -> Result<WriteOutcome> {
        let pool = self.pool.clone();
        join(tokio::spawn(async move {
            let started = Instant::now();
            let result = sqlx::query_with(statement.sql(), statement.arguments()?)
                .execute(pool.inner())
                .await
                .map(WriteOutcome::from);
            let outcome = observe(&pool, &statement, started, result)?;
            debug!(
                statement = %statement,
                rows_affected = outcome.rows_affected,
                "Statement executed"
            );
            Ok::<_, AppError>(outcome)
        }))
        .await
    }

    /// Run `statements` in order inside one transaction: all of them take
    /// effect or none do.
    pub async fn unit_of_work(&self, statements: Vec<Statement>) -> Result<Vec<WriteOutcome>> {
        let pool = self.pool.clone();
        let result = join(tokio::spawn(async move {
            let mut tx = pool.begin().await?;

            let mut outcomes = Vec::with_capacity(statements.len());
            for statement in &statements {
                let started = Instant::now();
                let result = sqlx::query_with(statement.sql(), statement.arguments()?)
                    .execute(&mut *tx)
                    .await
                    .map(WriteOutcome::from);

                match observe(&pool, statement, started, result) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        match tx.rollback().await {
                            Ok(()) => warn!(statement = %statement, "Unit of work rolled back"),
                            Err(rollback_err) => {
                                error!(error = %rollback_err, "Rollback failed")
                            }
                        }
                        return Err(e);
                    }
                }
            }

            tx.commit().await.map_err(|e| {
                error!(error = %e, "Failed to commit unit of work");
                pool.classify(e)
            })?;
            Ok::<_, AppError>(outcomes)
        }))
        .await;

        let outcome = if result.is_ok() { "committed" } else { "rolled_back" };
        counter!("catalog_db_units_of_work_total", "outcome" => outcome).increment(1);
        result
    }

    /// Round-trip a trivial request to the store
    pub async fn ping(&self) -> Result<()> {
        let pool = self.pool.clone();
        join(tokio::spawn(async move {
            let mut conn = pool.acquire().await?;
            conn.ping().await.map_err(|e| pool.classify(e))
        }))
        .await
    }
}

async fn join<T>(task: JoinHandle<Result<T>>) -> Result<T> {
    task.await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("query task failed: {}", e)))?
}

/// Record timing and outcome of one statement, mapping driver errors
fn observe<T>(
    pool: &ConnectionPool,
    statement: &Statement,
    started: Instant,
    result: std::result::Result<T, sqlx::Error>,
) -> Result<T> {
    let kind = statement.kind().as_str();
    histogram!("catalog_db_query_duration_seconds", "kind" => kind)
        .record(started.elapsed().as_secs_f64());

    match result {
        Ok(value) => {
            counter!("catalog_db_queries_total", "kind" => kind, "outcome" => "ok").increment(1);
            Ok(value)
        }
        Err(e) => {
            counter!("catalog_db_queries_total", "kind" => kind, "outcome" => "error")
                .increment(1);
            if !matches!(e, sqlx::Error::PoolTimedOut) {
                error!(statement = %statement, error = %e, "Error executing query");
            }
            Err(pool.classify(e))
        }
    }
}
