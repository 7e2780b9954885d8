//! Bounded connection pool over `sqlx::MySqlPool`

use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};
use metrics::{counter, gauge};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{MySql, Transaction};
use std::time::Duration;
use tracing::{error, info, warn};

/// Process-wide connection pool, cheap to clone
#[derive(Clone)]
pub struct ConnectionPool {
    inner: MySqlPool,
    size: u32,
    acquire_timeout: Duration,
}

impl ConnectionPool {
    /// Create the pool and open its first connection.
    ///
    /// Failing to reach the store here is fatal to the pool and is returned
    /// to the caller.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let inner = Self::options(config)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to connect to the database");
                AppError::QueryFailed(e)
            })?;

        let pool = Self::wrap(inner, config);
        info!(
            size = pool.size,
            acquire_timeout_ms = pool.acquire_timeout.as_millis() as u64,
            "Connection pool ready"
        );
        pool.report_available();
        Ok(pool)
    }

    /// Build the pool without opening a connection; the first `acquire`
    /// connects.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let inner = Self::options(config).connect_lazy_with(config.connect_options());
        Self::wrap(inner, config)
    }

    fn options(config: &DatabaseConfig) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.acquire_timeout)
    }

    fn wrap(inner: MySqlPool, config: &DatabaseConfig) -> Self {
        Self {
            inner,
            size: config.pool_size,
            acquire_timeout: config.acquire_timeout,
        }
    }

    /// Borrow a connection, waiting at most the configured acquire timeout.
    /// Dropping the returned connection hands it back.
    pub async fn acquire(&self) -> Result<PoolConnection<MySql>> {
        let conn = self.inner.acquire().await.map_err(|e| self.classify(e))?;
        self.report_available();
        Ok(conn)
    }

    /// Open a unit of work on a pooled connection. An uncommitted
    /// transaction rolls back when dropped.
    pub async fn begin(&self) -> Result<Transaction<'static, MySql>> {
        let tx = self.inner.begin().await.map_err(|e| self.classify(e))?;
        self.report_available();
        Ok(tx)
    }

    /// Number of connections that can be lent right now without waiting:
    /// idle ones plus the room left to open new ones.
    pub fn available(&self) -> usize {
        let open = self.inner.size();
        let headroom = self.size.saturating_sub(open) as usize;
        headroom + self.inner.num_idle()
    }

    /// Upper bound on connections held at once
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Stop lending and wait for outstanding connections to come back.
    pub async fn close(&self) {
        self.inner.close().await;
        info!("Connection pool closed");
    }

    pub fn inner(&self) -> &MySqlPool {
        &self.inner
    }

    /// Translate a driver failure into the crate's error taxonomy
    pub(crate) fn classify(&self, e: sqlx::Error) -> AppError {
        match e {
            sqlx::Error::PoolTimedOut => {
                counter!("catalog_db_pool_acquire_timeouts_total").increment(1);
                warn!(
                    waited_ms = self.acquire_timeout.as_millis() as u64,
                    size = self.size,
                    "Timed out waiting for a database connection"
                );
                AppError::PoolExhausted(self.acquire_timeout)
            }
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(db.message().to_string())
            }
            other => AppError::QueryFailed(other),
        }
    }

    fn report_available(&self) {
        gauge!("catalog_db_pool_connections_available").set(self.available() as f64);
    }
}
