//! Configuration management for Catalog Core

use anyhow::{bail, Context, Result};
use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Upper bound on connections held by the pool
    pub pool_size: u32,
    /// How long `acquire` waits for a free connection
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("pool_size", &self.pool_size)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_format: LogFormat,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let pool_size: u32 = var("DATABASE_POOL_SIZE", "10")
            .parse()
            .context("Invalid DATABASE_POOL_SIZE")?;
        if pool_size == 0 {
            bail!("DATABASE_POOL_SIZE must be at least 1");
        }

        let acquire_timeout_ms: u64 = var("DATABASE_ACQUIRE_TIMEOUT_MS", "10000")
            .parse()
            .context("Invalid DATABASE_ACQUIRE_TIMEOUT_MS")?;

        let log_format = match var("LOG_FORMAT", "pretty").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => bail!("Invalid LOG_FORMAT '{}', expected 'pretty' or 'json'", other),
        };

        Ok(Self {
            http_host: var("SERVER_HOSTNAME", "localhost"),
            http_port: var("SERVER_PORT", "3000")
                .parse()
                .context("Invalid SERVER_PORT")?,
            database: DatabaseConfig {
                host: var("MYSQL_HOST", "localhost"),
                port: var("MYSQL_PORT", "3306")
                    .parse()
                    .context("Invalid MYSQL_PORT")?,
                name: var("MYSQL_DATABASE", "testdb"),
                user: var("MYSQL_USER", "root"),
                password: var("MYSQL_PASS", "admin123"),
                pool_size,
                acquire_timeout: Duration::from_millis(acquire_timeout_ms),
            },
            telemetry: TelemetryConfig {
                log_format,
                metrics_enabled: var("METRICS_ENABLED", "true").to_lowercase() == "true",
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl DatabaseConfig {
    /// Connection options for the MySQL driver
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}
