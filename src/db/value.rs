//! Statement text and positional parameters

use crate::domain::{StringUuid, StyleDocument};
use crate::error::{AppError, Result};
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlArguments, MySqlQueryResult};
use sqlx::Arguments;
use std::fmt;

/// A positional statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        SqlValue::Text(v.clone())
    }
}

impl From<StringUuid> for SqlValue {
    fn from(v: StringUuid) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&StyleDocument> for SqlValue {
    fn from(v: &StyleDocument) -> Self {
        SqlValue::Text(v.as_str().to_string())
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Whether a statement reads rows or changes them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Read => "read",
            StatementKind::Write => "write",
        }
    }
}

/// SQL text plus positionally bound parameters.
///
/// Caller-supplied values only ever travel through [`Statement::bind`]; the
/// text itself is fixed per call site, apart from `?` lists produced by
/// [`placeholders`].
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
    kind: StatementKind,
}

impl Statement {
    pub fn read(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            kind: StatementKind::Read,
        }
    }

    pub fn write(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            kind: StatementKind::Write,
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn bind_all<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Encode the bound parameters for the MySQL driver
    pub fn arguments(&self) -> Result<MySqlArguments> {
        let mut arguments = MySqlArguments::default();
        for value in &self.params {
            let added = match value {
                SqlValue::Null => arguments.add(None::<String>),
                SqlValue::Int(v) => arguments.add(*v),
                SqlValue::Decimal(v) => arguments.add(*v),
                SqlValue::Text(v) => arguments.add(v.clone()),
            };
            added.map_err(|e| {
                AppError::Internal(anyhow::anyhow!("failed to encode parameter: {}", e))
            })?;
        }
        Ok(arguments)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Collapse the indentation of multi-line SQL for log output
        let mut first = true;
        for part in self.sql.split_whitespace() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

/// `?, ?, ?` for an IN-list of `count` parameters
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Outcome of a write statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

impl From<MySqlQueryResult> for WriteOutcome {
    fn from(done: MySqlQueryResult) -> Self {
        Self {
            rows_affected: done.rows_affected(),
            last_insert_id: done.last_insert_id(),
        }
    }
}
