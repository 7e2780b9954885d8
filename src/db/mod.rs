//! Store access: connection pool, query execution and schema bootstrap

pub mod executor;
pub mod pool;
pub mod schema;
pub mod value;

pub use executor::QueryExecutor;
pub use pool::ConnectionPool;
pub use schema::ensure_schema;
pub use value::{placeholders, SqlValue, Statement, StatementKind, WriteOutcome};
