//! Database layer for Parley.
//!
//! Provides a trait-based interface for executing generated SQL, so the
//! translation pipeline can run against Postgres or an in-memory stub
//! interchangeably.

mod mock;
mod postgres;
mod types;

pub use mock::{FailingExecutor, MockExecutor};
pub use postgres::PostgresExecutor;
pub use types::{Row, TabularResult, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for query execution.
///
/// Implementations must be thread-safe (Send + Sync). Execution is verbatim:
/// the SQL string is trusted to be a complete statement, and read/write is
/// not distinguished.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Executes a SQL string and returns the fully materialized result.
    async fn execute(&self, sql: &str) -> Result<TabularResult>;

    /// Releases the underlying connections.
    async fn close(&self) -> Result<()>;
}

/// Connects to the configured database and returns a boxed executor.
///
/// This is the single place executors are constructed; the pool lifecycle
/// belongs to the caller (open at startup, `close` on shutdown).
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn SqlExecutor>> {
    let executor = PostgresExecutor::connect(config).await?;
    Ok(Box::new(executor))
}
