//! Mock executors for testing.
//!
//! `MockExecutor` returns a canned table and records the SQL it was given;
//! `FailingExecutor` fails every call with a fixed query error.

use crate::db::{SqlExecutor, TabularResult};
use crate::error::{ParleyError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Executor that returns a fixed result for every query.
#[derive(Debug, Default)]
pub struct MockExecutor {
    result: TabularResult,
    executed: Mutex<Vec<String>>,
    close_calls: AtomicUsize,
}

impl MockExecutor {
    /// Creates a mock that returns an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that returns the given result.
    pub fn with_result(result: TabularResult) -> Self {
        Self {
            result,
            ..Self::default()
        }
    }

    /// Returns the SQL strings passed to `execute`, in call order.
    pub fn executed_sql(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Number of times `close` was called.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlExecutor for MockExecutor {
    async fn execute(&self, sql: &str) -> Result<TabularResult> {
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(self.result.clone())
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Executor that fails every query with a fixed message.
#[derive(Debug)]
pub struct FailingExecutor {
    message: String,
    fatal: bool,
    close_calls: AtomicUsize,
}

impl FailingExecutor {
    /// Creates an executor failing with the given driver-style message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: false,
            close_calls: AtomicUsize::new(0),
        }
    }

    /// Creates an executor failing with an internal error, which the
    /// pipeline propagates instead of converting to an error table.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: true,
            close_calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `close` was called.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl Default for FailingExecutor {
    fn default() -> Self {
        Self::new("connection closed")
    }
}

#[async_trait]
impl SqlExecutor for FailingExecutor {
    async fn execute(&self, _sql: &str) -> Result<TabularResult> {
        if self.fatal {
            Err(ParleyError::internal(self.message.clone()))
        } else {
            Err(ParleyError::query(self.message.clone()))
        }
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Value;

    #[tokio::test]
    async fn test_mock_returns_result_and_records_sql() {
        let mock = MockExecutor::with_result(TabularResult::with_data(
            vec!["x".to_string()],
            vec![vec![Value::Int(1)]],
        ));

        let result = mock.execute("SELECT 1 AS x").await.unwrap();
        assert_eq!(result.columns, vec!["x"]);
        assert_eq!(mock.executed_sql(), vec!["SELECT 1 AS x".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_executor_raises_query_error() {
        let failing = FailingExecutor::new("relation does not exist");
        let err = failing.execute("SELECT 1").await.unwrap_err();
        assert!(matches!(err, ParleyError::Query(_)));
        assert!(err.to_string().contains("relation does not exist"));
    }

    #[tokio::test]
    async fn test_internal_failing_executor_raises_internal_error() {
        let failing = FailingExecutor::internal("unexpected state");
        let err = failing.execute("SELECT 1").await.unwrap_err();
        assert!(matches!(err, ParleyError::Internal(_)));
    }

    #[tokio::test]
    async fn test_mocks_count_close_calls() {
        let mock = MockExecutor::new();
        assert_eq!(mock.close_calls(), 0);
        mock.close().await.unwrap();
        assert_eq!(mock.close_calls(), 1);

        let failing = FailingExecutor::default();
        failing.close().await.unwrap();
        assert_eq!(failing.close_calls(), 1);
    }
}
