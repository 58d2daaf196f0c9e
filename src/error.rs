//! Error types for Parley.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for Parley operations.
#[derive(Error, Debug)]
pub enum ParleyError {
    /// Model endpoint errors (unreachable host, non-success HTTP status, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, missing tables, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Model response errors (stream framing, unparseable body, etc.)
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParleyError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a model error with the given message.
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Model(_) => "Model Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// True for failures the translation pipeline converts into an error
    /// table instead of re-raising: anything from the model endpoint or the
    /// database. Config and internal errors stay fatal so bugs are not
    /// masked as query failures.
    pub fn is_pipeline_recoverable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Query(_) | Self::Model(_))
    }
}

/// Result type alias using ParleyError.
pub type Result<T> = std::result::Result<T, ParleyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection() {
        let err = ParleyError::connection("Cannot reach localhost:11434");
        assert_eq!(
            err.to_string(),
            "Connection error: Cannot reach localhost:11434"
        );
        assert_eq!(err.category(), "Connection Error");
    }

    #[test]
    fn test_error_display_query() {
        let err = ParleyError::query("relation \"userz\" does not exist");
        assert_eq!(
            err.to_string(),
            "Query error: relation \"userz\" does not exist"
        );
        assert_eq!(err.category(), "Query Error");
    }

    #[test]
    fn test_error_display_model() {
        let err = ParleyError::model("stream ended unexpectedly");
        assert_eq!(err.to_string(), "Model error: stream ended unexpectedly");
        assert_eq!(err.category(), "Model Error");
    }

    #[test]
    fn test_pipeline_recoverable_kinds() {
        assert!(ParleyError::connection("x").is_pipeline_recoverable());
        assert!(ParleyError::query("x").is_pipeline_recoverable());
        assert!(ParleyError::model("x").is_pipeline_recoverable());
        assert!(!ParleyError::config("x").is_pipeline_recoverable());
        assert!(!ParleyError::internal("x").is_pipeline_recoverable());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParleyError>();
    }
}
