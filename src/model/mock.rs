//! Mock model client for testing.
//!
//! Yields scripted fragments without touching the network.

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::Mutex;

use crate::error::{ParleyError, Result};
use crate::model::ModelClient;

/// Mock model client that replays scripted fragments.
///
/// By default it answers with a single `SELECT 1` fragment. Fragment
/// scripting lets tests exercise arbitrary chunk boundaries.
#[derive(Debug, Default)]
pub struct MockModelClient {
    fragments: Vec<String>,
    models: Vec<String>,
    unreachable: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockModelClient {
    /// Creates a mock yielding `SELECT 1` in one fragment.
    pub fn new() -> Self {
        Self {
            fragments: vec!["SELECT 1".to_string()],
            models: Vec::new(),
            unreachable: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the scripted fragments.
    pub fn with_fragments(mut self, fragments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fragments = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the model names returned by `list_models`.
    pub fn with_models(mut self, models: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Makes every call fail with a connection error.
    pub fn with_unreachable_endpoint(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Returns the prompts passed to `stream`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn stream(
        &self,
        _model: &str,
        prompt: &str,
    ) -> Result<BoxStream<'static, Result<String>>> {
        if self.unreachable {
            return Err(ParleyError::connection(
                "Failed to connect to Ollama. Is it running? Try: ollama serve",
            ));
        }

        self.prompts.lock().unwrap().push(prompt.to_string());

        let fragments: Vec<Result<String>> =
            self.fragments.iter().cloned().map(Ok).collect();
        Ok(stream::iter(fragments).boxed())
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        if self.unreachable {
            return Err(ParleyError::connection(
                "Failed to connect to Ollama. Is it running? Try: ollama serve",
            ));
        }
        Ok(self.models.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::collect_stream;

    #[tokio::test]
    async fn test_mock_replays_fragments() {
        let client = MockModelClient::new().with_fragments(["SEL", "ECT ", "1"]);
        let stream = client.stream("any", "prompt").await.unwrap();
        assert_eq!(collect_stream(stream).await.unwrap(), "SELECT 1");
    }

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let client = MockModelClient::new();
        client.stream("any", "first").await.unwrap();
        client.stream("any", "second").await.unwrap();
        assert_eq!(client.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_unreachable_mock_fails_with_connection_error() {
        let client = MockModelClient::new().with_unreachable_endpoint();
        let err = client.stream("any", "prompt").await.err().unwrap();
        assert!(matches!(err, ParleyError::Connection(_)));
        assert!(client.list_models().await.is_err());
    }
}
