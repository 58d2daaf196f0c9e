//! Model client for Parley.
//!
//! Provides the trait for streaming generation against a local model
//! endpoint, the Ollama implementation, and a scripted mock for tests.

pub mod mock;
pub mod ollama;

pub use mock::MockModelClient;
pub use ollama::{OllamaClient, OllamaConfig};

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::warn;

use crate::error::Result;

/// Trait for model clients that can stream generated text.
///
/// Implementations must be thread-safe (Send + Sync). A client only produces
/// fragments; any display of them is the caller's concern.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Streams a generation for the given prompt.
    ///
    /// Fragments arrive in order; concatenating them reconstructs the full
    /// response. The stream ends when the server closes the connection.
    async fn stream(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<BoxStream<'static, Result<String>>>;

    /// Lists the model names available at the endpoint.
    async fn list_models(&self) -> Result<Vec<String>>;
}

/// Collects a fragment stream into the complete response text.
///
/// Fails with the first stream error encountered.
pub async fn collect_stream(mut stream: BoxStream<'static, Result<String>>) -> Result<String> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        text.push_str(&fragment?);
    }
    Ok(text)
}

/// Lists models, substituting a fallback when the endpoint is unreachable.
///
/// The presentation layer always gets a non-empty list; the connection
/// failure is logged, not propagated.
pub async fn list_models_or_default(client: &dyn ModelClient) -> Vec<String> {
    match client.list_models().await {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => vec!["default".to_string()],
        Err(e) => {
            warn!("Could not list models, falling back: {e}");
            vec!["default".to_string()]
        }
    }
}
