//! Ollama model client implementation.
//!
//! Implements the ModelClient trait against a local Ollama instance using
//! the `/api/generate` streaming endpoint and `/api/tags` for model listing.

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ParleyError, Result};
use crate::model::ModelClient;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default Ollama API URL.
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the Ollama API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OllamaConfig {
    /// Creates a config pointing at the default local endpoint.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Ollama model client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

impl OllamaClient {
    /// Creates a new Ollama client with the given configuration.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ParleyError::connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `OLLAMA_URL` for the base URL (defaults to http://localhost:11434).
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        Self::new(OllamaConfig::new().with_url(base_url))
    }

    /// Checks if Ollama is available at the configured URL.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }

    /// Returns the generate API endpoint URL.
    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url)
    }

    /// Returns the tags (model listing) endpoint URL.
    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.config.base_url)
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn stream(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<BoxStream<'static, Result<String>>> {
        let request = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: true,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ParleyError::connection(format!(
                "Ollama API error ({status}): {body}"
            )));
        }

        let chunks = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| ParleyError::connection(format!("Stream error: {e}")))
        });

        Ok(reassemble_fragments(chunks))
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.tags_url())
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ParleyError::connection(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ParleyError::connection(format!(
                "Ollama API error ({status}): {body}"
            )));
        }

        let tags: TagsResponse = serde_json::from_str(&body)
            .map_err(|e| ParleyError::model(format!("Failed to parse model list: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

/// Maps reqwest errors to connection errors with actionable messages.
fn map_request_error(e: reqwest::Error) -> ParleyError {
    if e.is_timeout() {
        ParleyError::connection("Request timed out. Try again.")
    } else if e.is_connect() {
        ParleyError::connection("Failed to connect to Ollama. Is it running? Try: ollama serve")
    } else {
        ParleyError::connection(format!("Request failed: {e}"))
    }
}

/// Reassembles a byte-chunk stream into text fragments.
///
/// The body is newline-delimited JSON, but HTTP chunks need not align to
/// line boundaries: the current incomplete line is carried between chunks
/// and nothing more is buffered. When the server closes the connection the
/// carried line is flushed, so a final object without a trailing newline
/// still contributes its fragment. Unparseable lines are skipped.
fn reassemble_fragments<S>(chunks: S) -> BoxStream<'static, Result<String>>
where
    S: Stream<Item = Result<Vec<u8>>> + Send + 'static,
{
    chunks
        .map(Some)
        .chain(stream::once(future::ready(None)))
        .scan(String::new(), |buf, item| {
            let out = match item {
                Some(Ok(bytes)) => {
                    buf.push_str(&String::from_utf8_lossy(&bytes));
                    let mut content = String::new();
                    while let Some(pos) = buf.find('\n') {
                        let line: String = buf.drain(..=pos).collect();
                        content.push_str(&parse_stream_line(&line));
                    }
                    if content.is_empty() {
                        None
                    } else {
                        Some(Ok(content))
                    }
                }
                Some(Err(e)) => Some(Err(e)),
                // End of the byte stream: flush the unterminated final line.
                None => {
                    let rest = std::mem::take(buf);
                    let content = parse_stream_line(&rest);
                    if content.is_empty() {
                        None
                    } else {
                        Some(Ok(content))
                    }
                }
            };
            future::ready(Some(out))
        })
        .filter_map(future::ready)
        .boxed()
}

/// Extracts the text fragment from one streamed line, or "" if the line is
/// blank or malformed.
fn parse_stream_line(line: &str) -> String {
    let line = line.trim();
    if line.is_empty() {
        return String::new();
    }

    match serde_json::from_str::<GenerateEvent>(line) {
        Ok(event) => event.response,
        Err(_) => String::new(),
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateEvent {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}
