//! Chat passthrough agent.
//!
//! Chat mode has no pipeline: the user's message goes to the model verbatim
//! and the fragments come back untouched. Display is the caller's concern;
//! this layer never touches a UI.

use futures::stream::BoxStream;

use crate::error::Result;
use crate::model::ModelClient;

/// Streams raw chat replies from the model.
pub struct ChatAgent<'a> {
    model: &'a dyn ModelClient,
}

impl<'a> ChatAgent<'a> {
    /// Creates a new chat agent over the given client.
    pub fn new(model: &'a dyn ModelClient) -> Self {
        Self { model }
    }

    /// Streams the model's reply to `user_input`.
    pub async fn stream(
        &self,
        user_input: &str,
        model: &str,
    ) -> Result<BoxStream<'static, Result<String>>> {
        self.model.stream(model, user_input).await
    }
}
