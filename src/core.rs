//! The model client abstraction every provider implements, plus the startup probe.

use crate::error::AIError;
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{error, info, instrument};

/// Prompt sent once at startup to verify the credential and model access.
pub const PROBE_PROMPT: &str = "Test";

/// Low-level model client abstraction.
///
/// Implementors provide `ask_raw`, which sends a single prompt and returns the
/// raw model text. Parsing of that text happens elsewhere.
#[async_trait]
pub trait LowLevelClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn LowLevelClient>;
}

impl Clone for Box<dyn LowLevelClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl LowLevelClient for Box<dyn LowLevelClient> {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        self.as_ref().ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        self.as_ref().clone_box()
    }
}

/// Make one live call and require a non-empty reply.
///
/// Run before the server binds so a bad credential stops the process instead
/// of surfacing as failed batches later.
#[instrument(skip(client))]
pub async fn probe<C: LowLevelClient + ?Sized>(client: &C) -> Result<(), AIError> {
    let reply = client.ask_raw(PROBE_PROMPT.to_string()).await.map_err(|e| {
        error!(error = %e, "Model probe call failed");
        e
    })?;

    if reply.trim().is_empty() {
        error!("Model probe returned an empty reply");
        return Err(AIError::EmptyReply("probe".to_string()));
    }

    info!(response_len = reply.len(), "Model probe succeeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{MockClient, MockResponse};

    #[tokio::test]
    async fn probe_accepts_non_empty_reply() {
        let (client, handle) = MockClient::with_responses(vec![MockResponse::text("ok")]);
        probe(&client).await.unwrap();
        assert_eq!(handle.prompts(), vec![PROBE_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn probe_rejects_blank_reply() {
        let (client, _handle) = MockClient::with_responses(vec![MockResponse::text("  \n")]);
        let err = probe(&client).await.unwrap_err();
        assert!(matches!(err, AIError::EmptyReply(_)));
    }

    #[tokio::test]
    async fn probe_propagates_client_error() {
        let (client, _handle) = MockClient::with_responses(vec![MockResponse::error("bad key")]);
        assert!(matches!(probe(&client).await, Err(AIError::Mock(_))));
    }
}
