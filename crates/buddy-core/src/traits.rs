//! Trait seams between the agent and its collaborators.
//!
//! Providers, tools, and embedders are injected as trait objects from the
//! composition root so tests can substitute doubles — no ambient singletons.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateParams, Message, ProviderResponse, ToolDefinition};

/// An LLM provider adapter. Implementations normalize whatever wire format
/// the remote service speaks into a `ProviderResponse`.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// One model call: ordered messages, optional tool schemas, sampling
    /// parameters. Must not block indefinitely — implementations carry a
    /// bounded request timeout and surface expiry as a provider error.
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        params: &GenerateParams,
    ) -> Result<ProviderResponse>;
}

/// A callable capability exposed to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    /// Run the tool with validated named arguments, returning its text
    /// result. Failures here are converted to result strings at the
    /// dispatch boundary and never abort a turn.
    async fn execute(&self, arguments: &serde_json::Value) -> Result<String>;
}

/// Converts text into fixed-length embedding vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch, preserving input order. A missing vector for any
    /// index is a provider error for the whole batch — callers depend on
    /// positional alignment between inputs and outputs.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
