//! # Buddy Providers
//!
//! LLM provider adapters for Buddy. OpenAI-compatible services and the
//! Anthropic Messages API are both handled by a single `ChatProvider`
//! distinguished only by endpoint, auth style, and response dialect; every
//! adapter normalizes to the `{content, tool_calls}` shape the agent
//! consumes. The remote embedding client lives here too.

pub mod chat;
pub mod embeddings;
pub mod registry;

use buddy_core::config::BuddyConfig;
use buddy_core::error::{BuddyError, Result};
use buddy_core::traits::Provider;

/// Create a provider from configuration.
///
/// Resolution order for the provider name: `config.llm.provider`, then
/// `config.default_provider`.
pub fn create_provider(config: &BuddyConfig) -> Result<Box<dyn Provider>> {
    let provider_name = if !config.llm.provider.is_empty() {
        config.llm.provider.as_str()
    } else {
        config.default_provider.as_str()
    };

    // Custom endpoint: "custom:https://my-server.com/v1"
    if let Some(endpoint) = provider_name.strip_prefix("custom:") {
        return Ok(Box::new(chat::ChatProvider::custom(endpoint, config)));
    }

    let spec = registry::lookup(provider_name)
        .ok_or_else(|| BuddyError::ProviderNotFound(provider_name.into()))?;
    Ok(Box::new(chat::ChatProvider::from_spec(spec, config)))
}

/// List all known provider names.
pub fn available_providers() -> Vec<&'static str> {
    let mut names = registry::all_names();
    names.push("custom");
    names
}
