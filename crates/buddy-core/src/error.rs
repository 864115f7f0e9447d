//! Buddy error taxonomy.

use thiserror::Error;

/// Errors produced anywhere in the Buddy workspace.
#[derive(Debug, Error)]
pub enum BuddyError {
    /// Remote LLM or embedding call failed: network, auth, or malformed payload.
    #[error("provider error: {0}")]
    Provider(String),

    /// No API key could be resolved for the named provider.
    #[error("missing API key for provider '{0}'")]
    ApiKeyMissing(String),

    /// Unknown provider name in configuration.
    #[error("unknown provider '{0}'")]
    ProviderNotFound(String),

    /// HTTP transport failure.
    #[error("http error: {0}")]
    Http(String),

    /// Similarity computed over vectors of different length. Should not
    /// occur with a consistent index.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The model requested a tool name that is not registered.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// A tool's own logic failed at runtime.
    #[error("tool error: {0}")]
    Tool(String),

    /// Persisted knowledge index could not be read. Callers treat this as
    /// "start empty" rather than failing startup.
    #[error("knowledge index corrupt: {0}")]
    IndexCorrupt(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = BuddyError::DimensionMismatch {
            expected: 1536,
            got: 768,
        };
        assert_eq!(
            err.to_string(),
            "embedding dimension mismatch: expected 1536, got 768"
        );
    }

    #[test]
    fn test_unknown_tool_message() {
        let err = BuddyError::UnknownTool("get_weather".into());
        assert!(err.to_string().contains("get_weather"));
    }
}
