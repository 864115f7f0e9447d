//! Remote embedding client (OpenAI embeddings API shape).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use buddy_core::config::BuddyConfig;
use buddy_core::error::{BuddyError, Result};
use buddy_core::traits::Embedder;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Embedding client for services speaking the OpenAI embeddings wire
/// format: `{model, input, encoding_format}` in, one vector per input item
/// out, in the same order.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
    #[serde(default)]
    usage: Option<EmbeddingsUsage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsUsage {
    #[serde(default)]
    total_tokens: u32,
}

impl OpenAiEmbedder {
    /// Build from config. The API key resolves config-first, then the
    /// `OPENAI_API_KEY` environment variable.
    pub fn new(config: &BuddyConfig) -> Result<Self> {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        };
        if api_key.is_empty() && config.embedding.endpoint.is_empty() {
            return Err(BuddyError::ApiKeyMissing("openai embeddings".into()));
        }

        let endpoint = if config.embedding.endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            config.embedding.endpoint.clone()
        };

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            endpoint,
            api_key,
            model: config.embedding.model.clone(),
        })
    }

    async fn request(&self, input: serde_json::Value) -> Result<EmbeddingsResponse> {
        let body = json!({
            "model": self.model,
            "input": input,
            "encoding_format": "float",
        });

        let mut req = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| BuddyError::Http(format!("embeddings connection failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BuddyError::Provider(format!(
                "embeddings API error {status}: {text}"
            )));
        }

        resp.json::<EmbeddingsResponse>()
            .await
            .map_err(|e| BuddyError::Provider(format!("malformed embeddings payload: {e}")))
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self.request(json!(text)).await?;
        log_usage(&response);
        align_vectors(response.data, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| BuddyError::Provider("empty embeddings response".into()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let response = self.request(json!(texts)).await?;
        log_usage(&response);
        align_vectors(response.data, texts.len())
    }
}

fn log_usage(response: &EmbeddingsResponse) {
    if let Some(usage) = &response.usage {
        tracing::debug!("embeddings used {} tokens", usage.total_tokens);
    }
}

/// Place each returned vector at its declared index. A missing vector for
/// any position fails the whole call — chunk ids are positional, so the
/// caller must never see a silently shifted batch.
fn align_vectors(data: Vec<EmbeddingItem>, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];
    for item in data {
        if item.index >= expected {
            return Err(BuddyError::Provider(format!(
                "embedding index {} out of range (expected {expected} items)",
                item.index
            )));
        }
        slots[item.index] = Some(item.embedding);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| BuddyError::Provider(format!("missing embedding for index {i}")))
        })
        .collect()
}
