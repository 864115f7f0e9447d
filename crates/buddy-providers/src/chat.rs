//! Unified chat provider for OpenAI-compatible and Anthropic APIs.

use async_trait::async_trait;
use serde_json::{Value, json};

use buddy_core::config::BuddyConfig;
use buddy_core::error::{BuddyError, Result};
use buddy_core::traits::Provider;
use buddy_core::types::{
    GenerateParams, Message, ProviderResponse, Role, ToolCall, ToolDefinition, Usage,
};

use crate::registry::{AuthStyle, Dialect, ProviderSpec};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One struct handles every supported provider; they differ only by
/// endpoint URL, auth style, and wire dialect.
pub struct ChatProvider {
    name: String,
    api_key: String,
    base_url: String,
    chat_path: String,
    auth_style: AuthStyle,
    dialect: Dialect,
    client: reqwest::Client,
}

impl ChatProvider {
    /// Create from a registry spec + config.
    ///
    /// API key resolution: `config.llm.api_key` > `config.api_key` > env vars.
    /// Base URL: `config.llm.endpoint` > spec default.
    pub fn from_spec(spec: &ProviderSpec, config: &BuddyConfig) -> Self {
        let api_key = if !config.llm.api_key.is_empty() {
            config.llm.api_key.clone()
        } else if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            spec.env_keys
                .iter()
                .find_map(|key| std::env::var(key).ok())
                .unwrap_or_default()
        };

        let base_url = if !config.llm.endpoint.is_empty() {
            config.llm.endpoint.trim_end_matches('/').to_string()
        } else {
            spec.base_url.to_string()
        };

        Self {
            name: spec.name.to_string(),
            api_key,
            base_url,
            chat_path: spec.chat_path.to_string(),
            auth_style: spec.auth_style,
            dialect: spec.dialect,
            client: http_client(),
        }
    }

    /// Create for a custom OpenAI-compatible endpoint.
    pub fn custom(endpoint: &str, config: &BuddyConfig) -> Self {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("CUSTOM_API_KEY").unwrap_or_default()
        };
        let auth_style = if api_key.is_empty() {
            AuthStyle::None
        } else {
            AuthStyle::Bearer
        };

        Self {
            name: "custom".to_string(),
            api_key,
            base_url: endpoint.trim_end_matches('/').to_string(),
            chat_path: "/chat/completions".to_string(),
            auth_style,
            dialect: Dialect::OpenAi,
            client: http_client(),
        }
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_style {
            AuthStyle::Bearer if !self.api_key.is_empty() => {
                req.header("Authorization", format!("Bearer {}", self.api_key))
            }
            AuthStyle::XApiKey => req
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            _ => req,
        }
    }

    fn build_body(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        params: &GenerateParams,
    ) -> Value {
        match self.dialect {
            Dialect::OpenAi => {
                let mut body = json!({
                    "model": params.model,
                    "messages": messages,
                    "temperature": params.temperature,
                    "max_tokens": params.max_tokens,
                });
                if !tools.is_empty() {
                    body["tools"] = Value::Array(
                        tools
                            .iter()
                            .map(|t| {
                                json!({
                                    "type": "function",
                                    "function": {
                                        "name": t.name,
                                        "description": t.description,
                                        "parameters": t.parameters,
                                    }
                                })
                            })
                            .collect(),
                    );
                }
                body
            }
            Dialect::Anthropic => {
                // Anthropic takes the system prompt as a top-level field,
                // not as a message.
                let mut system_parts: Vec<&str> = Vec::new();
                let mut chat_messages: Vec<Value> = Vec::new();
                for msg in messages {
                    if msg.role == Role::System {
                        system_parts.push(&msg.content);
                    } else {
                        chat_messages.push(json!({
                            "role": msg.role,
                            "content": msg.content,
                        }));
                    }
                }

                let mut body = json!({
                    "model": params.model,
                    "messages": chat_messages,
                    "temperature": params.temperature,
                    "max_tokens": params.max_tokens,
                });
                if !system_parts.is_empty() {
                    body["system"] = Value::String(system_parts.join("\n\n"));
                }
                if !tools.is_empty() {
                    body["tools"] = Value::Array(
                        tools
                            .iter()
                            .map(|t| {
                                json!({
                                    "name": t.name,
                                    "description": t.description,
                                    "input_schema": t.parameters,
                                })
                            })
                            .collect(),
                    );
                }
                body
            }
        }
    }
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

#[async_trait]
impl Provider for ChatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        params: &GenerateParams,
    ) -> Result<ProviderResponse> {
        if self.auth_style != AuthStyle::None && self.api_key.is_empty() {
            return Err(BuddyError::ApiKeyMissing(self.name.clone()));
        }

        let body = self.build_body(messages, tools, params);
        let url = format!("{}{}", self.base_url, self.chat_path);

        let req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        let req = self.apply_auth(req);

        let resp = req.send().await.map_err(|e| {
            BuddyError::Http(format!("{} connection failed ({}): {}", self.name, url, e))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BuddyError::Provider(format!(
                "{} API error {}: {}",
                self.name, status, text
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| BuddyError::Http(e.to_string()))?;

        let response = match self.dialect {
            Dialect::OpenAi => parse_openai_response(&json)?,
            Dialect::Anthropic => parse_anthropic_response(&json)?,
        };

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "{}: {} prompt + {} completion tokens",
                self.name,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }
        Ok(response)
    }
}

/// Normalize an OpenAI `choices[0].message` payload.
pub fn parse_openai_response(json: &Value) -> Result<ProviderResponse> {
    let choice = json["choices"]
        .get(0)
        .ok_or_else(|| BuddyError::Provider("no choices in response".into()))?;
    let message = &choice["message"];

    let content = message["content"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from);

    let mut tool_calls = Vec::new();
    if let Some(calls) = message["tool_calls"].as_array() {
        for call in calls {
            let name = call["function"]["name"]
                .as_str()
                .ok_or_else(|| BuddyError::Provider("tool call missing name".into()))?;
            let raw_args = call["function"]["arguments"].as_str().unwrap_or("{}");
            let arguments: Value = serde_json::from_str(raw_args).map_err(|e| {
                BuddyError::Provider(format!("malformed tool arguments for '{name}': {e}"))
            })?;
            tool_calls.push(ToolCall {
                id: call["id"].as_str().unwrap_or_default().to_string(),
                name: name.to_string(),
                arguments,
            });
        }
    }

    Ok(ProviderResponse {
        content,
        tool_calls,
        usage: parse_usage(&json["usage"], "prompt_tokens", "completion_tokens"),
    })
}

/// Normalize an Anthropic content-block payload.
pub fn parse_anthropic_response(json: &Value) -> Result<ProviderResponse> {
    let blocks = json["content"]
        .as_array()
        .ok_or_else(|| BuddyError::Provider("no content blocks in response".into()))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block["type"].as_str() {
            Some("text") => {
                text.push_str(block["text"].as_str().unwrap_or_default());
            }
            Some("tool_use") => {
                tool_calls.push(ToolCall {
                    id: block["id"].as_str().unwrap_or_default().to_string(),
                    name: block["name"]
                        .as_str()
                        .ok_or_else(|| BuddyError::Provider("tool_use block missing name".into()))?
                        .to_string(),
                    arguments: block["input"].clone(),
                });
            }
            _ => {}
        }
    }

    Ok(ProviderResponse {
        content: if text.is_empty() { None } else { Some(text) },
        tool_calls,
        usage: parse_usage(&json["usage"], "input_tokens", "output_tokens"),
    })
}

fn parse_usage(usage: &Value, prompt_key: &str, completion_key: &str) -> Option<Usage> {
    let obj = usage.as_object()?;
    let prompt = obj.get(prompt_key).and_then(Value::as_u64).unwrap_or(0) as u32;
    let completion = obj.get(completion_key).and_then(Value::as_u64).unwrap_or(0) as u32;
    Some(Usage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: prompt + completion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openai_text_response() {
        let json = json!({
            "choices": [{
                "message": { "content": "Welcome aboard!" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
        });
        let resp = parse_openai_response(&json).unwrap();
        assert_eq!(resp.content.as_deref(), Some("Welcome aboard!"));
        assert!(resp.tool_calls.is_empty());
        assert_eq!(resp.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_parse_openai_tool_calls() {
        let json = json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "function": {
                            "name": "faq_lookup",
                            "arguments": "{\"query\": \"pto policy\"}"
                        }
                    }]
                }
            }]
        });
        let resp = parse_openai_response(&json).unwrap();
        assert!(resp.content.is_none());
        assert_eq!(resp.tool_calls.len(), 1);
        assert_eq!(resp.tool_calls[0].name, "faq_lookup");
        assert_eq!(resp.tool_calls[0].arguments["query"], "pto policy");
    }

    #[test]
    fn test_parse_openai_malformed_arguments_is_provider_error() {
        let json = json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "call_1",
                        "function": { "name": "faq_lookup", "arguments": "{not json" }
                    }]
                }
            }]
        });
        assert!(matches!(
            parse_openai_response(&json),
            Err(BuddyError::Provider(_))
        ));
    }

    #[test]
    fn test_parse_openai_empty_choices_is_provider_error() {
        let json = json!({ "choices": [] });
        assert!(parse_openai_response(&json).is_err());
    }

    #[test]
    fn test_parse_anthropic_mixed_blocks() {
        let json = json!({
            "content": [
                { "type": "text", "text": "Let me check that." },
                {
                    "type": "tool_use",
                    "id": "toolu_1",
                    "name": "search_knowledge",
                    "input": { "query": "capstone project" }
                }
            ],
            "usage": { "input_tokens": 20, "output_tokens": 8 }
        });
        let resp = parse_anthropic_response(&json).unwrap();
        assert_eq!(resp.content.as_deref(), Some("Let me check that."));
        assert_eq!(resp.tool_calls.len(), 1);
        assert_eq!(resp.tool_calls[0].arguments["query"], "capstone project");
        assert_eq!(resp.usage.unwrap().total_tokens, 28);
    }

    #[test]
    fn test_anthropic_body_lifts_system_prompt() {
        let config = BuddyConfig::default();
        let spec = crate::registry::lookup("anthropic").unwrap();
        let provider = ChatProvider::from_spec(spec, &config);

        let messages = vec![Message::system("You are Buddy."), Message::user("hi")];
        let body = provider.build_body(
            &messages,
            &[],
            &GenerateParams {
                model: "claude-3-5-sonnet-20241022".into(),
                temperature: 0.7,
                max_tokens: 1024,
            },
        );

        assert_eq!(body["system"], "You are Buddy.");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_openai_body_includes_tool_schemas() {
        let config = BuddyConfig::default();
        let spec = crate::registry::lookup("openai").unwrap();
        let provider = ChatProvider::from_spec(spec, &config);

        let tools = vec![ToolDefinition {
            name: "faq_lookup".into(),
            description: "Search the FAQ".into(),
            parameters: json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            }),
        }];
        let body = provider.build_body(
            &[Message::user("hi")],
            &tools,
            &GenerateParams {
                model: "gpt-4o-mini".into(),
                temperature: 0.7,
                max_tokens: 1024,
            },
        );

        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "faq_lookup");
    }
}
