//! # Buddy Agent
//!
//! The conversation orchestrator. One call to [`Agent::respond`] drives a
//! complete turn:
//!
//! ```text
//! Start → FirstModelCall → { DirectAnswer | ToolExecution }
//!       → (FollowupModelCall) → Done, with ErrorFallback reachable
//!         from any point
//! ```
//!
//! Turns are stateless: the message list is built fresh per call and
//! discarded when it returns. At most one round of tool calls happens per
//! turn — the follow-up model call is made with no tools offered.

pub mod prompt;

use buddy_core::config::BuddyConfig;
use buddy_core::error::Result;
use buddy_core::traits::Provider;
use buddy_core::types::{GenerateParams, Message, ToolCall};
use buddy_tools::ToolRegistry;

/// Returned when a model call produced no usable text.
const EMPTY_RESPONSE_FALLBACK: &str =
    "I apologize, but I encountered an issue processing your request.";

/// The Buddy agent — turns one user message into one final answer,
/// executing any tools the model requests along the way.
pub struct Agent {
    provider: Box<dyn Provider>,
    tools: ToolRegistry,
    params: GenerateParams,
    system_prompt: String,
    escalation_channel: String,
}

impl Agent {
    /// Assemble an agent from its injected collaborators. The composition
    /// root (the CLI) owns provider and registry construction.
    pub fn new(config: &BuddyConfig, provider: Box<dyn Provider>, tools: ToolRegistry) -> Self {
        Self {
            provider,
            tools,
            params: GenerateParams {
                model: config.default_model.clone(),
                temperature: config.default_temperature,
                max_tokens: config.max_tokens,
            },
            system_prompt: prompt::build_system_prompt(&config.identity),
            escalation_channel: config.identity.escalation_channel.clone(),
        }
    }

    /// Process one user message and produce the final answer.
    ///
    /// Never returns an error: any failure inside the turn (provider
    /// outage, malformed response) is converted into a user-facing
    /// apology that names the problem and the escalation channel.
    pub async fn respond(&self, user_message: &str) -> String {
        match self.run_turn(user_message).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("turn failed: {e}");
                format!(
                    "I encountered an issue processing your message: {e}. Please try \
again, or reach out to your manager or in {} for assistance.",
                    self.escalation_channel
                )
            }
        }
    }

    async fn run_turn(&self, user_message: &str) -> Result<String> {
        let mut messages = vec![
            Message::system(&self.system_prompt),
            Message::user(user_message),
        ];

        let tool_defs = self.tools.list();
        let first = self
            .provider
            .chat(&messages, &tool_defs, &self.params)
            .await?;

        // DirectAnswer: no tools requested.
        if first.tool_calls.is_empty() {
            return Ok(text_or_fallback(first.content));
        }

        // ToolExecution: run each call sequentially and independently.
        // One broken tool degrades into an error string fed back to the
        // model; it never aborts its siblings or the turn.
        let mut tool_results: Vec<(String, String)> = Vec::new();
        for call in &first.tool_calls {
            tracing::info!("tool call: {}", call.name);
            let result = match self.tools.dispatch(&call.name, &call.arguments).await {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!("tool '{}' failed: {e}", call.name);
                    format!("Error executing tool: {e}")
                }
            };
            tool_results.push((call.name.clone(), result));
        }

        // Fold results back in: a placeholder assistant message for the
        // first response, then one user message carrying every result.
        let assistant_text = first
            .content
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| describe_tool_calls(&first.tool_calls));
        messages.push(Message::assistant(assistant_text));
        messages.push(Message::user(format_tool_results(&tool_results)));

        // FollowupModelCall: no tools offered — tool recursion is not
        // supported.
        let followup = self.provider.chat(&messages, &[], &self.params).await?;
        Ok(text_or_fallback(followup.content))
    }
}

fn text_or_fallback(content: Option<String>) -> String {
    content
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string())
}

/// Readable stand-in for a first response that had no text.
fn describe_tool_calls(calls: &[ToolCall]) -> String {
    let described: Vec<String> = calls
        .iter()
        .map(|c| format!("{} with {}", c.name, c.arguments))
        .collect();
    format!("Processing your request by calling: {}", described.join(", "))
}

fn format_tool_results(results: &[(String, String)]) -> String {
    let body: Vec<String> = results
        .iter()
        .map(|(name, result)| format!("Tool: {name}\nResult: {result}"))
        .collect();
    format!(
        "Here are the results from the tools that were called:\n\n{}\n\n\
Please use these results to provide a helpful response to the original question.",
        body.join("\n\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use buddy_core::error::BuddyError;
    use buddy_core::traits::Tool;
    use buddy_core::types::{ProviderResponse, ToolDefinition};
    use std::sync::Mutex;

    /// Scripted provider: pops one response per chat() call and records
    /// what it was called with.
    struct StubProvider {
        script: Mutex<Vec<Result<ProviderResponse>>>,
        calls: std::sync::Arc<Mutex<Vec<RecordedCall>>>,
    }

    struct RecordedCall {
        messages: Vec<Message>,
        tool_count: usize,
    }

    impl StubProvider {
        fn new(mut responses: Vec<Result<ProviderResponse>>) -> Self {
            responses.reverse();
            Self {
                script: Mutex::new(responses),
                calls: std::sync::Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Handle to the recorded calls that survives moving the provider
        /// into an agent.
        fn recorder(&self) -> std::sync::Arc<Mutex<Vec<RecordedCall>>> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn chat(
            &self,
            messages: &[Message],
            tools: &[ToolDefinition],
            _params: &GenerateParams,
        ) -> Result<ProviderResponse> {
            self.calls.lock().unwrap().push(RecordedCall {
                messages: messages.to_vec(),
                tool_count: tools.len(),
            });
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(BuddyError::Provider("script exhausted".into())))
        }
    }

    struct GoodTool;

    #[async_trait]
    impl Tool for GoodTool {
        fn name(&self) -> &str {
            "good_tool"
        }

        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: "good_tool".into(),
                description: "always works".into(),
                parameters: serde_json::json!({"type": "object", "properties": {}}),
            }
        }

        async fn execute(&self, _arguments: &serde_json::Value) -> Result<String> {
            Ok("GOOD RESULT".into())
        }
    }

    struct BadTool;

    #[async_trait]
    impl Tool for BadTool {
        fn name(&self) -> &str {
            "bad_tool"
        }

        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: "bad_tool".into(),
                description: "always fails".into(),
                parameters: serde_json::json!({"type": "object", "properties": {}}),
            }
        }

        async fn execute(&self, _arguments: &serde_json::Value) -> Result<String> {
            Err(BuddyError::Tool("database unreachable".into()))
        }
    }

    fn registry() -> ToolRegistry {
        let mut r = ToolRegistry::new();
        r.register(Box::new(GoodTool));
        r.register(Box::new(BadTool));
        r
    }

    fn call(name: &str) -> ToolCall {
        ToolCall {
            id: format!("call-{name}"),
            name: name.into(),
            arguments: serde_json::json!({}),
        }
    }

    fn text_response(text: &str) -> Result<ProviderResponse> {
        Ok(ProviderResponse {
            content: Some(text.into()),
            tool_calls: vec![],
            usage: None,
        })
    }

    fn agent(provider: StubProvider) -> Agent {
        Agent::new(
            &BuddyConfig::default(),
            Box::new(provider),
            registry(),
        )
    }

    #[tokio::test]
    async fn test_direct_answer_skips_second_call() {
        let provider = StubProvider::new(vec![text_response("Just the answer.")]);
        let agent = agent(provider);
        let answer = agent.respond("hello").await;
        assert_eq!(answer, "Just the answer.");
    }

    #[tokio::test]
    async fn test_tool_round_feeds_results_to_second_call() {
        let provider = StubProvider::new(vec![
            Ok(ProviderResponse {
                content: Some("Let me look that up.".into()),
                tool_calls: vec![call("good_tool")],
                usage: None,
            }),
            text_response("Final answer using tool output."),
        ]);
        let agent = agent(provider);

        let answer = agent.respond("question").await;
        assert_eq!(answer, "Final answer using tool output.");
    }

    #[tokio::test]
    async fn test_failing_tool_does_not_abort_turn() {
        let stub = StubProvider::new(vec![
            Ok(ProviderResponse {
                content: None,
                tool_calls: vec![call("bad_tool"), call("good_tool")],
                usage: None,
            }),
            text_response("Answer despite the failure."),
        ]);
        let agent = Agent::new(&BuddyConfig::default(), Box::new(stub), registry());

        let answer = agent.respond("question").await;
        assert_eq!(answer, "Answer despite the failure.");
    }

    #[tokio::test]
    async fn test_failed_tool_result_is_fed_back_to_model() {
        let provider = StubProvider::new(vec![
            Ok(ProviderResponse {
                content: None,
                tool_calls: vec![call("bad_tool"), call("good_tool")],
                usage: None,
            }),
            text_response("done"),
        ]);
        let recorder = provider.recorder();
        let agent = agent(provider);
        let _ = agent.respond("question").await;

        let calls = recorder.lock().unwrap();
        assert_eq!(calls.len(), 2);
        let folded = &calls[1].messages.last().unwrap().content;
        assert!(folded.contains("Tool: bad_tool"));
        assert!(folded.contains("Error executing tool"));
        assert!(folded.contains("Tool: good_tool\nResult: GOOD RESULT"));
    }

    #[tokio::test]
    async fn test_second_call_offers_no_tools() {
        let provider = StubProvider::new(vec![
            Ok(ProviderResponse {
                content: None,
                tool_calls: vec![call("good_tool")],
                usage: None,
            }),
            text_response("final"),
        ]);
        let recorder = provider.recorder();
        let agent = agent(provider);
        let _ = agent.respond("question").await;

        let calls = recorder.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].tool_count > 0);
        assert_eq!(calls[1].tool_count, 0);
        // First response had no text: placeholder assistant message plus
        // the folded tool-result user message were appended.
        assert_eq!(calls[1].messages.len(), 4);
        assert!(
            calls[1].messages[2]
                .content
                .contains("Processing your request by calling")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_error_string() {
        let provider = StubProvider::new(vec![
            Ok(ProviderResponse {
                content: None,
                tool_calls: vec![call("not_registered")],
                usage: None,
            }),
            text_response("handled"),
        ]);
        let agent = agent(provider);
        let answer = agent.respond("question").await;
        assert_eq!(answer, "handled");
    }

    #[tokio::test]
    async fn test_empty_content_uses_fallback_string() {
        let provider = StubProvider::new(vec![Ok(ProviderResponse {
            content: Some("   ".into()),
            tool_calls: vec![],
            usage: None,
        })]);
        let agent = agent(provider);
        let answer = agent.respond("question").await;
        assert_eq!(answer, EMPTY_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_provider_error_becomes_apology() {
        let provider = StubProvider::new(vec![Err(BuddyError::Provider(
            "connection refused".into(),
        ))]);
        let agent = agent(provider);
        let answer = agent.respond("question").await;
        assert!(answer.contains("I encountered an issue"));
        assert!(answer.contains("connection refused"));
        assert!(answer.contains("#ask-anything"));
    }

    #[tokio::test]
    async fn test_error_in_second_call_also_becomes_apology() {
        let provider = StubProvider::new(vec![
            Ok(ProviderResponse {
                content: None,
                tool_calls: vec![call("good_tool")],
                usage: None,
            }),
            Err(BuddyError::Provider("timeout".into())),
        ]);
        let agent = agent(provider);
        let answer = agent.respond("question").await;
        assert!(answer.contains("timeout"));
        assert!(answer.contains("#ask-anything"));
    }
}
