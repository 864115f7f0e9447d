//! Tool registry — declared capabilities and dispatch.

use buddy_core::error::{BuddyError, Result};
use buddy_core::traits::Tool;
use buddy_core::types::ToolDefinition;

/// Maps declared tool names to implementations.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Find a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// All declared tool schemas, for the provider call.
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up, validate arguments against the declared schema, and run.
    /// An unregistered name is `UnknownTool`; argument validation failures
    /// are `Tool` errors. Both are caught at the agent's dispatch boundary
    /// and folded into result strings.
    pub async fn dispatch(&self, name: &str, arguments: &serde_json::Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| BuddyError::UnknownTool(name.to_string()))?;
        validate_args(&tool.definition(), arguments)
            .map_err(BuddyError::Tool)?;
        tool.execute(arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate that a tool call carries every declared required argument.
pub fn validate_args(
    definition: &ToolDefinition,
    args: &serde_json::Value,
) -> std::result::Result<(), String> {
    let params = &definition.parameters;
    if let Some(required) = params.get("required").and_then(|r| r.as_array()) {
        for req in required {
            if let Some(key) = req.as_str()
                && args.get(key).is_none()
            {
                return Err(format!("missing required argument: {key}"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: "echo".into(),
                description: "Echo the input back".into(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": { "text": { "type": "string" } },
                    "required": ["text"]
                }),
            }
        }

        async fn execute(&self, arguments: &serde_json::Value) -> Result<String> {
            Ok(arguments["text"].as_str().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn test_validate_args_missing() {
        let def = EchoTool.definition();
        assert!(validate_args(&def, &serde_json::json!({})).is_err());
        assert!(validate_args(&def, &serde_json::json!({"text": "hi"})).is_ok());
    }

    #[test]
    fn test_validate_args_no_required_list() {
        let def = ToolDefinition {
            name: "t".into(),
            description: "d".into(),
            parameters: serde_json::json!({}),
        };
        assert!(validate_args(&def, &serde_json::json!({})).is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_runs_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let out = registry
            .dispatch("echo", &serde_json::json!({"text": "hello"}))
            .await
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch("nope", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BuddyError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_missing_required_args() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let err = registry
            .dispatch("echo", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BuddyError::Tool(_)));
    }
}
