//! Static-lookup tools: FAQ, mission and values, product overview, and
//! role checklists. Side-effect free, no network.

use async_trait::async_trait;

use buddy_core::error::Result;
use buddy_core::traits::Tool;
use buddy_core::types::ToolDefinition;

use crate::data;
use crate::faq;

/// Curated FAQ lookup via the keyword matcher.
pub struct FaqLookupTool;

#[async_trait]
impl Tool for FaqLookupTool {
    fn name(&self) -> &str {
        "faq_lookup"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "faq_lookup".into(),
            description: "Search the curated FAQ for answers about policies, processes, \
tools, channels, benefits, and first-week guidance. Best for specific questions like \
PTO policy, expense reimbursement, or tool access."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The question or topic to search for, e.g. \"What is PTO?\""
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, arguments: &serde_json::Value) -> Result<String> {
        let query = arguments["query"].as_str().unwrap_or_default();
        Ok(faq::lookup(query))
    }
}

/// Company mission, values, and ways of working.
pub struct CompanyOverviewTool;

#[async_trait]
impl Tool for CompanyOverviewTool {
    fn name(&self) -> &str {
        "company_overview"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "company_overview".into(),
            description: "Get the company's mission, core values, culture, and ways of \
working. Use when the user asks about the mission, values, culture, or how the company \
operates."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _arguments: &serde_json::Value) -> Result<String> {
        Ok(data::mission_and_values().to_string())
    }
}

/// Product description, features, tech stack, and channels.
pub struct ProductOverviewTool;

#[async_trait]
impl Tool for ProductOverviewTool {
    fn name(&self) -> &str {
        "product_overview"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "product_overview".into(),
            description: "Get a detailed overview of the flagship product: what it does, \
key capabilities, technology stack, and the related chat channels."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _arguments: &serde_json::Value) -> Result<String> {
        Ok(data::product_overview().to_string())
    }
}

/// Role-specific onboarding checklist.
pub struct RoleChecklistTool;

#[async_trait]
impl Tool for RoleChecklistTool {
    fn name(&self) -> &str {
        "role_checklist"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "role_checklist".into(),
            description: "Get the onboarding checklist for a new employee's role. Use when \
the user asks what to focus on or what their onboarding steps are."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "role": {
                        "type": "string",
                        "enum": ["developer", "product", "design", "marketing", "operations", "other"],
                        "description": "The employee's role or department"
                    }
                },
                "required": ["role"]
            }),
        }
    }

    async fn execute(&self, arguments: &serde_json::Value) -> Result<String> {
        let role = data::Role::parse(arguments["role"].as_str().unwrap_or("other"));
        Ok(data::format_checklist(role))
    }
}
