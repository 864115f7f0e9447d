//! Knowledge search tool — semantic search over ingested documents.
//!
//! The only tool that makes a remote call (embedding the query).

use std::sync::Arc;

use async_trait::async_trait;

use buddy_core::error::Result;
use buddy_core::traits::Tool;
use buddy_core::types::ToolDefinition;
use buddy_knowledge::KnowledgeStore;

pub struct KnowledgeSearchTool {
    store: Arc<KnowledgeStore>,
    top_k: usize,
    min_similarity: f32,
}

impl KnowledgeSearchTool {
    pub fn new(store: Arc<KnowledgeStore>, top_k: usize, min_similarity: f32) -> Self {
        Self {
            store,
            top_k,
            min_similarity,
        }
    }
}

#[async_trait]
impl Tool for KnowledgeSearchTool {
    fn name(&self) -> &str {
        "search_knowledge"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search_knowledge".into(),
            description: "Search the ingested knowledge base (internal docs, guides, and \
channel history) for topics not covered by the standard FAQs: onboarding day-by-day \
guidance, project workflows, engineering practices, and product deep-dives. This is \
the primary source for detailed, company-specific information."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The question or topic to search for"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, arguments: &serde_json::Value) -> Result<String> {
        let query = arguments["query"].as_str().unwrap_or_default();

        let results = self
            .store
            .search(query, self.top_k, self.min_similarity)
            .await?;

        if results.is_empty() {
            return Ok(format!(
                "No relevant documents found for \"{query}\". The knowledge base may not \
cover this topic yet."
            ));
        }

        let mut out = format!("Found {} relevant excerpt(s):\n\n", results.len());
        for (i, r) in results.iter().enumerate() {
            out.push_str(&format!(
                "{}. [{}] (relevance {:.2})\n{}\n\n",
                i + 1,
                r.chunk.metadata.source,
                r.similarity,
                r.chunk.content
            ));
        }
        Ok(out)
    }
}
