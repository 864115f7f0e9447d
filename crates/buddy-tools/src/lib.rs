//! # Buddy Tools
//!
//! The capabilities Buddy exposes to the LLM: semantic knowledge search,
//! the keyword FAQ matcher, and the static company lookups, plus the
//! registry that declares their schemas and dispatches calls.

pub mod company;
pub mod data;
pub mod faq;
pub mod knowledge_search;
pub mod registry;

use std::sync::Arc;

use buddy_core::config::BuddyConfig;
use buddy_knowledge::KnowledgeStore;

pub use registry::{ToolRegistry, validate_args};

/// Build the standard registry: knowledge search plus the static lookups.
pub fn default_registry(store: Arc<KnowledgeStore>, config: &BuddyConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(knowledge_search::KnowledgeSearchTool::new(
        store,
        config.knowledge.top_k,
        config.knowledge.min_similarity,
    )));
    registry.register(Box::new(company::FaqLookupTool));
    registry.register(Box::new(company::CompanyOverviewTool));
    registry.register(Box::new(company::ProductOverviewTool));
    registry.register(Box::new(company::RoleChecklistTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use buddy_core::traits::Embedder;

    struct NullEmbedder;

    #[async_trait]
    impl Embedder for NullEmbedder {
        async fn embed(&self, _text: &str) -> buddy_core::error::Result<Vec<f32>> {
            Ok(vec![0.0])
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> buddy_core::error::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0]).collect())
        }
    }

    #[test]
    fn test_default_registry_declares_all_tools() {
        let store = Arc::new(KnowledgeStore::new(
            std::env::temp_dir().join("buddy-tools-test-registry.json"),
            Arc::new(NullEmbedder),
        ));
        let registry = default_registry(store, &BuddyConfig::default());

        let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "search_knowledge",
                "faq_lookup",
                "company_overview",
                "product_overview",
                "role_checklist"
            ]
        );
    }
}
