//! Policy context resolved for a claim query

use serde::{Deserialize, Serialize};

use crate::category::{CategoryProfile, ClaimCategory};

/// One ranked hit returned by a knowledge store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub content: String,
    pub score: f64,
    #[serde(default)]
    pub location: serde_json::Value,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Why the resolver answered from the static catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    NotConfigured,
    StoreError(String),
    TimedOut,
}

/// Outcome of resolving policy context: either passages retrieved from a
/// knowledge store, or a keyword-classified category with its static profile.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PolicyContext {
    #[serde(rename = "knowledge_base")]
    Retrieved {
        results: Vec<RetrievedPassage>,
        query: String,
    },
    Fallback {
        category: ClaimCategory,
        profile: &'static CategoryProfile,
        query: String,
        reason: FallbackReason,
    },
}

impl PolicyContext {
    pub fn fallback(category: ClaimCategory, query: &str, reason: FallbackReason) -> Self {
        PolicyContext::Fallback {
            category,
            profile: category.profile(),
            query: query.to_string(),
            reason,
        }
    }

    pub fn source(&self) -> ContextSource {
        match self {
            PolicyContext::Retrieved { .. } => ContextSource::KnowledgeBase,
            PolicyContext::Fallback { .. } => ContextSource::Fallback,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            PolicyContext::Retrieved { query, .. } | PolicyContext::Fallback { query, .. } => {
                query
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PolicyContext::Fallback { .. })
    }
}

/// Tag naming which `PolicyContext` variant produced a downstream result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    KnowledgeBase,
    Fallback,
}
