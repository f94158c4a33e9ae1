//! Knowledge store trait

use async_trait::async_trait;
use claimguard_core::{Result, RetrievedPassage};

/// A ranked semantic search capability over policy documents.
///
/// Implementations may fail for any reason; callers treat every error as the
/// store being unavailable.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Up to `max_results` passages for `query`, best match first
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedPassage>>;

    /// Short label used in logs
    fn name(&self) -> &str;
}
