use claimguard_core::{FallbackReason, PolicyContext};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::store::KnowledgeStore;

pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves policy context for claim text.
///
/// With a knowledge store configured, a single ranked search is issued. No
/// store, a store error, or a search exceeding the timeout all degrade to
/// keyword classification; retrieval never fails the caller and is never
/// retried.
#[derive(Clone)]
pub struct PolicyContextResolver {
    store: Option<Arc<dyn KnowledgeStore>>,
    timeout: Duration,
}

impl PolicyContextResolver {
    pub fn new(store: Option<Arc<dyn KnowledgeStore>>) -> Self {
        Self {
            store,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolver that always answers from the static category catalog
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub async fn retrieve(&self, query: &str, max_results: usize) -> PolicyContext {
        let Some(store) = &self.store else {
            return Self::fallback(query, FallbackReason::NotConfigured);
        };

        match tokio::time::timeout(self.timeout, store.search(query, max_results)).await {
            Ok(Ok(results)) => {
                debug!(store = store.name(), hits = results.len(), "Retrieved policy context");
                PolicyContext::Retrieved {
                    results,
                    query: query.to_string(),
                }
            }
            Ok(Err(e)) => {
                warn!(store = store.name(), error = %e, "Knowledge store query failed, using fallback");
                Self::fallback(query, FallbackReason::StoreError(e.to_string()))
            }
            Err(_) => {
                warn!(
                    store = store.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Knowledge store query timed out, using fallback"
                );
                Self::fallback(query, FallbackReason::TimedOut)
            }
        }
    }

    fn fallback(query: &str, reason: FallbackReason) -> PolicyContext {
        let category = classify(query);
        debug!(%category, "Classified claim for fallback context");
        PolicyContext::fallback(category, query, reason)
    }
}

impl Default for PolicyContextResolver {
    fn default() -> Self {
        Self::fallback_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use claimguard_core::{ClaimCategory, Error, Result, RetrievedPassage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl KnowledgeStore for FailingStore {
        async fn search(&self, _query: &str, _max: usize) -> Result<Vec<RetrievedPassage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Retrieval("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowStore;

    #[async_trait]
    impl KnowledgeStore for SlowStore {
        async fn search(&self, _query: &str, _max: usize) -> Result<Vec<RetrievedPassage>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FixedStore;

    #[async_trait]
    impl KnowledgeStore for FixedStore {
        async fn search(&self, _query: &str, max: usize) -> Result<Vec<RetrievedPassage>> {
            Ok((0..10)
                .map(|i| RetrievedPassage {
                    content: format!("passage {i}"),
                    score: 1.0 - i as f64 / 10.0,
                    location: serde_json::json!({}),
                    metadata: serde_json::json!({}),
                })
                .take(max)
                .collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_no_store_uses_fallback() {
        let resolver = PolicyContextResolver::fallback_only();
        let ctx = resolver.retrieve("car accident on the highway", 5).await;

        match ctx {
            PolicyContext::Fallback {
                category,
                reason,
                query,
                ..
            } => {
                assert_eq!(category, ClaimCategory::AutoAccident);
                assert_eq!(reason, FallbackReason::NotConfigured);
                assert_eq!(query, "car accident on the highway");
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_error_degrades_without_retry() {
        let store = Arc::new(FailingStore {
            calls: AtomicUsize::new(0),
        });
        let resolver = PolicyContextResolver::new(Some(store.clone()));
        let ctx = resolver.retrieve("kitchen fire damage", 5).await;

        match ctx {
            PolicyContext::Fallback {
                category, reason, ..
            } => {
                assert_eq!(category, ClaimCategory::PropertyDamage);
                assert!(matches!(reason, FallbackReason::StoreError(ref m) if m.contains("connection refused")));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_degrades() {
        let resolver = PolicyContextResolver::new(Some(Arc::new(SlowStore)))
            .with_timeout(Duration::from_millis(100));
        let ctx = resolver.retrieve("broken arm treated at hospital", 5).await;

        match ctx {
            PolicyContext::Fallback {
                category, reason, ..
            } => {
                assert_eq!(category, ClaimCategory::Medical);
                assert_eq!(reason, FallbackReason::TimedOut);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_results_are_retrieved_variant() {
        let resolver = PolicyContextResolver::new(Some(Arc::new(FixedStore)));
        let ctx = resolver.retrieve("hail damage", 3).await;

        match ctx {
            PolicyContext::Retrieved { results, query } => {
                assert_eq!(results.len(), 3);
                assert_eq!(results[0].content, "passage 0");
                assert_eq!(query, "hail damage");
            }
            other => panic!("expected retrieved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unrelated_query_is_general() {
        let resolver = PolicyContextResolver::default();
        let ctx = resolver.retrieve("lost luggage at the airport", 5).await;

        match ctx {
            PolicyContext::Fallback {
                category, profile, ..
            } => {
                assert_eq!(category, ClaimCategory::General);
                assert_eq!(profile, ClaimCategory::AutoAccident.profile());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }
}
