//! Instruction enrichment with policy context

use claimguard_core::PolicyContext;
use claimguard_knowledge::{DEFAULT_MAX_RESULTS, PolicyContextResolver};
use claimguard_security::{DetectionRecord, DetectionSummary, FilterResult, Redactor};
use serde::Serialize;
use std::fmt::Write;
use tracing::info;

use crate::tokens::TokenCounter;

/// Retrieved passages included in a context block
const MAX_CONTEXT_PASSAGES: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentResult {
    pub base_instruction: String,
    pub original_text: String,
    /// Redacted claim text, or the original text when filtering is off
    pub filtered_text: String,
    pub filter_summary: DetectionSummary,
    pub detections: Vec<DetectionRecord>,
    pub policy_context: PolicyContext,
    pub enriched_instruction: String,
    pub stats: EnrichmentStats,
}

/// Size of the instruction before and after enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnrichmentStats {
    pub base_length: usize,
    pub enriched_length: usize,
    pub context_added: usize,
    pub base_tokens: usize,
    pub enriched_tokens: usize,
    pub tokens_added: usize,
}

pub struct EnrichmentOrchestrator {
    redactor: Redactor,
    resolver: PolicyContextResolver,
    tokens: TokenCounter,
    max_results: usize,
}

impl EnrichmentOrchestrator {
    pub fn new(redactor: Redactor, resolver: PolicyContextResolver, tokens: TokenCounter) -> Self {
        Self {
            redactor,
            resolver,
            tokens,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Prepend policy context for `claim_text` to `base_instruction`.
    ///
    /// When `apply_filtering` is set the claim is redacted first and only the
    /// redacted text is used as the retrieval query.
    pub async fn enrich(
        &self,
        base_instruction: &str,
        claim_text: &str,
        apply_filtering: bool,
    ) -> EnrichmentResult {
        let filtered = if apply_filtering {
            self.redactor.filter(claim_text, None)
        } else {
            FilterResult::passthrough(claim_text)
        };

        let policy_context = self
            .resolver
            .retrieve(&filtered.redacted_text, self.max_results)
            .await;

        let mut enriched_instruction = render_context(&policy_context);
        enriched_instruction.push_str(base_instruction);

        let stats = self.stats(base_instruction, &enriched_instruction);
        info!(
            source = ?policy_context.source(),
            detections = filtered.summary.total_detections,
            context_added = stats.context_added,
            tokens_added = stats.tokens_added,
            "Enriched instruction"
        );

        EnrichmentResult {
            base_instruction: base_instruction.to_string(),
            original_text: claim_text.to_string(),
            filtered_text: filtered.redacted_text,
            filter_summary: filtered.summary,
            detections: filtered.detections,
            policy_context,
            enriched_instruction,
            stats,
        }
    }

    fn stats(&self, base: &str, enriched: &str) -> EnrichmentStats {
        let base_length = base.chars().count();
        let enriched_length = enriched.chars().count();
        let base_tokens = self.tokens.count(base);
        let enriched_tokens = self.tokens.count(enriched);

        EnrichmentStats {
            base_length,
            enriched_length,
            context_added: enriched_length - base_length,
            base_tokens,
            enriched_tokens,
            tokens_added: enriched_tokens.saturating_sub(base_tokens),
        }
    }
}

/// Format policy context as the block placed ahead of an instruction
pub fn render_context(context: &PolicyContext) -> String {
    let mut block = String::new();

    match context {
        PolicyContext::Retrieved { results, .. } => {
            block.push_str("\nPOLICY CONTEXT FROM KNOWLEDGE BASE:\n");
            for (i, passage) in results.iter().take(MAX_CONTEXT_PASSAGES).enumerate() {
                let _ = write!(block, "\n{}. {}\n", i + 1, passage.content);
            }
        }
        PolicyContext::Fallback {
            category, profile, ..
        } => {
            let _ = write!(
                block,
                "\nPOLICY CONTEXT:\n\
                 - Claim Type: {}\n\
                 - Coverage Types: {}\n\
                 - Required Information: {}\n\
                 - Typical Deductible: {}\n\
                 - Expected Processing Time: {}\n\
                 - Required Documentation: {}\n\n",
                category.display_name(),
                profile.coverage_types.join(", "),
                profile.required_info.join(", "),
                profile.typical_deductible,
                profile.processing_time,
                profile.documentation,
            );
        }
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use claimguard_core::{ClaimCategory, FallbackReason, Result, RetrievedPassage};
    use claimguard_knowledge::KnowledgeStore;
    use std::sync::Arc;

    struct FixedStore(usize);

    #[async_trait]
    impl KnowledgeStore for FixedStore {
        async fn search(&self, _query: &str, max: usize) -> Result<Vec<RetrievedPassage>> {
            Ok((1..=self.0.min(max))
                .map(|i| RetrievedPassage {
                    content: format!("Policy clause {i}"),
                    score: 0.5,
                    location: serde_json::json!({}),
                    metadata: serde_json::json!({}),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn orchestrator(resolver: PolicyContextResolver) -> EnrichmentOrchestrator {
        EnrichmentOrchestrator::new(Redactor::default(), resolver, TokenCounter::new().unwrap())
    }

    #[test]
    fn test_render_fallback_block() {
        let ctx = PolicyContext::fallback(
            ClaimCategory::PropertyDamage,
            "fire",
            FallbackReason::NotConfigured,
        );

        assert_eq!(
            render_context(&ctx),
            "\nPOLICY CONTEXT:\n\
             - Claim Type: Property Damage\n\
             - Coverage Types: Homeowners, Renters, Property\n\
             - Required Information: Date of incident, Cause of damage, Extent of damage\n\
             - Typical Deductible: $1000-$2500\n\
             - Expected Processing Time: 10-21 business days\n\
             - Required Documentation: Photos, repair estimates, receipts for damaged items\n\n"
        );
    }

    #[test]
    fn test_render_retrieved_block_caps_passages() {
        let results = (1..=5)
            .map(|i| RetrievedPassage {
                content: format!("clause {i}"),
                score: 1.0,
                location: serde_json::json!({}),
                metadata: serde_json::json!({}),
            })
            .collect();
        let ctx = PolicyContext::Retrieved {
            results,
            query: "q".to_string(),
        };

        assert_eq!(
            render_context(&ctx),
            "\nPOLICY CONTEXT FROM KNOWLEDGE BASE:\n\n1. clause 1\n\n2. clause 2\n\n3. clause 3\n"
        );
    }

    #[tokio::test]
    async fn test_enrich_with_filtering() {
        let orchestrator = orchestrator(PolicyContextResolver::fallback_only());
        let claim = "Car accident on I-94. Claimant SSN 123-45-6789, email jo@ex.com";
        let result = orchestrator
            .enrich("Summarize the claim.", claim, true)
            .await;

        assert_eq!(result.original_text, claim);
        assert!(result.filtered_text.contains("XXX-XX-XXXX"));
        assert!(!result.filtered_text.contains("jo@ex.com"));
        assert_eq!(result.filter_summary.total_detections, 2);
        assert_eq!(result.detections.len(), 2);
        assert!(result.enriched_instruction.starts_with("\nPOLICY CONTEXT:\n- Claim Type: Auto Accident\n"));
        assert!(result.enriched_instruction.ends_with("Summarize the claim."));
        assert_eq!(result.policy_context.query(), result.filtered_text);
    }

    #[tokio::test]
    async fn test_enrich_without_filtering() {
        let orchestrator = orchestrator(PolicyContextResolver::fallback_only());
        let claim = "Water leak, contact 555-123-4567";
        let result = orchestrator.enrich("Summarize.", claim, false).await;

        assert_eq!(result.filtered_text, claim);
        assert_eq!(result.filter_summary.total_detections, 0);
        assert!(result.detections.is_empty());
        assert!(result.enriched_instruction.contains("- Claim Type: Property Damage"));
    }

    #[tokio::test]
    async fn test_enrich_stats() {
        let orchestrator = orchestrator(PolicyContextResolver::fallback_only());
        let base = "Summarize the claim.";
        let result = orchestrator.enrich(base, "hospital stay", true).await;
        let stats = result.stats;

        assert_eq!(stats.base_length, base.len());
        assert_eq!(stats.enriched_length, result.enriched_instruction.chars().count());
        assert_eq!(stats.context_added, stats.enriched_length - stats.base_length);
        assert!(stats.base_tokens > 0);
        assert!(stats.enriched_tokens > stats.base_tokens);
        assert_eq!(stats.tokens_added, stats.enriched_tokens - stats.base_tokens);
    }

    #[tokio::test]
    async fn test_enrich_with_knowledge_store() {
        let resolver = PolicyContextResolver::new(Some(Arc::new(FixedStore(4))));
        let orchestrator = orchestrator(resolver).with_max_results(4);
        let result = orchestrator.enrich("Summarize.", "hail on roof", true).await;

        assert!(!result.policy_context.is_fallback());
        assert_eq!(
            result.enriched_instruction,
            "\nPOLICY CONTEXT FROM KNOWLEDGE BASE:\n\n1. Policy clause 1\n\n\
             2. Policy clause 2\n\n3. Policy clause 3\nSummarize."
        );
    }
}
