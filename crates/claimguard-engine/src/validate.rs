//! Completeness scoring of extracted claim content

use claimguard_core::{ClaimCategory, ContextSource, PolicyContext, RetrievedPassage};
use claimguard_knowledge::{DEFAULT_MAX_RESULTS, PolicyContextResolver};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_complete: bool,
    pub present_fields: Vec<String>,
    pub missing_fields: Vec<String>,
    pub completeness_score: f64,
    pub source: ContextSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ClaimCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_results: Option<Vec<RetrievedPassage>>,
}

/// Field-level outcome of checking extracted text against required fields
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCheck {
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub score: f64,
}

/// A field is present when any of its lower-cased words occurs in the
/// extracted text. The score is 1.0 for an empty field list.
pub fn check_fields(required: &[&str], extracted_info: &str) -> FieldCheck {
    let extracted = extracted_info.to_lowercase();
    let (present, missing): (Vec<&str>, Vec<&str>) = required.iter().copied().partition(|field| {
        field
            .to_lowercase()
            .split_whitespace()
            .any(|keyword| extracted.contains(keyword))
    });

    let score = if required.is_empty() {
        1.0
    } else {
        present.len() as f64 / required.len() as f64
    };

    FieldCheck {
        present: present.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
        score,
    }
}

pub struct CompletenessValidator {
    resolver: PolicyContextResolver,
    max_results: usize,
}

impl CompletenessValidator {
    pub fn new(resolver: PolicyContextResolver) -> Self {
        Self {
            resolver,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Score `extracted_info` against the requirements resolved for
    /// `claim_text`.
    ///
    /// Context is resolved afresh, so the source may differ from the one used
    /// when the instruction was enriched.
    pub async fn validate(&self, extracted_info: &str, claim_text: &str) -> ValidationResult {
        match self.resolver.retrieve(claim_text, self.max_results).await {
            PolicyContext::Fallback {
                category, profile, ..
            } => {
                let check = check_fields(profile.required_info, extracted_info);
                debug!(%category, score = check.score, "Validated claim completeness");

                ValidationResult {
                    is_complete: check.missing.is_empty(),
                    present_fields: check.present,
                    missing_fields: check.missing,
                    completeness_score: check.score,
                    source: ContextSource::Fallback,
                    category: Some(category),
                    kb_results: None,
                }
            }
            // TODO: derive required fields from retrieved passages; until then
            // knowledge-base validation reports complete unconditionally.
            PolicyContext::Retrieved { results, .. } => {
                debug!(hits = results.len(), "Knowledge-base validation is not field-checked");

                ValidationResult {
                    is_complete: true,
                    present_fields: Vec::new(),
                    missing_fields: Vec::new(),
                    completeness_score: 1.0,
                    source: ContextSource::KnowledgeBase,
                    category: None,
                    kb_results: Some(results),
                }
            }
        }
    }
}
