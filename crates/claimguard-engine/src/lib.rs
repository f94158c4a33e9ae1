//! Claim pipeline: redaction, policy-context enrichment and completeness
//! validation

pub mod enrich;
pub mod tokens;
pub mod validate;

pub use enrich::{EnrichmentOrchestrator, EnrichmentResult, EnrichmentStats, render_context};
pub use tokens::TokenCounter;
pub use validate::{CompletenessValidator, FieldCheck, ValidationResult, check_fields};
