//! Sensitive-data detection and redaction for claim documents

pub mod audit;
pub mod detection;
pub mod redactor;
pub mod registry;
pub mod report;

pub use audit::{AuditResult, AuditSummary, Auditor, DEFAULT_CONTEXT_CHARS};
pub use detection::{DetectionRecord, DetectionSummary, Span};
pub use redactor::{FilterResult, Redactor, filter_sensitive_data};
pub use registry::{DetectorRule, PatternRegistry, RuleSpec};
pub use report::FilterReport;
