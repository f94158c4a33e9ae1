use regex::NoExpand;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::detection::{DetectionRecord, DetectionSummary, Span};
use crate::registry::PatternRegistry;

/// Output of a redaction pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResult {
    pub redacted_text: String,
    pub detections: Vec<DetectionRecord>,
    pub summary: DetectionSummary,
    /// Length of the input, in characters
    pub original_length: usize,
    /// Length of the redacted output, in characters
    pub redacted_length: usize,
}

impl FilterResult {
    /// Result for text that was passed through without scanning
    pub fn passthrough(text: &str) -> Self {
        let length = text.chars().count();
        Self {
            redacted_text: text.to_string(),
            detections: Vec::new(),
            summary: DetectionSummary::default(),
            original_length: length,
            redacted_length: length,
        }
    }
}

/// Redaction engine over a shared pattern registry
pub struct Redactor {
    registry: Arc<PatternRegistry>,
}

impl Redactor {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Redact sensitive data from `text`.
    ///
    /// Detectors run in registration order, each over the output of the one
    /// before it, so spans refer to the text as that detector saw it. `None`
    /// applies every detector; unknown names in a subset are ignored.
    pub fn filter(&self, text: &str, detectors: Option<&[&str]>) -> FilterResult {
        let mut result = text.to_string();
        let mut detections = Vec::new();

        for rule in self.registry.select(detectors) {
            let before = detections.len();

            for m in rule.pattern().find_iter(&result) {
                detections.push(DetectionRecord::redacted(
                    rule,
                    m.as_str(),
                    Span::new(m.start(), m.end()),
                ));
            }

            let count = detections.len() - before;
            if count > 0 {
                result = rule
                    .pattern()
                    .replace_all(&result, NoExpand(rule.replacement()))
                    .into_owned();
                debug!(detector = rule.name(), count, "Redacted matches");
            }
        }

        let summary = DetectionSummary::from_records(&detections);

        FilterResult {
            original_length: text.chars().count(),
            redacted_length: result.chars().count(),
            redacted_text: result,
            detections,
            summary,
        }
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(Arc::new(PatternRegistry::default()))
    }
}

/// Redact `text` with the built-in detectors and return only the redacted
/// text. `detectors` restricts the pass as in [`Redactor::filter`].
pub fn filter_sensitive_data(text: &str, detectors: Option<&[&str]>) -> String {
    Redactor::default().filter(text, detectors).redacted_text
}
