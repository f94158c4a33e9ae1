//! Detect-only scanning for review and audit

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::detection::{DetectionRecord, DetectionSummary, Span};
use crate::registry::PatternRegistry;

/// Characters of surrounding text captured on each side of a match
pub const DEFAULT_CONTEXT_CHARS: usize = 30;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    #[serde(flatten)]
    pub counts: DetectionSummary,
    pub has_sensitive_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub detections: Vec<DetectionRecord>,
    pub summary: AuditSummary,
}

/// Runs detectors without modifying the text. Every detector scans the
/// original input, so overlapping matches across detectors are all reported.
pub struct Auditor {
    registry: Arc<PatternRegistry>,
    context_chars: usize,
}

impl Auditor {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self {
            registry,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    pub fn with_context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars;
        self
    }

    pub fn detect_only(&self, text: &str, detectors: Option<&[&str]>) -> AuditResult {
        let mut detections = Vec::new();

        for rule in self.registry.select(detectors) {
            for m in rule.pattern().find_iter(text) {
                let span = Span::new(m.start(), m.end());
                let context = context_window(text, span, self.context_chars);
                detections.push(DetectionRecord::audited(rule, m.as_str(), span, context));
            }
        }

        let counts = DetectionSummary::from_records(&detections);
        debug!(total = counts.total_detections, "Audited text");

        AuditResult {
            summary: AuditSummary {
                has_sensitive_data: counts.total_detections > 0,
                counts,
            },
            detections,
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(Arc::new(PatternRegistry::default()))
    }
}

/// Up to `radius` characters either side of `span`, with an ellipsis on each
/// side where the window stops short of the text boundary.
fn context_window(text: &str, span: Span, radius: usize) -> String {
    let start = text[..span.start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(span.start, |(i, _)| i);
    let end = text[span.end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| span.end + i);

    let mut context = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        context.push_str(ELLIPSIS);
    }
    context.push_str(&text[start..end]);
    if end < text.len() {
        context.push_str(ELLIPSIS);
    }
    context
}
