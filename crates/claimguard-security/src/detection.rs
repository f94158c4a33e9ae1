use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::registry::DetectorRule;

/// Byte range `[start, end)` into the text that was scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single detector match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub detector: String,
    pub description: String,
    pub matched: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl DetectionRecord {
    pub(crate) fn redacted(rule: &DetectorRule, matched: &str, span: Span) -> Self {
        Self {
            detector: rule.name().to_string(),
            description: rule.description().to_string(),
            matched: matched.to_string(),
            replacement: Some(rule.replacement().to_string()),
            span,
            context: None,
        }
    }

    pub(crate) fn audited(rule: &DetectorRule, matched: &str, span: Span, context: String) -> Self {
        Self {
            detector: rule.name().to_string(),
            description: rule.description().to_string(),
            matched: matched.to_string(),
            replacement: None,
            span,
            context: Some(context),
        }
    }
}

/// Detection counts, total and per detector name. Per-detector counts keep
/// the order in which each detector first matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub total_detections: usize,
    pub by_type: IndexMap<String, usize>,
}

impl DetectionSummary {
    pub fn from_records(records: &[DetectionRecord]) -> Self {
        let mut by_type = IndexMap::new();
        for record in records {
            *by_type.entry(record.detector.clone()).or_insert(0) += 1;
        }

        Self {
            total_detections: records.len(),
            by_type,
        }
    }

    pub fn count(&self, detector: &str) -> usize {
        self.by_type.get(detector).copied().unwrap_or(0)
    }
}
