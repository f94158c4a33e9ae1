use anyhow::Result;
use claimguard_config::Config;
use claimguard_security::{Auditor, FilterReport, PatternRegistry, Redactor};
use std::path::Path;
use std::sync::Arc;

use super::{detector_subset, read_input, to_json};

pub fn redact(
    registry: Arc<PatternRegistry>,
    input: Option<&Path>,
    detectors: &[String],
    report: bool,
) -> Result<()> {
    let text = read_input(input)?;
    println!("{}", redact_text(registry, &text, detectors, report)?);
    Ok(())
}

pub fn audit(
    registry: Arc<PatternRegistry>,
    config: &Config,
    input: Option<&Path>,
    detectors: &[String],
    context_chars: Option<usize>,
) -> Result<()> {
    let text = read_input(input)?;
    println!("{}", audit_text(registry, config, &text, detectors, context_chars)?);
    Ok(())
}

/// JSON filter result, or the plain report when `report` is set
fn redact_text(
    registry: Arc<PatternRegistry>,
    text: &str,
    detectors: &[String],
    report: bool,
) -> Result<String> {
    let subset = detector_subset(detectors);
    let result = Redactor::new(registry).filter(text, subset.as_deref());

    if report {
        Ok(FilterReport(&result).to_string())
    } else {
        to_json(&result)
    }
}

fn audit_text(
    registry: Arc<PatternRegistry>,
    config: &Config,
    text: &str,
    detectors: &[String],
    context_chars: Option<usize>,
) -> Result<String> {
    let subset = detector_subset(detectors);
    let auditor = Auditor::new(registry)
        .with_context_chars(context_chars.unwrap_or(config.audit.context_chars));
    let result = auditor.detect_only(text, subset.as_deref());

    if result.summary.has_sensitive_data {
        tracing::warn!(
            detections = result.summary.counts.total_detections,
            "Sensitive data found"
        );
    }

    to_json(&result)
}
