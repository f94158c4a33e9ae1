use anyhow::Result;
use claimguard_config::Config;
use claimguard_engine::{CompletenessValidator, EnrichmentOrchestrator, TokenCounter};
use claimguard_security::{PatternRegistry, Redactor};
use std::path::Path;
use std::sync::Arc;

use super::{build_resolver, is_stdin, read_input, to_json};

pub async fn enrich(
    registry: Arc<PatternRegistry>,
    config: &Config,
    instruction: &str,
    input: Option<&Path>,
    no_filter: bool,
    text_only: bool,
) -> Result<()> {
    let claim = read_input(input)?;
    let output = enrich_text(registry, config, instruction, &claim, no_filter, text_only).await?;
    println!("{}", output);
    Ok(())
}

pub async fn validate(config: &Config, extracted: &Path, input: Option<&Path>) -> Result<()> {
    if is_stdin(Some(extracted)) && is_stdin(input) {
        anyhow::bail!("--extracted and the claim input cannot both be read from stdin");
    }

    let extracted_info = read_input(Some(extracted))?;
    let claim = read_input(input)?;
    println!("{}", validate_text(config, &extracted_info, &claim).await?);
    Ok(())
}

/// JSON enrichment result, or only the enriched instruction when `text_only`
async fn enrich_text(
    registry: Arc<PatternRegistry>,
    config: &Config,
    instruction: &str,
    claim: &str,
    no_filter: bool,
    text_only: bool,
) -> Result<String> {
    let apply_filtering = config.filter.apply_by_default && !no_filter;

    let orchestrator = EnrichmentOrchestrator::new(
        Redactor::new(registry),
        build_resolver(config)?,
        TokenCounter::new()?,
    )
    .with_max_results(config.knowledge.max_results);

    let result = orchestrator.enrich(instruction, claim, apply_filtering).await;

    if text_only {
        Ok(result.enriched_instruction)
    } else {
        to_json(&result)
    }
}

async fn validate_text(config: &Config, extracted_info: &str, claim: &str) -> Result<String> {
    let validator = CompletenessValidator::new(build_resolver(config)?)
        .with_max_results(config.knowledge.max_results);
    let result = validator.validate(extracted_info, claim).await;

    to_json(&result)
}
