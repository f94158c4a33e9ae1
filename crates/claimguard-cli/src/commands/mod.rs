pub mod detectors;
pub mod pipeline;
pub mod scan;

use anyhow::{Context, Result};
use claimguard_config::{Config, KnowledgeBackend};
use claimguard_knowledge::{
    HttpKnowledgeStore, KnowledgeStore, MemoryKnowledgeStore, PolicyContextResolver,
};
use claimguard_security::{PatternRegistry, RuleSpec};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Read a file, or stdin when no path (or "-") is given
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn is_stdin(input: Option<&Path>) -> bool {
    input.is_none_or(|path| path == Path::new("-"))
}

/// Built-in detectors plus any custom ones from config
pub fn build_registry(config: &Config) -> Result<PatternRegistry> {
    let mut registry = PatternRegistry::default();
    registry.register_all(config.filter.custom.iter().map(|c| RuleSpec {
        name: c.name.clone(),
        pattern: c.pattern.clone(),
        replacement: c.replacement.clone(),
        description: c.description.clone(),
    }))?;
    Ok(registry)
}

pub fn build_resolver(config: &Config) -> Result<PolicyContextResolver> {
    let knowledge = &config.knowledge;

    let store: Option<Arc<dyn KnowledgeStore>> = match knowledge.backend {
        KnowledgeBackend::None => None,
        KnowledgeBackend::Http => {
            let endpoint = knowledge
                .endpoint
                .clone()
                .context("knowledge.endpoint is not set")?;
            let id = knowledge
                .knowledge_base_id
                .clone()
                .context("knowledge.knowledge_base_id is not set")?;
            Some(Arc::new(HttpKnowledgeStore::new(endpoint, id, knowledge.timeout())?))
        }
        KnowledgeBackend::Memory => {
            let store = MemoryKnowledgeStore::load_files(&knowledge.documents)?;
            tracing::info!(passages = store.len(), "Loaded local policy documents");
            Some(Arc::new(store))
        }
    };

    Ok(PolicyContextResolver::new(store).with_timeout(knowledge.timeout()))
}

/// Detector subset from a CLI list; empty means all
pub fn detector_subset(detectors: &[String]) -> Option<Vec<&str>> {
    (!detectors.is_empty()).then(|| detectors.iter().map(String::as_str).collect())
}
