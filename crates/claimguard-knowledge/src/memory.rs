use async_trait::async_trait;
use claimguard_core::{Error, Result, RetrievedPassage};
use std::path::Path;

use crate::store::KnowledgeStore;

/// In-process knowledge store ranking passages by query-term overlap.
///
/// A passage scores the fraction of distinct query terms it contains.
/// Passages scoring zero are never returned.
#[derive(Debug, Default)]
pub struct MemoryKnowledgeStore {
    passages: Vec<StoredPassage>,
}

#[derive(Debug)]
struct StoredPassage {
    content: String,
    content_lower: String,
    location: serde_json::Value,
}

impl MemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, content: impl Into<String>, location: impl Into<String>) {
        let content = content.into();
        self.passages.push(StoredPassage {
            content_lower: content.to_lowercase(),
            content,
            location: serde_json::json!({ "type": "memory", "uri": location.into() }),
        });
    }

    /// Load each file as one passage, located by its path
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut store = Self::new();
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::Other(anyhow::anyhow!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            store.add(content, path.display().to_string());
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(str::to_lowercase)
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

#[async_trait]
impl KnowledgeStore for MemoryKnowledgeStore {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedPassage>> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f64, &StoredPassage)> = self
            .passages
            .iter()
            .filter_map(|p| {
                let hits = terms.iter().filter(|t| p.content_lower.contains(*t)).count();
                (hits > 0).then(|| (hits as f64 / terms.len() as f64, p))
            })
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(max_results)
            .map(|(score, p)| RetrievedPassage {
                content: p.content.clone(),
                score,
                location: p.location.clone(),
                metadata: serde_json::json!({}),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
