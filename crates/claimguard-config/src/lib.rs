use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for claimguard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeBackend {
    /// Always use keyword classification
    #[default]
    None,
    /// Remote vector-search retrieve endpoint
    Http,
    /// Local documents ranked in process
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    #[serde(default)]
    pub backend: KnowledgeBackend,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub documents: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_true")]
    pub apply_by_default: bool,

    #[serde(default)]
    pub custom: Vec<CustomDetector>,
}

/// Detector added on top of the built-in set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDetector {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            backend: KnowledgeBackend::default(),
            endpoint: None,
            knowledge_base_id: None,
            max_results: default_max_results(),
            timeout_ms: default_timeout_ms(),
            documents: Vec::new(),
        }
    }
}

impl KnowledgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            apply_by_default: true,
            custom: Vec::new(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            context_chars: default_context_chars(),
        }
    }
}

fn default_max_results() -> usize {
    5
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_context_chars() -> usize {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "claimguard", "claimguard") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.claimguard/config.toml")
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.knowledge.backend == KnowledgeBackend::Http {
            if self.knowledge.endpoint.is_none() {
                anyhow::bail!("knowledge.endpoint is required for the http backend");
            }
            if self.knowledge.knowledge_base_id.is_none() {
                anyhow::bail!("knowledge.knowledge_base_id is required for the http backend");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.knowledge.backend, KnowledgeBackend::None);
        assert_eq!(config.knowledge.max_results, 5);
        assert_eq!(config.knowledge.timeout(), Duration::from_secs(5));
        assert!(config.filter.apply_by_default);
        assert_eq!(config.audit.context_chars, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.knowledge.max_results, config.knowledge.max_results);
        assert_eq!(parsed.knowledge.backend, config.knowledge.backend);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[knowledge]
backend = "http"
endpoint = "https://kb.example.com"
knowledge_base_id = "KB123"
timeout_ms = 250

[[filter.custom]]
name = "policy_number"
pattern = '\bPOL-\d{6}\b'
replacement = "POL-XXXXXX"
description = "Policy Number"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.knowledge.backend, KnowledgeBackend::Http);
        assert_eq!(config.knowledge.timeout(), Duration::from_millis(250));
        assert_eq!(config.knowledge.max_results, 5);
        assert_eq!(config.filter.custom.len(), 1);
        assert_eq!(config.filter.custom[0].pattern, r"\bPOL-\d{6}\b");
        assert!(config.filter.apply_by_default);
    }

    #[test]
    fn test_http_backend_requires_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[knowledge]\nbackend = \"http\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }
}
