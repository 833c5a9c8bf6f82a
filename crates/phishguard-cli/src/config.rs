//! Application configuration

use phishguard_classifiers::{ArtifactLoader, KeywordHighlighter, ModelRegistry, DEFAULT_KEYWORDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registry file; the built-in registry is used when absent
    #[serde(default)]
    pub registry: Option<PathBuf>,

    /// Base directory for relative artifact paths
    #[serde(default)]
    pub artifacts_dir: Option<PathBuf>,

    /// Model selected when none is given on the command line
    #[serde(default)]
    pub default_model: Option<String>,

    /// Suspicious keywords to highlight
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl AppConfig {
    /// Load configuration from a YAML file, or defaults when it does not exist
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Self = serde_yaml::from_str(&content)?;
            debug!("Loaded configuration from {}", config_path.display());
            Ok(config)
        } else {
            debug!(
                "No configuration at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.default_model = Some(model);
        }
        self
    }

    /// Build the model registry this configuration points at
    pub fn model_registry(&self) -> phishguard_core::Result<ModelRegistry> {
        match &self.registry {
            Some(path) => ModelRegistry::from_file(path),
            None => Ok(ModelRegistry::builtin()),
        }
    }

    pub fn artifact_loader(&self) -> ArtifactLoader {
        match &self.artifacts_dir {
            Some(dir) => ArtifactLoader::new().with_base_dir(dir),
            None => ArtifactLoader::new(),
        }
    }

    pub fn highlighter(&self) -> phishguard_core::Result<KeywordHighlighter> {
        KeywordHighlighter::new(&self.keywords)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: None,
            artifacts_dir: None,
            default_model: None,
            keywords: default_keywords(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}
