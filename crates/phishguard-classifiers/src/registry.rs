//! Model registry: model names to artifact pairs

use phishguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the built-in support vector model
pub const SVC_MODEL: &str = "SVC";

/// Name of the built-in naive Bayes model
pub const NAIVE_BAYES_MODEL: &str = "Naive Bayes";

/// Artifact pair registered under a model name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Unique model name
    pub name: String,

    /// Serialized classifier
    #[serde(rename = "classifier")]
    pub classifier_artifact_path: PathBuf,

    /// Serialized vectorizer fitted in the same training run
    #[serde(rename = "vectorizer")]
    pub vectorizer_artifact_path: PathBuf,
}

impl ModelEntry {
    pub fn new(
        name: impl Into<String>,
        classifier: impl Into<PathBuf>,
        vectorizer: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            classifier_artifact_path: classifier.into(),
            vectorizer_artifact_path: vectorizer.into(),
        }
    }
}

/// On-disk registry layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    default_model: Option<String>,
    models: Vec<ModelEntry>,
}

/// Immutable set of selectable models, in registration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
    default_model: Option<String>,
}

impl ModelRegistry {
    /// Create a registry from entries; names must be unique and non-empty
    pub fn new(entries: Vec<ModelEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::config("model registry has no models"));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(Error::config(format!("model #{} has an empty name", i + 1)));
            }
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(Error::config(format!(
                    "model '{}' is registered twice",
                    entry.name
                )));
            }
        }
        Ok(Self {
            entries,
            default_model: None,
        })
    }

    /// The two models shipped with the training pipeline
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ModelEntry::new(
                    SVC_MODEL,
                    "phishing_detector_model_svc.json",
                    "tfidf_vectorizer_svc.json",
                ),
                ModelEntry::new(
                    NAIVE_BAYES_MODEL,
                    "phishing_detector_model_naive.json",
                    "tfidf_vectorizer_naive.json",
                ),
            ],
            default_model: None,
        }
    }

    /// Select the default model; it must already be registered
    pub fn with_default(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if self.resolve(&name).is_err() {
            return Err(Error::config(format!(
                "default model '{}' is not registered",
                name
            )));
        }
        self.default_model = Some(name);
        Ok(self)
    }

    /// Load registry from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: RegistryFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("invalid model registry: {}", e)))?;

        let registry = Self::new(file.models)?;
        match file.default_model {
            Some(name) => registry.with_default(name),
            None => Ok(registry),
        }
    }

    /// Load registry from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read model registry {}: {}",
                path.display(),
                e
            ))
        })?;
        let registry = Self::from_yaml(&contents)?;
        info!(
            "Loaded model registry from {} with {} models",
            path.display(),
            registry.len()
        );
        Ok(registry)
    }

    /// Look up a model by name
    pub fn resolve(&self, name: &str) -> Result<&ModelEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    /// Model selected when the caller does not name one
    pub fn default_entry(&self) -> &ModelEntry {
        self.default_model
            .as_deref()
            .and_then(|name| self.entries.iter().find(|e| e.name == name))
            .unwrap_or(&self.entries[0])
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
