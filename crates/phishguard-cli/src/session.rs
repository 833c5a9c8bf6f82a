//! One analysis session: a model selected and loaded at startup

use crate::config::AppConfig;
use phishguard_classifiers::{Analysis, ArtifactLoader, InferenceEngine, ModelEntry, ModelRegistry};
use phishguard_core::{Error, Result};
use tracing::info;

/// A loaded model ready to analyze emails
#[derive(Debug)]
pub struct Session {
    engine: InferenceEngine,
}

impl Session {
    /// Resolve the configured model and load its artifacts.
    ///
    /// Fails if the model is unknown, an artifact is missing or corrupt, or
    /// the keyword list cannot be compiled.
    pub fn start(config: &AppConfig) -> Result<Self> {
        let registry = config.model_registry()?;
        let entry = select_model(&registry, config.default_model.as_deref())?;
        let model = config.artifact_loader().load(entry)?;
        let engine = InferenceEngine::new(model).with_highlighter(config.highlighter()?);

        info!("Session started with model '{}'", entry.name);
        Ok(Self { engine })
    }

    pub fn model_name(&self) -> &str {
        self.engine.model().name()
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Classify one email and highlight it
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        self.engine.analyze(text)
    }
}

/// The named model, or the registry default when no name is given
pub fn select_model<'a>(registry: &'a ModelRegistry, name: Option<&str>) -> Result<&'a ModelEntry> {
    match name {
        Some(name) => registry.resolve(name),
        None => Ok(registry.default_entry()),
    }
}

/// Operator guidance printed when a model cannot be loaded
pub fn training_hint(loader: &ArtifactLoader, entry: &ModelEntry) -> String {
    format!(
        "Model or vectorizer file not found. Please run the training pipeline first to create '{}' and '{}'.",
        loader.resolve_path(&entry.classifier_artifact_path).display(),
        loader.resolve_path(&entry.vectorizer_artifact_path).display()
    )
}

/// Operator guidance for a failed [`Session::start`], if the failure is one
/// the operator can fix
pub fn load_failure_guidance(config: &AppConfig, err: &Error) -> Option<String> {
    match err {
        Error::ArtifactNotFound { .. } => {
            let registry = config.model_registry().ok()?;
            let entry = select_model(&registry, config.default_model.as_deref()).ok()?;
            Some(training_hint(&config.artifact_loader(), entry))
        }
        Error::ArtifactCorrupt { path, .. } => Some(format!(
            "Artifact '{}' is malformed or does not match its pair. Regenerate it with the training pipeline.",
            path
        )),
        Error::UnknownModel(_) => {
            let registry = config.model_registry().ok()?;
            Some(format!("Available models: {}", registry.names().join(", ")))
        }
        _ => None,
    }
}
