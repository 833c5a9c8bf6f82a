//! Artifact loading: classifier and vectorizer pairs from storage

use crate::estimator::{ClassifierArtifact, ConfidenceSource, Estimator};
use crate::registry::ModelEntry;
use crate::vectorizer::{Vectorizer, VectorizerArtifact};
use phishguard_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Classifier and vectorizer from one training run, ready for inference.
///
/// Never mutated after construction; share it by reference.
pub struct LoadedModel {
    name: String,
    estimator: Box<dyn Estimator>,
    vectorizer: Box<dyn Vectorizer>,
    confidence_source: ConfidenceSource,
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("name", &self.name)
            .field("estimator", &self.estimator.kind())
            .field("vectorizer", &self.vectorizer.kind())
            .field("n_features", &self.vectorizer.n_features())
            .field("confidence_source", &self.confidence_source)
            .finish()
    }
}

impl LoadedModel {
    /// Pair a classifier with its vectorizer and probe its confidence API.
    ///
    /// Fails when the vectorizer's output width differs from what the
    /// classifier was trained on.
    pub fn new(
        name: impl Into<String>,
        estimator: Box<dyn Estimator>,
        vectorizer: Box<dyn Vectorizer>,
    ) -> Result<Self> {
        let name = name.into();
        if estimator.n_features() != vectorizer.n_features() {
            return Err(Error::config(format!(
                "model '{}': classifier expects {} features but vectorizer produces {}",
                name,
                estimator.n_features(),
                vectorizer.n_features()
            )));
        }
        let confidence_source = estimator.confidence_source();
        Ok(Self {
            name,
            estimator,
            vectorizer,
            confidence_source,
        })
    }

    /// Registry name the model was loaded under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn estimator(&self) -> &dyn Estimator {
        self.estimator.as_ref()
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    /// Confidence API resolved at load time
    pub fn confidence_source(&self) -> ConfidenceSource {
        self.confidence_source
    }
}

/// Reads artifact pairs named by registry entries
#[derive(Debug, Clone, Default)]
pub struct ArtifactLoader {
    base_dir: Option<PathBuf>,
}

impl ArtifactLoader {
    /// Loader resolving artifact paths as given
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative artifact paths against a directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Path that will actually be opened for an artifact
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Load the classifier and vectorizer for a registry entry
    pub fn load(&self, entry: &ModelEntry) -> Result<LoadedModel> {
        let start = Instant::now();

        let classifier_path = self.resolve_path(&entry.classifier_artifact_path);
        let vectorizer_path = self.resolve_path(&entry.vectorizer_artifact_path);

        let estimator = read_artifact::<ClassifierArtifact>(&classifier_path)?
            .build()
            .map_err(|reason| Error::artifact_corrupt(classifier_path.display().to_string(), reason))?;

        let vectorizer = read_artifact::<VectorizerArtifact>(&vectorizer_path)?
            .build()
            .map_err(|reason| Error::artifact_corrupt(vectorizer_path.display().to_string(), reason))?;

        if estimator.n_features() != vectorizer.n_features() {
            return Err(Error::artifact_corrupt(
                classifier_path.display().to_string(),
                format!(
                    "classifier expects {} features but vectorizer '{}' produces {}",
                    estimator.n_features(),
                    vectorizer_path.display(),
                    vectorizer.n_features()
                ),
            ));
        }

        let model = LoadedModel::new(entry.name.clone(), estimator, vectorizer)?;

        info!(
            "Loaded model '{}' ({}, {} features, confidence: {}) in {}ms",
            model.name(),
            model.estimator().kind(),
            model.vectorizer().n_features(),
            model.confidence_source(),
            start.elapsed().as_millis()
        );

        Ok(model)
    }
}

/// Open, deserialize and close one artifact file
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let shown = path.display().to_string();

    let file = File::open(path).map_err(|e| {
        debug!("Cannot open artifact {}: {}", shown, e);
        Error::artifact_not_found(shown.as_str())
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            debug!("Cannot read artifact {}: {}", shown, e);
            Error::artifact_not_found(shown.as_str())
        } else {
            Error::artifact_corrupt(shown.as_str(), e.to_string())
        }
    })
}
