//! PhishGuard Classifiers
//!
//! Phishing detection over pre-trained text classifiers.
//!
//! The flow is:
//! - [`ModelRegistry`] resolves a model name to a classifier/vectorizer pair
//! - [`ArtifactLoader`] deserializes both artifacts into a [`LoadedModel`]
//! - [`InferenceEngine`] vectorizes the email, predicts a label and derives
//!   a confidence from class probabilities or a decision margin
//! - [`KeywordHighlighter`] marks suspicious terms for display
//!
//! Models are trained elsewhere; this crate only performs inference.

pub mod estimator;
pub mod features;
pub mod highlight;
pub mod inference;
pub mod model_loader;
pub mod registry;
pub mod vectorizer;

pub use estimator::{ClassifierArtifact, ConfidenceSource, Estimator};
pub use features::FeatureVector;
pub use highlight::{highlight, KeywordHighlighter, DEFAULT_KEYWORDS, MARK_CLOSE, MARK_OPEN};
pub use inference::{predict, Analysis, InferenceEngine};
pub use model_loader::{ArtifactLoader, LoadedModel};
pub use registry::{ModelEntry, ModelRegistry, NAIVE_BAYES_MODEL, SVC_MODEL};
pub use vectorizer::{transform, TfidfSpec, TfidfVectorizer, Vectorizer, VectorizerArtifact};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::estimator::{ConfidenceSource, Estimator};
    pub use crate::highlight::KeywordHighlighter;
    pub use crate::inference::{Analysis, InferenceEngine};
    pub use crate::model_loader::{ArtifactLoader, LoadedModel};
    pub use crate::registry::{ModelEntry, ModelRegistry};
    pub use crate::vectorizer::Vectorizer;
    pub use phishguard_core::{Error, Label, PredictionResult, Result};
}
