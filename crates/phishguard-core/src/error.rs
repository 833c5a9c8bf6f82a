//! Error types for PhishGuard

/// Result type alias using PhishGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for PhishGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model name is not present in the registry
    #[error("unknown model: '{0}'")]
    UnknownModel(String),

    /// Artifact file is missing or cannot be opened
    #[error("artifact not found: '{path}'")]
    ArtifactNotFound { path: String },

    /// Artifact file was read but does not describe a usable model
    #[error("artifact corrupt: '{path}': {reason}")]
    ArtifactCorrupt { path: String, reason: String },

    /// Vectorizer could not turn the input into features
    #[error("transform failure: {0}")]
    TransformFailure(String),

    /// Classifier failed on a feature vector
    #[error("inference error: {0}")]
    Inference(String),

    /// Classifier produced a class name with no label mapping
    #[error("unrecognized class label: '{0}'")]
    UnrecognizedLabel(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Other IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new artifact-not-found error
    pub fn artifact_not_found(path: impl Into<String>) -> Self {
        Self::ArtifactNotFound { path: path.into() }
    }

    /// Create a new artifact-corrupt error
    pub fn artifact_corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArtifactCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new transform error
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::TransformFailure(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error happened while loading artifacts.
    ///
    /// Load errors end the session; everything else only fails the current
    /// analysis.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownModel(_) | Self::ArtifactNotFound { .. } | Self::ArtifactCorrupt { .. }
        )
    }
}
