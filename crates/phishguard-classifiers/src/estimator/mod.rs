//! Trained classifiers and their confidence capabilities

mod centroid;
mod linear;
mod naive_bayes;

pub use centroid::NearestCentroid;
pub use linear::{LinearModel, LinearSvc, LogisticRegression};
pub use naive_bayes::MultinomialNb;

use crate::features::FeatureVector;
use phishguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which confidence API a classifier offers.
///
/// Probed once when a model is loaded; inference dispatches on the stored
/// value instead of re-checking the classifier on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceSource {
    /// Class-probability estimates are available
    Probabilities,
    /// Only a signed decision margin is available
    Margin,
    /// No confidence signal
    Unavailable,
}

impl ConfidenceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Probabilities => "probabilities",
            Self::Margin => "margin",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ConfidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trained classifier over a fixed feature space
pub trait Estimator: Send + Sync + fmt::Debug {
    /// Class names in output order
    fn classes(&self) -> &[String];

    /// Width of the feature space the classifier was trained on
    fn n_features(&self) -> usize;

    /// Short identifier of the classifier family
    fn kind(&self) -> &'static str;

    /// Index into `classes()` of the predicted class
    fn predict(&self, features: &FeatureVector) -> Result<usize>;

    /// Whether `predict_proba` is implemented
    fn supports_probabilities(&self) -> bool {
        false
    }

    /// Whether `decision_margin` is implemented
    fn supports_margin(&self) -> bool {
        false
    }

    /// Posterior probability per class, aligned with `classes()`
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>> {
        Err(Error::inference(format!(
            "{} does not provide class probabilities",
            self.kind()
        )))
    }

    /// Signed distance from the separating boundary.
    ///
    /// For binary models this is the raw decision value; for multi-class
    /// models it is the decision value of the winning class.
    fn decision_margin(&self, _features: &FeatureVector) -> Result<f64> {
        Err(Error::inference(format!(
            "{} does not provide a decision margin",
            self.kind()
        )))
    }

    /// Resolve the confidence API, probabilities first
    fn confidence_source(&self) -> ConfidenceSource {
        if self.supports_probabilities() {
            ConfidenceSource::Probabilities
        } else if self.supports_margin() {
            ConfidenceSource::Margin
        } else {
            ConfidenceSource::Unavailable
        }
    }
}

/// Serialized classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LinearSvc(LinearModel),
    LogisticRegression(LinearModel),
    MultinomialNb(MultinomialNb),
    NearestCentroid(NearestCentroid),
}

impl ClassifierArtifact {
    /// Validate and build the runtime classifier
    pub fn build(self) -> std::result::Result<Box<dyn Estimator>, String> {
        Ok(match self {
            Self::LinearSvc(model) => Box::new(LinearSvc::new(model)?),
            Self::LogisticRegression(model) => Box::new(LogisticRegression::new(model)?),
            Self::MultinomialNb(model) => Box::new(model.validated()?),
            Self::NearestCentroid(model) => Box::new(model.validated()?),
        })
    }
}

/// Fail when a feature vector does not fit the classifier's feature space
pub(crate) fn check_width(estimator: &dyn Estimator, features: &FeatureVector) -> Result<()> {
    if features.dim() != estimator.n_features() {
        return Err(Error::inference(format!(
            "{} expects {} features but received {}",
            estimator.kind(),
            estimator.n_features(),
            features.dim()
        )));
    }
    Ok(())
}

/// Check class names and a `rows x width` matrix
pub(crate) fn validate_matrix(
    name: &str,
    matrix: &[Vec<f64>],
    rows: usize,
) -> std::result::Result<usize, String> {
    if matrix.len() != rows {
        return Err(format!("{} has {} rows, expected {}", name, matrix.len(), rows));
    }
    let width = matrix.first().map(Vec::len).unwrap_or(0);
    if width == 0 {
        return Err(format!("{} has no feature columns", name));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != width {
            return Err(format!(
                "{} row {} has {} columns, expected {}",
                name,
                i,
                row.len(),
                width
            ));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(format!("{} row {} contains non-finite values", name, i));
        }
    }
    Ok(width)
}

pub(crate) fn validate_classes(classes: &[String]) -> std::result::Result<(), String> {
    if classes.len() < 2 {
        return Err(format!("expected at least 2 classes, found {}", classes.len()));
    }
    for (i, class) in classes.iter().enumerate() {
        if classes[..i].contains(class) {
            return Err(format!("duplicate class '{}'", class));
        }
    }
    Ok(())
}

/// Index of the largest value; ties keep the first
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Normalize log-likelihoods into probabilities
pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Logistic function
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) - 0.880_797_077_977_882_3).abs() < 1e-12);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1000.0, 999.0, -5.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[0] > p[1] && p[1] > p[2]);
    }

    #[test]
    fn test_argmax_first_tie_wins() {
        assert_eq!(argmax(&[0.2, 0.7, 0.7]), 1);
        assert_eq!(argmax(&[3.0]), 0);
    }

    #[test]
    fn test_validate_classes() {
        assert!(validate_classes(&["a".into()]).is_err());
        assert!(validate_classes(&["a".into(), "a".into()]).is_err());
        assert!(validate_classes(&["a".into(), "b".into()]).is_ok());
    }

    #[test]
    fn test_validate_matrix() {
        assert_eq!(validate_matrix("coef", &[vec![1.0, 2.0]], 1), Ok(2));
        assert!(validate_matrix("coef", &[vec![1.0], vec![1.0, 2.0]], 2).is_err());
        assert!(validate_matrix("coef", &[vec![f64::NAN]], 1).is_err());
        assert!(validate_matrix("coef", &[vec![1.0]], 2).is_err());
    }

    #[test]
    fn test_artifact_kinds_parse() {
        let json = r#"{
            "kind": "linear_svc",
            "classes": ["Safe Email", "Phishing Email"],
            "coef": [[1.0, -1.0]],
            "intercept": [0.0]
        }"#;
        let artifact: ClassifierArtifact = serde_json::from_str(json).unwrap();
        let estimator = artifact.build().unwrap();
        assert_eq!(estimator.kind(), "linear_svc");
        assert_eq!(estimator.confidence_source(), ConfidenceSource::Margin);

        let json = r#"{
            "kind": "nearest_centroid",
            "classes": ["Safe Email", "Phishing Email"],
            "centroids": [[0.0], [1.0]]
        }"#;
        let artifact: ClassifierArtifact = serde_json::from_str(json).unwrap();
        let estimator = artifact.build().unwrap();
        assert_eq!(estimator.confidence_source(), ConfidenceSource::Unavailable);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"kind": "random_forest", "classes": []}"#;
        assert!(serde_json::from_str::<ClassifierArtifact>(json).is_err());
    }
}
