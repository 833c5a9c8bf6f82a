//! Multinomial naive Bayes

use super::{argmax, check_width, softmax, validate_classes, validate_matrix, Estimator};
use crate::features::FeatureVector;
use phishguard_core::Result;
use serde::{Deserialize, Serialize};

/// Multinomial naive Bayes over TF-IDF features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    pub classes: Vec<String>,

    /// Log prior probability per class
    pub class_log_prior: Vec<f64>,

    /// Log probability of each feature given a class (`classes x features`)
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Check shapes and values before use
    pub fn validated(self) -> std::result::Result<Self, String> {
        validate_classes(&self.classes)?;
        validate_matrix("feature_log_prob", &self.feature_log_prob, self.classes.len())?;
        if self.class_log_prior.len() != self.classes.len() {
            return Err(format!(
                "class_log_prior has {} values, expected {}",
                self.class_log_prior.len(),
                self.classes.len()
            ));
        }
        if self.class_log_prior.iter().any(|v| !v.is_finite()) {
            return Err("class_log_prior contains non-finite values".to_string());
        }
        Ok(self)
    }

    /// Joint log likelihood per class
    fn joint_log_likelihood(&self, features: &FeatureVector) -> Vec<f64> {
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(row, prior)| features.dot(row) + prior)
            .collect()
    }
}

impl Estimator for MultinomialNb {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map(Vec::len).unwrap_or(0)
    }

    fn kind(&self) -> &'static str {
        "multinomial_nb"
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize> {
        check_width(self, features)?;
        Ok(argmax(&self.joint_log_likelihood(features)))
    }

    fn supports_probabilities(&self) -> bool {
        true
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        check_width(self, features)?;
        Ok(softmax(&self.joint_log_likelihood(features)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::ConfidenceSource;

    fn model() -> MultinomialNb {
        MultinomialNb {
            classes: vec!["Phishing Email".into(), "Safe Email".into()],
            class_log_prior: vec![0.4_f64.ln(), 0.6_f64.ln()],
            feature_log_prob: vec![
                vec![0.7_f64.ln(), 0.3_f64.ln()],
                vec![0.2_f64.ln(), 0.8_f64.ln()],
            ],
        }
        .validated()
        .unwrap()
    }

    #[test]
    fn test_empty_features_fall_back_to_prior() {
        let nb = model();
        let x = FeatureVector::zeros(2);
        assert_eq!(nb.predict(&x).unwrap(), 1);
        let proba = nb.predict_proba(&x).unwrap();
        assert!((proba[0] - 0.4).abs() < 1e-12);
        assert!((proba[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_evidence_shifts_prediction() {
        let nb = model();
        let x = FeatureVector::from_dense(&[3.0, 0.0]);
        assert_eq!(nb.predict(&x).unwrap(), 0);
        let proba = nb.predict_proba(&x).unwrap();
        assert!(proba[0] > 0.9);
    }

    #[test]
    fn test_capability() {
        let nb = model();
        assert_eq!(nb.confidence_source(), ConfidenceSource::Probabilities);
        assert!(nb.decision_margin(&FeatureVector::zeros(2)).is_err());
    }

    #[test]
    fn test_prior_length_checked() {
        let mut nb = model();
        nb.class_log_prior.pop();
        assert!(nb.validated().is_err());
    }
}
