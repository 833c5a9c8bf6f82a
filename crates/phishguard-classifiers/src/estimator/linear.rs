//! Linear classifiers: support vector machine and logistic regression

use super::{argmax, check_width, sigmoid, softmax, validate_classes, validate_matrix, Estimator};
use crate::features::FeatureVector;
use phishguard_core::Result;
use serde::{Deserialize, Serialize};

/// Weights of a linear decision function.
///
/// Binary models carry one row whose positive side selects `classes[1]`;
/// multi-class models carry one row per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearModel {
    fn validate(&self) -> std::result::Result<usize, String> {
        validate_classes(&self.classes)?;
        let rows = if self.classes.len() == 2 { 1 } else { self.classes.len() };
        let width = validate_matrix("coef", &self.coef, rows)?;
        if self.intercept.len() != rows {
            return Err(format!(
                "intercept has {} values, expected {}",
                self.intercept.len(),
                rows
            ));
        }
        if self.intercept.iter().any(|v| !v.is_finite()) {
            return Err("intercept contains non-finite values".to_string());
        }
        Ok(width)
    }

    fn is_binary(&self) -> bool {
        self.coef.len() == 1
    }

    /// Raw decision value per row
    fn decision(&self, features: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| features.dot(row) + b)
            .collect()
    }

    fn predict_index(&self, scores: &[f64]) -> usize {
        if self.is_binary() {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(scores)
        }
    }

    fn margin(&self, scores: &[f64]) -> f64 {
        if self.is_binary() {
            scores[0]
        } else {
            scores[argmax(scores)]
        }
    }
}

/// Linear support vector classifier; exposes a decision margin only
#[derive(Debug, Clone)]
pub struct LinearSvc {
    model: LinearModel,
    n_features: usize,
}

impl LinearSvc {
    pub fn new(model: LinearModel) -> std::result::Result<Self, String> {
        let n_features = model.validate()?;
        Ok(Self { model, n_features })
    }
}

impl Estimator for LinearSvc {
    fn classes(&self) -> &[String] {
        &self.model.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn kind(&self) -> &'static str {
        "linear_svc"
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize> {
        check_width(self, features)?;
        Ok(self.model.predict_index(&self.model.decision(features)))
    }

    fn supports_margin(&self) -> bool {
        true
    }

    fn decision_margin(&self, features: &FeatureVector) -> Result<f64> {
        check_width(self, features)?;
        Ok(self.model.margin(&self.model.decision(features)))
    }
}

/// Logistic regression; exposes probabilities and a decision margin
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    model: LinearModel,
    n_features: usize,
}

impl LogisticRegression {
    pub fn new(model: LinearModel) -> std::result::Result<Self, String> {
        let n_features = model.validate()?;
        Ok(Self { model, n_features })
    }
}

impl Estimator for LogisticRegression {
    fn classes(&self) -> &[String] {
        &self.model.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize> {
        check_width(self, features)?;
        Ok(self.model.predict_index(&self.model.decision(features)))
    }

    fn supports_probabilities(&self) -> bool {
        true
    }

    fn supports_margin(&self) -> bool {
        true
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        check_width(self, features)?;
        let scores = self.model.decision(features);
        if self.model.is_binary() {
            let p = sigmoid(scores[0]);
            Ok(vec![1.0 - p, p])
        } else {
            Ok(softmax(&scores))
        }
    }

    fn decision_margin(&self, features: &FeatureVector) -> Result<f64> {
        check_width(self, features)?;
        Ok(self.model.margin(&self.model.decision(features)))
    }
}
