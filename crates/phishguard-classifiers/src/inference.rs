//! Inference: label plus normalized confidence for one email

use crate::estimator::{sigmoid, ConfidenceSource};
use crate::highlight::KeywordHighlighter;
use crate::model_loader::LoadedModel;
use crate::vectorizer::transform;
use phishguard_core::{Error, Label, PredictionResult, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Classify one email with a loaded model.
///
/// Confidence follows the capability probed at load time: the highest class
/// probability, else `sigmoid(|margin|)`, else absent.
pub fn predict(model: &LoadedModel, text: &str) -> Result<PredictionResult> {
    let features = transform(model.vectorizer(), text)?;
    let estimator = model.estimator();

    let class_index = estimator.predict(&features)?;
    let class = estimator.classes().get(class_index).ok_or_else(|| {
        Error::inference(format!(
            "{} predicted class index {} but has {} classes",
            estimator.kind(),
            class_index,
            estimator.classes().len()
        ))
    })?;
    let label: Label = class.parse()?;

    let confidence = match model.confidence_source() {
        ConfidenceSource::Probabilities => {
            let proba = estimator.predict_proba(&features)?;
            if proba.is_empty() || proba.iter().any(|p| !p.is_finite()) {
                return Err(Error::inference(format!(
                    "{} returned non-finite class probabilities: {:?}",
                    estimator.kind(),
                    proba
                )));
            }
            let best = proba.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            Some(best.clamp(0.0, 1.0))
        }
        ConfidenceSource::Margin => {
            let margin = estimator.decision_margin(&features)?;
            if !margin.is_finite() {
                return Err(Error::inference(format!(
                    "{} returned a non-finite decision margin: {}",
                    estimator.kind(),
                    margin
                )));
            }
            Some(sigmoid(margin.abs()))
        }
        ConfidenceSource::Unavailable => None,
    };

    Ok(PredictionResult::new(label, confidence))
}

/// Prediction plus the highlighted email text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Registry name of the model that produced the prediction
    pub model: String,
    pub label: Label,
    pub confidence: Option<f64>,
    /// Email text with suspicious keywords wrapped in markers
    pub highlighted: String,
}

impl Analysis {
    pub fn prediction(&self) -> PredictionResult {
        PredictionResult::new(self.label, self.confidence)
    }
}

/// Runs inference and highlighting against one loaded model
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    model: Arc<LoadedModel>,
    highlighter: KeywordHighlighter,
}

impl InferenceEngine {
    /// Engine with the default suspicious-keyword set
    pub fn new(model: impl Into<Arc<LoadedModel>>) -> Self {
        Self {
            model: model.into(),
            highlighter: KeywordHighlighter::default(),
        }
    }

    /// Replace the keyword highlighter
    pub fn with_highlighter(mut self, highlighter: KeywordHighlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn model(&self) -> &LoadedModel {
        &self.model
    }

    pub fn highlighter(&self) -> &KeywordHighlighter {
        &self.highlighter
    }

    /// Classify one email
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        let start = Instant::now();
        let result = predict(&self.model, text)?;
        debug!(
            model = self.model.name(),
            input_len = text.len(),
            label = %result.label,
            confidence = ?result.confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "Prediction complete"
        );
        Ok(result)
    }

    /// Classify one email and highlight its suspicious keywords
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let prediction = self.predict(text)?;
        Ok(Analysis {
            model: self.model.name().to_string(),
            label: prediction.label,
            confidence: prediction.confidence,
            highlighted: self.highlighter.highlight(text),
        })
    }
}
