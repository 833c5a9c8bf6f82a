//! Shared prediction types

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verdict for a single email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Phishing Email")]
    Phishing,
    #[serde(rename = "Safe Email")]
    Safe,
}

impl Label {
    /// Display name used by the trained artifacts and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phishing => "Phishing Email",
            Self::Safe => "Safe Email",
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, Self::Phishing)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = Error;

    /// Map a classifier class name onto a label.
    ///
    /// Accepts the full names (`"Phishing Email"`, `"Safe Email"`) and the
    /// short forms, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phishing email" | "phishing" => Ok(Self::Phishing),
            "safe email" | "safe" => Ok(Self::Safe),
            _ => Err(Error::UnrecognizedLabel(s.to_string())),
        }
    }
}

/// Label plus normalized confidence for one inference call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted label
    pub label: Label,

    /// Confidence in [0.0, 1.0]; `None` when the classifier exposes neither
    /// probabilities nor a decision margin
    pub confidence: Option<f64>,
}

impl PredictionResult {
    pub fn new(label: Label, confidence: Option<f64>) -> Self {
        Self { label, confidence }
    }

    /// Confidence formatted as a percentage with two decimals, e.g. `"97.31%"`
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.2}%", c * 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_full_and_short_names() {
        assert_eq!("Phishing Email".parse::<Label>().unwrap(), Label::Phishing);
        assert_eq!("safe email".parse::<Label>().unwrap(), Label::Safe);
        assert_eq!(" PHISHING ".parse::<Label>().unwrap(), Label::Phishing);
        assert_eq!("Safe".parse::<Label>().unwrap(), Label::Safe);
    }

    #[test]
    fn test_label_parse_rejects_unknown() {
        let err = "spam".parse::<Label>().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedLabel(ref s) if s == "spam"));
    }

    #[test]
    fn test_label_serde_uses_display_names() {
        let json = serde_json::to_string(&Label::Phishing).unwrap();
        assert_eq!(json, "\"Phishing Email\"");
        let back: Label = serde_json::from_str("\"Safe Email\"").unwrap();
        assert_eq!(back, Label::Safe);
    }

    #[test]
    fn test_confidence_percent() {
        let result = PredictionResult::new(Label::Safe, Some(0.97314));
        assert_eq!(result.confidence_percent().as_deref(), Some("97.31%"));

        let result = PredictionResult::new(Label::Safe, None);
        assert!(result.confidence_percent().is_none());
    }
}
