//! Verdict text and the downloadable analysis report

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use phishguard_classifiers::Analysis;
use phishguard_core::Label;
use std::path::Path;

/// Shown instead of a verdict when there is no email text
pub const EMPTY_INPUT_WARNING: &str = "Please paste some email text to analyze.";

/// User-facing verdict for a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub headline: &'static str,
    pub advice: &'static str,
    pub reason: &'static str,
}

impl Verdict {
    pub fn for_label(label: Label) -> Self {
        match label {
            Label::Phishing => Self {
                headline: "🚨 This looks like a Phishing Email!",
                advice: "Be cautious with any links or attachments. Do not provide personal information.",
                reason: "The email contains suspicious keywords and/or patterns often found in phishing attempts.",
            },
            Label::Safe => Self {
                headline: "✅ This appears to be a Safe Email.",
                advice: "However, always remain vigilant when reading emails.",
                reason: "The email does not contain strong phishing indicators based on the model's training.",
            },
        }
    }
}

/// Console rendering of an analysis
pub fn render_summary(analysis: &Analysis) -> String {
    let verdict = Verdict::for_label(analysis.label);
    let confidence = analysis
        .confidence
        .map(|c| format!("Model Confidence: {:.2}%\n", c * 100.0))
        .unwrap_or_default();

    format!(
        "Highlighted Suspicious Keywords:\n{}\n\n{}{}\n{}\nReason: {}\n",
        analysis.highlighted, confidence, verdict.headline, verdict.advice, verdict.reason
    )
}

/// Plain-text record of one analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport<'a> {
    text: &'a str,
    analysis: &'a Analysis,
    generated_at: DateTime<Utc>,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(text: &'a str, analysis: &'a Analysis) -> Self {
        Self::at(text, analysis, Utc::now())
    }

    /// Report with a fixed timestamp
    pub fn at(text: &'a str, analysis: &'a Analysis, generated_at: DateTime<Utc>) -> Self {
        Self {
            text,
            analysis,
            generated_at,
        }
    }

    pub fn render(&self) -> String {
        let confidence = self
            .analysis
            .confidence
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "Email Text:\n{}\n\nPrediction: {}\nConfidence: {}\nModel: {}\nGenerated: {}\n",
            self.text,
            self.analysis.label,
            confidence,
            self.analysis.model,
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}
