//! Suspicious keyword highlighting
//!
//! Matches are wrapped as `<mark>MATCH</mark>` with the original casing kept.
//! Text already inside a `<mark>...</mark>` region, and any lone marker tag,
//! is copied verbatim, so highlighting highlighted text changes nothing.

use phishguard_core::{Error, Result};
use regex::{Captures, Regex, RegexBuilder};
use std::borrow::Cow;

/// Opening marker
pub const MARK_OPEN: &str = "<mark>";

/// Closing marker
pub const MARK_CLOSE: &str = "</mark>";

/// Terms commonly found in phishing emails
pub const DEFAULT_KEYWORDS: [&str; 14] = [
    "urgent",
    "verify",
    "account",
    "password",
    "credit",
    "card",
    "winner",
    "congratulations",
    "claim",
    "prize",
    "suspend",
    "confirm",
    "login",
    "bank",
];

/// Case-insensitive keyword highlighter compiled once per keyword set
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    keywords: Vec<String>,
    pattern: Option<Regex>,
    protected: Regex,
}

impl KeywordHighlighter {
    /// Compile a highlighter; keyword order decides ties at one position.
    ///
    /// Empty keywords are skipped.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        let pattern = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&format!("(?:{})", alternation))
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::config(format!("failed to build keyword pattern: {}", e)))?;
            Some(regex)
        };

        let protected = Regex::new(&format!(
            "(?s){open}.*?{close}|{open}|{close}",
            open = regex::escape(MARK_OPEN),
            close = regex::escape(MARK_CLOSE)
        ))
        .map_err(|e| Error::config(format!("failed to build marker pattern: {}", e)))?;

        Ok(Self {
            keywords,
            pattern,
            protected,
        })
    }

    /// Keywords in match priority order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Byte spans of keyword matches outside protected marker regions
    pub fn matches(&self, text: &str) -> Vec<(usize, usize)> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        let mut spans = Vec::new();
        for (offset, segment) in self.unprotected_segments(text) {
            spans.extend(
                pattern
                    .find_iter(segment)
                    .map(|m| (offset + m.start(), offset + m.end())),
            );
        }
        spans
    }

    /// Wrap every keyword match in `<mark>` markers
    pub fn highlight(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for m in self.protected.find_iter(text) {
            out.push_str(&wrap(pattern, &text[cursor..m.start()]));
            out.push_str(m.as_str());
            cursor = m.end();
        }
        out.push_str(&wrap(pattern, &text[cursor..]));
        out
    }

    /// `(offset, slice)` pairs of text outside marker regions
    fn unprotected_segments<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for m in self.protected.find_iter(text) {
            segments.push((cursor, &text[cursor..m.start()]));
            cursor = m.end();
        }
        segments.push((cursor, &text[cursor..]));
        segments
    }
}

impl Default for KeywordHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS).expect("Failed to build default keyword highlighter")
    }
}

fn wrap<'t>(pattern: &Regex, segment: &'t str) -> Cow<'t, str> {
    pattern.replace_all(segment, |caps: &Captures| {
        format!("{}{}{}", MARK_OPEN, &caps[0], MARK_CLOSE)
    })
}

/// Highlight `keywords` in `text` with a one-off highlighter
pub fn highlight<S: AsRef<str>>(text: &str, keywords: &[S]) -> Result<String> {
    Ok(KeywordHighlighter::new(keywords)?.highlight(text))
}
