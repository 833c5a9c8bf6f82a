//! Feature transformation: raw email text to fixed-width feature vectors

use crate::features::FeatureVector;
use phishguard_core::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Default token pattern: runs of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Fitted transformer from text to the classifier's feature space
pub trait Vectorizer: Send + Sync + fmt::Debug {
    /// Transform a batch of documents
    fn transform_batch(&self, texts: &[&str]) -> Result<Vec<FeatureVector>>;

    /// Width of every produced vector
    fn n_features(&self) -> usize;

    /// Short identifier of the vectorizer family
    fn kind(&self) -> &'static str;
}

/// Transform a single document.
///
/// The text is wrapped as a one-element batch and handed to the vectorizer.
/// Tokens outside the fitted vocabulary are dropped silently.
pub fn transform(vectorizer: &dyn Vectorizer, text: &str) -> Result<FeatureVector> {
    let mut batch = vectorizer.transform_batch(&[text])?;
    if batch.len() != 1 {
        return Err(Error::transform(format!(
            "{} vectorizer returned {} rows for a single document",
            vectorizer.kind(),
            batch.len()
        )));
    }
    let features = batch.remove(0);
    if features.dim() != vectorizer.n_features() {
        return Err(Error::transform(format!(
            "{} vectorizer produced width {} but declares {}",
            vectorizer.kind(),
            features.dim(),
            vectorizer.n_features()
        )));
    }
    Ok(features)
}

/// Serialized vectorizer artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorizerArtifact {
    Tfidf(TfidfSpec),
}

impl VectorizerArtifact {
    /// Validate and build the runtime vectorizer
    pub fn build(self) -> std::result::Result<Box<dyn Vectorizer>, String> {
        match self {
            Self::Tfidf(spec) => Ok(Box::new(TfidfVectorizer::from_spec(spec)?)),
        }
    }
}

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Fitted TF-IDF parameters as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfSpec {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    #[serde(default)]
    pub idf: Vec<f64>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub stop_words: Vec<String>,

    #[serde(default = "default_true")]
    pub use_idf: bool,

    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

impl TfidfSpec {
    /// Spec with default settings over the given vocabulary and idf weights
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: Vec::new(),
            use_idf: true,
            sublinear_tf: false,
            norm: default_norm(),
        }
    }
}

/// TF-IDF vectorizer over a vocabulary learned at training time
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    token_regex: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("use_idf", &self.idf.is_some())
            .field("ngram_range", &self.ngram_range)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Validate a spec and compile its tokenizer
    pub fn from_spec(spec: TfidfSpec) -> std::result::Result<Self, String> {
        let n_features = spec.vocabulary.len();

        let mut seen = vec![false; n_features];
        for (term, &idx) in &spec.vocabulary {
            if idx >= n_features {
                return Err(format!(
                    "vocabulary index {} for term '{}' exceeds vocabulary size {}",
                    idx, term, n_features
                ));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(format!("vocabulary index {} is assigned twice", idx));
            }
        }

        let idf = if spec.use_idf {
            if spec.idf.len() != n_features {
                return Err(format!(
                    "idf has {} weights but vocabulary has {} terms",
                    spec.idf.len(),
                    n_features
                ));
            }
            if spec.idf.iter().any(|w| !w.is_finite()) {
                return Err("idf contains non-finite weights".to_string());
            }
            Some(spec.idf)
        } else {
            None
        };

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }

        let token_regex = Regex::new(&spec.token_pattern)
            .map_err(|e| format!("invalid token_pattern '{}': {}", spec.token_pattern, e))?;

        let stop_words = spec
            .stop_words
            .into_iter()
            .map(|w| if spec.lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf,
            lowercase: spec.lowercase,
            token_regex,
            ngram_range: spec.ngram_range,
            stop_words,
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
        })
    }

    /// Number of terms in the fitted vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it was seen at training time
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.lowercase {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };

        self.token_regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                grams.extend(tokens.iter().cloned());
            } else {
                grams.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        grams
    }

    fn transform_one(&self, text: &str) -> FeatureVector {
        let tokens = self.tokenize(text);
        let grams = self.ngrams(&tokens);
        let counts = grams
            .iter()
            .filter_map(|gram| self.vocabulary.get(gram))
            .map(|&idx| (idx, 1.0));

        let mut features = FeatureVector::from_pairs(self.vocabulary.len(), counts);

        if self.sublinear_tf {
            for v in features.values_mut() {
                *v = 1.0 + v.ln();
            }
        }

        if let Some(idf) = &self.idf {
            let weighted = features.entries().iter().map(|(i, v)| (*i, v * idf[*i]));
            features = FeatureVector::from_pairs(self.vocabulary.len(), weighted);
        }

        if let Some(norm) = self.norm {
            let length = match norm {
                Norm::L1 => features.entries().iter().map(|(_, v)| v.abs()).sum::<f64>(),
                Norm::L2 => features
                    .entries()
                    .iter()
                    .map(|(_, v)| v * v)
                    .sum::<f64>()
                    .sqrt(),
            };
            if length > 0.0 {
                features.scale(1.0 / length);
            }
        }

        features
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform_batch(&self, texts: &[&str]) -> Result<Vec<FeatureVector>> {
        Ok(texts.iter().map(|text| self.transform_one(text)).collect())
    }

    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn kind(&self) -> &'static str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> HashMap<String, usize> {
        terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect()
    }

    fn plain_spec(terms: &[&str]) -> TfidfSpec {
        let mut spec = TfidfSpec::new(vocab(terms), vec![1.0; terms.len()]);
        spec.norm = None;
        spec
    }

    #[test]
    fn test_counts_known_tokens_and_drops_unknown() {
        let v = TfidfVectorizer::from_spec(plain_spec(&["verify", "account"])).unwrap();
        let f = transform(&v, "Verify your ACCOUNT, verify now").unwrap();
        assert_eq!(f.dim(), 2);
        assert_eq!(f.to_dense(), vec![2.0, 1.0]);
    }

    #[test]
    fn test_single_char_tokens_ignored_by_default_pattern() {
        let v = TfidfVectorizer::from_spec(plain_spec(&["a", "ok"])).unwrap();
        let f = transform(&v, "a ok a").unwrap();
        assert_eq!(f.to_dense(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_empty_text_gives_zero_vector() {
        let spec = TfidfSpec::new(vocab(&["bank", "login"]), vec![1.5, 2.0]);
        let v = TfidfVectorizer::from_spec(spec).unwrap();
        let f = transform(&v, "").unwrap();
        assert!(f.is_zero());
        assert_eq!(f.dim(), 2);
    }

    #[test]
    fn test_idf_and_l2_norm() {
        let spec = TfidfSpec::new(vocab(&["bank", "login"]), vec![1.0, 2.0]);
        let v = TfidfVectorizer::from_spec(spec).unwrap();
        let f = transform(&v, "bank login").unwrap();
        let norm = 5.0_f64.sqrt();
        assert!((f.get(0) - 1.0 / norm).abs() < 1e-12);
        assert!((f.get(1) - 2.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn test_l1_norm_and_sublinear_tf() {
        let mut spec = plain_spec(&["prize", "claim"]);
        spec.norm = Some(Norm::L1);
        spec.sublinear_tf = true;
        let v = TfidfVectorizer::from_spec(spec).unwrap();
        let f = transform(&v, "prize prize claim").unwrap();
        let prize = 1.0 + 2.0_f64.ln();
        let total = prize + 1.0;
        assert!((f.get(0) - prize / total).abs() < 1e-12);
        assert!((f.get(1) - 1.0 / total).abs() < 1e-12);
    }

    #[test]
    fn test_bigrams_and_stop_words() {
        let mut spec = plain_spec(&["credit", "card", "credit card"]);
        spec.ngram_range = (1, 2);
        spec.stop_words = vec!["your".to_string()];
        let v = TfidfVectorizer::from_spec(spec).unwrap();
        let f = transform(&v, "your credit your card").unwrap();
        // stop word removal joins "credit" and "card" into one bigram
        assert_eq!(f.to_dense(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_case_preserved_when_lowercase_disabled() {
        let mut spec = plain_spec(&["URGENT"]);
        spec.lowercase = false;
        let v = TfidfVectorizer::from_spec(spec).unwrap();
        assert_eq!(transform(&v, "URGENT urgent").unwrap().to_dense(), vec![1.0]);
    }

    #[test]
    fn test_deterministic() {
        let spec = TfidfSpec::new(vocab(&["bank", "login", "now"]), vec![1.2, 1.7, 1.0]);
        let v = TfidfVectorizer::from_spec(spec).unwrap();
        let text = "Login to your bank now, bank login";
        assert_eq!(transform(&v, text).unwrap(), transform(&v, text).unwrap());
    }

    #[test]
    fn test_rejects_bad_specs() {
        let spec = TfidfSpec::new(vocab(&["a", "b"]), vec![1.0]);
        assert!(TfidfVectorizer::from_spec(spec).unwrap_err().contains("idf"));

        let mut bad_index = HashMap::new();
        bad_index.insert("x".to_string(), 3);
        let spec = TfidfSpec::new(bad_index, vec![1.0]);
        assert!(TfidfVectorizer::from_spec(spec).is_err());

        let mut spec = plain_spec(&["a"]);
        spec.ngram_range = (2, 1);
        assert!(TfidfVectorizer::from_spec(spec).is_err());

        let mut spec = plain_spec(&["a"]);
        spec.token_pattern = "(".to_string();
        assert!(TfidfVectorizer::from_spec(spec)
            .unwrap_err()
            .contains("token_pattern"));
    }

    #[test]
    fn test_artifact_json_defaults() {
        let json = r#"{
            "kind": "tfidf",
            "vocabulary": {"urgent": 0, "bank": 1},
            "idf": [1.5, 1.1]
        }"#;
        let artifact: VectorizerArtifact = serde_json::from_str(json).unwrap();
        let VectorizerArtifact::Tfidf(spec) = &artifact;
        assert!(spec.lowercase);
        assert_eq!(spec.ngram_range, (1, 1));
        assert_eq!(spec.norm, Some(Norm::L2));
        assert_eq!(spec.token_pattern, DEFAULT_TOKEN_PATTERN);

        let built = artifact.build().unwrap();
        assert_eq!(built.n_features(), 2);
        assert_eq!(built.kind(), "tfidf");
    }

    #[test]
    fn test_artifact_null_norm() {
        let json = r#"{"kind": "tfidf", "vocabulary": {"x": 0}, "use_idf": false, "norm": null}"#;
        let artifact: VectorizerArtifact = serde_json::from_str(json).unwrap();
        let VectorizerArtifact::Tfidf(spec) = &artifact;
        assert_eq!(spec.norm, None);
        assert!(artifact.build().is_ok());
    }
}
