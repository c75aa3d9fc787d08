//! TF-IDF transform over an exported scikit-learn vocabulary.
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use sprs::CsVec;

/// scikit-learn's default `token_pattern`.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("compile token regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct VectorizerFile {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    stop_words: Option<Vec<String>>,
}

impl VectorizerFile {
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.vocabulary.is_empty(), "vocabulary is empty");
        anyhow::ensure!(
            self.idf.len() == self.vocabulary.len(),
            "idf length {} does not match vocabulary size {}",
            self.idf.len(),
            self.vocabulary.len()
        );
        let (min_n, max_n) = self.ngram_range;
        anyhow::ensure!(
            min_n >= 1 && min_n <= max_n,
            "invalid ngram_range ({min_n}, {max_n})"
        );
        let mut seen = vec![false; self.vocabulary.len()];
        for (term, &index) in &self.vocabulary {
            anyhow::ensure!(
                index < seen.len(),
                "vocabulary index {index} for {term:?} is out of range"
            );
            anyhow::ensure!(!seen[index], "vocabulary index {index} is used twice");
            seen[index] = true;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: FxHashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    lowercase: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
    stop_words: FxHashSet<String>,
}

impl TfidfVectorizer {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read vectorizer from {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: VectorizerFile =
            serde_json::from_str(raw).context("failed to parse vectorizer json")?;
        file.validate()?;
        Ok(Self {
            vocabulary: file.vocabulary.into_iter().collect(),
            idf: file.idf,
            ngram_range: file.ngram_range,
            lowercase: file.lowercase,
            sublinear_tf: file.sublinear_tf,
            norm: file.norm,
            stop_words: file.stop_words.unwrap_or_default().into_iter().collect(),
        })
    }

    /// Number of features in the output vectors.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    #[must_use]
    pub fn vocabulary_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };
        let tokens: Vec<&str> = TOKEN_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    /// Transforms one document into a sparse TF-IDF row.
    #[must_use]
    pub fn transform(&self, text: &str) -> CsVec<f64> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let (indices, mut values): (Vec<usize>, Vec<f64>) = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .unzip();

        let norm = match self.norm {
            Some(Norm::L2) => values.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => values.iter().map(|v| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }

        CsVec::new(self.dim(), indices, values)
    }
}
