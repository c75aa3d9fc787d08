//! Shared test support utilities
//!
//! Provides `KeywordClassifier`, a deterministic `TextClassifier` that scores
//! text by a fixed keyword table, plus a prebuilt service for unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Result, bail};
use rustc_hash::FxHashSet;

use crate::explain::{LimeConfig, LimeTextExplainer};
use crate::port::TextClassifier;
use crate::preprocess::{NormalizeMode, TextNormalizer};
use crate::service::{LoadState, SentimentService};

/// Sums per-keyword weights over whitespace tokens and squashes with a sigmoid.
pub struct KeywordClassifier {
    weights: HashMap<&'static str, f64>,
    calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            weights: HashMap::from([
                ("love", 3.0),
                ("great", 2.0),
                ("awful", -3.0),
                ("hate", -3.0),
                ("terrible", -2.0),
            ]),
            calls: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }
}

impl KeywordClassifier {
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn score(&self, text: &str) -> [f64; 2] {
        let z: f64 = text
            .split_whitespace()
            .filter_map(|token| self.weights.get(token))
            .sum();
        let positive = 1.0 / (1.0 + (-z).exp());
        [1.0 - positive, positive]
    }
}

impl TextClassifier for KeywordClassifier {
    fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            bail!("mock classifier failure");
        }
        Ok(texts.iter().map(|text| self.score(text)).collect())
    }
}

/// A service over a small lexicon. `None` simulates missing model artifacts.
pub fn test_service(classifier: Option<Arc<dyn TextClassifier>>) -> SentimentService {
    let emojis = HashMap::from([("😊".to_string(), "smiling face".to_string())]);
    let stopwords: FxHashSet<String> = ["the", "a", "is", "it", "i", "this"]
        .into_iter()
        .map(String::from)
        .collect();
    let normalizer = TextNormalizer::new(&emojis, stopwords, HashMap::new(), NormalizeMode::Lemmatize)
        .expect("test normalizer");
    let loaded = classifier.is_some();

    SentimentService::new(
        normalizer,
        classifier,
        LoadState {
            model_loaded: loaded,
            vectorizer_loaded: loaded,
        },
        LimeTextExplainer::new(LimeConfig {
            num_samples: 500,
            ..LimeConfig::default()
        }),
    )
}
