//! Loads the lexicons and the exported model from the artifacts directory.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::error::ServiceError;
use crate::model::{LogisticRegression, TfidfVectorizer};

pub const EMOJI_FILE: &str = "emoji_dict.json";
pub const STOPWORDS_FILE: &str = "stopwords_list.json";
pub const LEMMA_EXCEPTIONS_FILE: &str = "lemma_exceptions.json";
pub const MODEL_FILE: &str = "sentiment_model.json";
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// Everything read from disk at startup.
///
/// The lexicons are required. The model and vectorizer are optional so the
/// service can come up and report what is missing through `/health`.
#[derive(Debug)]
pub struct Artifacts {
    pub emojis: HashMap<String, String>,
    pub stopwords: FxHashSet<String>,
    pub lemma_exceptions: HashMap<String, String>,
    pub model: Option<LogisticRegression>,
    pub vectorizer: Option<TfidfVectorizer>,
}

impl Artifacts {
    /// # Errors
    /// Returns [`ServiceError::Artifact`] when a required lexicon is missing or
    /// malformed, or when the optional lemma table exists but cannot be parsed.
    pub fn load(dir: &Path) -> Result<Self, ServiceError> {
        let emojis: HashMap<String, String> = required(dir, EMOJI_FILE)?;
        let stopwords: Vec<String> = required(dir, STOPWORDS_FILE)?;

        let lemma_path = dir.join(LEMMA_EXCEPTIONS_FILE);
        let lemma_exceptions = if lemma_path.exists() {
            read_json(&lemma_path).map_err(|e| artifact_error(&lemma_path, &e))?
        } else {
            HashMap::new()
        };

        let model = optional(dir, MODEL_FILE, |path| LogisticRegression::from_path(path));
        let vectorizer = optional(dir, VECTORIZER_FILE, |path| TfidfVectorizer::from_path(path));

        info!(
            dir = %dir.display(),
            emojis = emojis.len(),
            stopwords = stopwords.len(),
            lemma_exceptions = lemma_exceptions.len(),
            model_loaded = model.is_some(),
            vectorizer_loaded = vectorizer.is_some(),
            "Loaded artifacts"
        );

        Ok(Self {
            emojis,
            stopwords: stopwords.into_iter().collect(),
            lemma_exceptions,
            model,
            vectorizer,
        })
    }
}

fn required<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, ServiceError> {
    let path = dir.join(file);
    read_json(&path).map_err(|e| artifact_error(&path, &e))
}

fn optional<T>(dir: &Path, file: &str, load: impl FnOnce(&Path) -> Result<T>) -> Option<T> {
    let path = dir.join(file);
    match load(&path) {
        Ok(value) => Some(value),
        Err(e) => {
            error!(path = %path.display(), error = %format!("{e:#}"), "Failed to load model artifact");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn artifact_error(path: &Path, error: &anyhow::Error) -> ServiceError {
    ServiceError::Artifact {
        path: path.display().to_string(),
        message: format!("{error:#}"),
    }
}
