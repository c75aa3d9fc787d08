//! Prediction and explanation over the loaded artifacts.
use std::sync::Arc;

use tracing::{error, info};

use crate::artifacts::Artifacts;
use crate::domain::{Explanation, HealthReport, Prediction, Sentiment};
use crate::error::{ApiError, ServiceError};
use crate::explain::{LimeConfig, LimeTextExplainer, html};
use crate::model::TfidfClassifier;
use crate::port::TextClassifier;
use crate::preprocess::{NormalizeMode, TextNormalizer};

/// Fewer normalized tokens than this cannot be explained.
pub const MIN_EXPLAIN_TOKENS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
}

pub struct SentimentService {
    normalizer: TextNormalizer,
    classifier: Option<Arc<dyn TextClassifier>>,
    load_state: LoadState,
    explainer: LimeTextExplainer,
}

impl SentimentService {
    pub fn new(
        normalizer: TextNormalizer,
        classifier: Option<Arc<dyn TextClassifier>>,
        load_state: LoadState,
        explainer: LimeTextExplainer,
    ) -> Self {
        Self {
            normalizer,
            classifier,
            load_state,
            explainer,
        }
    }

    /// Builds the service from loaded artifacts.
    ///
    /// A model whose feature count does not match the vectorizer is logged and
    /// reported as not loaded.
    ///
    /// # Errors
    /// Fails when the normalizer cannot be built from the lexicons.
    pub fn from_artifacts(
        artifacts: Artifacts,
        mode: NormalizeMode,
        lime: LimeConfig,
    ) -> Result<Self, ServiceError> {
        let Artifacts {
            emojis,
            stopwords,
            lemma_exceptions,
            model,
            vectorizer,
        } = artifacts;

        let normalizer = TextNormalizer::new(&emojis, stopwords, lemma_exceptions, mode)
            .map_err(|e| ServiceError::Artifact {
                path: crate::artifacts::EMOJI_FILE.to_string(),
                message: format!("{e:#}"),
            })?;

        let mut load_state = LoadState {
            model_loaded: model.is_some(),
            vectorizer_loaded: vectorizer.is_some(),
        };
        let classifier: Option<Arc<dyn TextClassifier>> = match (vectorizer, model) {
            (Some(vectorizer), Some(model)) => match TfidfClassifier::new(vectorizer, model) {
                Ok(classifier) => Some(Arc::new(classifier)),
                Err(e) => {
                    error!(error = %format!("{e:#}"), "Model does not fit the vectorizer");
                    load_state.model_loaded = false;
                    None
                }
            },
            _ => None,
        };

        info!(
            mode = %mode,
            model_loaded = load_state.model_loaded,
            vectorizer_loaded = load_state.vectorizer_loaded,
            "Sentiment service ready"
        );

        Ok(Self::new(
            normalizer,
            classifier,
            load_state,
            LimeTextExplainer::new(lime),
        ))
    }

    #[must_use]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn health(&self) -> HealthReport {
        let LoadState {
            model_loaded,
            vectorizer_loaded,
        } = self.load_state;
        let status = if model_loaded && vectorizer_loaded {
            "ok"
        } else {
            "degraded"
        };
        HealthReport {
            status: status.to_string(),
            model_loaded,
            vectorizer_loaded,
        }
    }

    fn classifier(&self) -> Result<&dyn TextClassifier, ApiError> {
        self.classifier.as_deref().ok_or(ApiError::ModelNotLoaded)
    }

    pub fn predict(&self, text: &str) -> Result<Prediction, ApiError> {
        let classifier = self.classifier()?;
        let cleaned = self.normalizer.normalize(text);
        let probabilities = classifier
            .predict_proba(std::slice::from_ref(&cleaned))?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Inference("classifier returned no probabilities".into()))?;
        Ok(Prediction::from_probabilities(probabilities))
    }

    /// Runs LIME over the normalized text. CPU bound; call off the async runtime.
    pub fn explain(&self, text: &str) -> Result<Explanation, ApiError> {
        let classifier = self.classifier()?;
        let cleaned = self.normalizer.normalize(text);
        if cleaned.split_whitespace().count() < MIN_EXPLAIN_TOKENS {
            return Err(ApiError::TextTooShort);
        }

        let lime = self.explainer.explain_instance(&cleaned, classifier)?;
        let html_explanation = html::render(&cleaned, &lime, Sentiment::CLASS_NAMES);

        Ok(Explanation {
            sentiment: Sentiment::from_probabilities(lime.probabilities),
            explanation: lime.features,
            html_explanation,
            intercept: lime.intercept,
            score: lime.score,
            local_prediction: lime.local_prediction,
        })
    }
}
