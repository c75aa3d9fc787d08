//! TF-IDF features scored by a logistic regression.
pub mod classifier;
pub mod vectorizer;

use anyhow::Result;
use rayon::prelude::*;

pub use classifier::LogisticRegression;
pub use vectorizer::TfidfVectorizer;

use crate::port::TextClassifier;

#[derive(Debug, Clone)]
pub struct TfidfClassifier {
    vectorizer: TfidfVectorizer,
    model: LogisticRegression,
}

impl TfidfClassifier {
    /// Pairs a vectorizer with a model trained on its feature space.
    ///
    /// # Errors
    /// Fails when the model expects a different number of features.
    pub fn new(vectorizer: TfidfVectorizer, model: LogisticRegression) -> Result<Self> {
        anyhow::ensure!(
            vectorizer.dim() == model.n_features(),
            "vectorizer produces {} features but the model expects {}",
            vectorizer.dim(),
            model.n_features()
        );
        Ok(Self { vectorizer, model })
    }

    pub fn predict_one(&self, text: &str) -> Result<[f64; 2]> {
        self.model.predict_proba(&self.vectorizer.transform(text))
    }
}

impl TextClassifier for TfidfClassifier {
    fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>> {
        texts.par_iter().map(|text| self.predict_one(text)).collect()
    }
}
