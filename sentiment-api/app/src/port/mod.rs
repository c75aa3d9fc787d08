use anyhow::Result;

/// Probability model over already-normalized text.
///
/// Implementations return `[p(negative), p(positive)]` per input, in input order.
pub trait TextClassifier: Send + Sync {
    fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>>;
}
