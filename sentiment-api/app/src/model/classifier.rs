use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sprs::CsVec;

#[derive(Debug, Deserialize)]
struct LogisticRegressionFile {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LogisticRegressionFile {
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.classes.len() == 2,
            "expected a binary classifier, got {} classes",
            self.classes.len()
        );
        anyhow::ensure!(
            self.coef.len() == 1,
            "expected exactly one coefficient row, got {}",
            self.coef.len()
        );
        anyhow::ensure!(self.intercept.len() == 1, "intercept length mismatch");
        anyhow::ensure!(!self.coef[0].is_empty(), "coefficient row is empty");
        Ok(())
    }
}

/// Binary logistic regression exported from scikit-learn.
///
/// Class order follows `classes`: index 0 is negative, index 1 positive.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read classifier from {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LogisticRegressionFile =
            serde_json::from_str(raw).context("failed to parse classifier json")?;
        file.validate()?;
        let LogisticRegressionFile {
            mut coef,
            intercept,
            ..
        } = file;
        Ok(Self {
            coef: coef.swap_remove(0),
            intercept: intercept[0],
        })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn decision_function(&self, features: &CsVec<f64>) -> Result<f64> {
        anyhow::ensure!(
            features.dim() == self.coef.len(),
            "feature dimension mismatch: expected {}, got {}",
            self.coef.len(),
            features.dim()
        );
        let score = features
            .iter()
            .map(|(index, value)| value * self.coef[index])
            .sum::<f64>();
        Ok(score + self.intercept)
    }

    /// `[p(negative), p(positive)]`.
    pub fn predict_proba(&self, features: &CsVec<f64>) -> Result<[f64; 2]> {
        let positive = sigmoid(self.decision_function(features)?);
        Ok([1.0 - positive, positive])
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression::from_json(
            r#"{"classes": [0, 1], "coef": [[2.0, -3.0]], "intercept": [0.5]}"#,
        )
        .expect("model parses")
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = model();
        let row = CsVec::new(2, vec![0, 1], vec![0.6, 0.8]);
        let [negative, positive] = model.predict_proba(&row).unwrap();
        assert!((negative + positive - 1.0).abs() < 1e-12);
        // 2*0.6 - 3*0.8 + 0.5 = -0.7
        assert!((model.decision_function(&row).unwrap() + 0.7).abs() < 1e-12);
        assert!(negative > positive);
    }

    #[test]
    fn empty_row_scores_the_intercept() {
        let model = model();
        let row = CsVec::new(2, vec![], vec![]);
        let [_, positive] = model.predict_proba(&row).unwrap();
        assert!((positive - sigmoid(0.5)).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_stable_for_large_magnitudes() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let model = model();
        let row = CsVec::new(3, vec![2], vec![1.0]);
        assert!(model.decision_function(&row).is_err());
    }

    #[test]
    fn rejects_multiclass_exports() {
        let raw = r#"{"classes": [0, 1, 2], "coef": [[1.0], [1.0], [1.0]], "intercept": [0, 0, 0]}"#;
        let err = LogisticRegression::from_json(raw).expect_err("multiclass should fail");
        assert!(err.to_string().contains("binary"));
    }
}
