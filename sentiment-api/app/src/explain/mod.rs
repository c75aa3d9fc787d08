//! LIME explanations for bag-of-words text classifiers.
//!
//! The instance is perturbed by removing random subsets of its distinct
//! tokens, every perturbation is scored by the classifier, and a weighted
//! ridge regression fitted on the binary presence matrix gives each token its
//! attribution. Samples are weighted by an exponential kernel over the cosine
//! distance to the original text.
pub mod html;
mod ridge;

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::port::TextClassifier;
use ridge::RidgeFit;

const SURROGATE_ALPHA: f64 = 1.0;
const HIGHEST_WEIGHTS_ALPHA: f64 = 0.01;
const AUTO_FORWARD_SELECTION_MAX: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeatureSelection {
    /// Forward selection for small feature budgets, highest weights otherwise.
    #[default]
    Auto,
    None,
    HighestWeights,
    ForwardSelection,
}

impl FromStr for FeatureSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "highest_weights" => Ok(Self::HighestWeights),
            "forward_selection" => Ok(Self::ForwardSelection),
            other => Err(format!("unknown feature selection: {other}")),
        }
    }
}

impl fmt::Display for FeatureSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureSelection::Auto => "auto",
            FeatureSelection::None => "none",
            FeatureSelection::HighestWeights => "highest_weights",
            FeatureSelection::ForwardSelection => "forward_selection",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimeConfig {
    pub num_samples: usize,
    pub num_features: usize,
    pub kernel_width: f64,
    pub feature_selection: FeatureSelection,
    pub random_seed: u64,
}

impl Default for LimeConfig {
    fn default() -> Self {
        Self {
            num_samples: 5000,
            num_features: 10,
            kernel_width: 25.0,
            feature_selection: FeatureSelection::Auto,
            random_seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimeExplanation {
    /// `(token, weight)` for the positive class, by descending `|weight|`.
    pub features: Vec<(String, f64)>,
    pub intercept: f64,
    /// Weighted R² of the surrogate on the perturbation samples.
    pub score: f64,
    /// Surrogate output for the unperturbed text.
    pub local_prediction: f64,
    /// Classifier probabilities for the unperturbed text.
    pub probabilities: [f64; 2],
}

/// Perturbation design for one instance: distinct tokens and sampled texts.
struct Neighborhood {
    vocabulary: Vec<String>,
    presence: Array2<f64>,
    texts: Vec<String>,
    weights: Array1<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LimeTextExplainer {
    config: LimeConfig,
}

impl LimeTextExplainer {
    #[must_use]
    pub fn new(config: LimeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LimeConfig {
        &self.config
    }

    /// Explains the classifier's positive-class probability for `text`.
    ///
    /// `text` must already be normalized: it is split on whitespace and every
    /// distinct token becomes one feature.
    ///
    /// # Errors
    /// Fails when `text` has no tokens or the classifier fails.
    pub fn explain_instance(
        &self,
        text: &str,
        classifier: &dyn TextClassifier,
    ) -> Result<LimeExplanation> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        anyhow::ensure!(!tokens.is_empty(), "cannot explain an empty text");

        let neighborhood = self.sample_neighborhood(&tokens);
        let probabilities = classifier
            .predict_proba(&neighborhood.texts)
            .context("classifier failed on perturbed samples")?;
        anyhow::ensure!(
            probabilities.len() == neighborhood.texts.len(),
            "classifier returned {} rows for {} samples",
            probabilities.len(),
            neighborhood.texts.len()
        );
        let target: Array1<f64> = probabilities.iter().map(|p| p[1]).collect();

        let selected = self.select_features(&neighborhood, &target);
        let design = neighborhood.presence.select(Axis(1), &selected);
        let fit = RidgeFit::fit(
            design.view(),
            target.view(),
            neighborhood.weights.view(),
            SURROGATE_ALPHA,
        );
        let score = fit.score(design.view(), target.view(), neighborhood.weights.view());
        let local_prediction = fit.predict(design.slice(ndarray::s![0..1, ..]))[0];

        let mut features: Vec<(String, f64)> = selected
            .iter()
            .zip(fit.coef.iter())
            .map(|(&feature, &weight)| (neighborhood.vocabulary[feature].clone(), weight))
            .collect();
        features.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

        debug!(
            distinct_tokens = neighborhood.vocabulary.len(),
            samples = neighborhood.texts.len(),
            selected = selected.len(),
            score,
            "LIME surrogate fitted"
        );

        Ok(LimeExplanation {
            features,
            intercept: fit.intercept,
            score,
            local_prediction,
            probabilities: probabilities[0],
        })
    }

    fn sample_neighborhood(&self, tokens: &[&str]) -> Neighborhood {
        let mut vocabulary: Vec<String> = Vec::new();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let token_features: Vec<usize> = tokens
            .iter()
            .map(|&token| {
                *index.entry(token).or_insert_with(|| {
                    vocabulary.push(token.to_string());
                    vocabulary.len() - 1
                })
            })
            .collect();

        let num_words = vocabulary.len();
        let num_samples = self.config.num_samples.max(1);
        let max_removed = num_words.saturating_sub(1).max(1);
        let mut rng = StdRng::seed_from_u64(self.config.random_seed);

        let mut presence = Array2::<f64>::ones((num_samples, num_words));
        let mut texts = Vec::with_capacity(num_samples);
        texts.push(tokens.join(" "));

        for row in 1..num_samples {
            let removed = rng.random_range(1..=max_removed);
            for feature in rand::seq::index::sample(&mut rng, num_words, removed) {
                presence[[row, feature]] = 0.0;
            }
            let kept: Vec<&str> = tokens
                .iter()
                .zip(&token_features)
                .filter(|&(_, &feature)| presence[[row, feature]] > 0.0)
                .map(|(&token, _)| token)
                .collect();
            texts.push(kept.join(" "));
        }

        let kernel_width = self.config.kernel_width;
        let weights = presence
            .rows()
            .into_iter()
            .map(|row| {
                let distance = cosine_distance_to_ones(row.sum(), num_words) * 100.0;
                (-(distance * distance) / (kernel_width * kernel_width))
                    .exp()
                    .sqrt()
            })
            .collect();

        Neighborhood {
            vocabulary,
            presence,
            texts,
            weights,
        }
    }

    fn select_features(&self, neighborhood: &Neighborhood, target: &Array1<f64>) -> Vec<usize> {
        let num_words = neighborhood.vocabulary.len();
        let budget = self.config.num_features;
        let method = match self.config.feature_selection {
            FeatureSelection::Auto if budget <= AUTO_FORWARD_SELECTION_MAX => {
                FeatureSelection::ForwardSelection
            }
            FeatureSelection::Auto => FeatureSelection::HighestWeights,
            other => other,
        };

        match method {
            FeatureSelection::HighestWeights if budget < num_words => {
                let fit = RidgeFit::fit(
                    neighborhood.presence.view(),
                    target.view(),
                    neighborhood.weights.view(),
                    HIGHEST_WEIGHTS_ALPHA,
                );
                let mut ranked: Vec<usize> = (0..num_words).collect();
                ranked.sort_by(|&a, &b| fit.coef[b].abs().total_cmp(&fit.coef[a].abs()));
                ranked.truncate(budget);
                ranked
            }
            FeatureSelection::ForwardSelection => {
                forward_selection(neighborhood, target, budget.min(num_words))
            }
            _ => (0..num_words).collect(),
        }
    }
}

/// Greedily adds the feature that most improves the weighted R².
fn forward_selection(
    neighborhood: &Neighborhood,
    target: &Array1<f64>,
    budget: usize,
) -> Vec<usize> {
    let num_words = neighborhood.vocabulary.len();
    let mut used: Vec<usize> = Vec::with_capacity(budget);
    for _ in 0..budget {
        let mut best: Option<(usize, f64)> = None;
        for candidate in (0..num_words).filter(|f| !used.contains(f)) {
            let mut columns = used.clone();
            columns.push(candidate);
            let design = neighborhood.presence.select(Axis(1), &columns);
            let fit = RidgeFit::fit(
                design.view(),
                target.view(),
                neighborhood.weights.view(),
                0.0,
            );
            let score = fit.score(design.view(), target.view(), neighborhood.weights.view());
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        match best {
            Some((feature, _)) => used.push(feature),
            None => break,
        }
    }
    used
}

/// Cosine distance between a binary row with `active` ones and the all-ones row.
fn cosine_distance_to_ones(active: f64, num_words: usize) -> f64 {
    if active <= 0.0 || num_words == 0 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = num_words as f64;
    1.0 - (active / total).sqrt()
}
