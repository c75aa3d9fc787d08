use serde::{Deserialize, Serialize};

/// Body of `POST /predict` and `POST /explain`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TweetRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub const CLASS_NAMES: [&'static str; 2] = ["negative", "positive"];

    /// Positive wins ties.
    #[must_use]
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        if probabilities[1] >= probabilities[0] {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probability_positive: f64,
    pub probability_negative: f64,
}

impl Prediction {
    #[must_use]
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        let [probability_negative, probability_positive] = probabilities;
        Self {
            sentiment: Sentiment::from_probabilities(probabilities),
            confidence: probability_negative.max(probability_positive),
            probability_positive,
            probability_negative,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Explanation {
    pub sentiment: Sentiment,
    /// `[token, weight]` pairs by descending absolute weight.
    pub explanation: Vec<(String, f64)>,
    pub html_explanation: String,
    pub intercept: f64,
    pub score: f64,
    pub local_prediction: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
}
