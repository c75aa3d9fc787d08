use crate::client::SentimentApiClient;
use crate::error::ClientError;
use crate::view::{self, ApiStatus, Notice, Outcome, Page};
use axum::Form;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct DashboardState {
    pub client: SentimentApiClient,
    pub max_chars: usize,
}

#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

/// Text ready to send to the API.
#[derive(Debug, PartialEq, Eq)]
pub struct PreparedText {
    pub text: String,
    pub truncated: bool,
}

/// Rejects blank input and truncates to `max_chars` characters.
#[must_use]
pub fn prepare_text(raw: &str, max_chars: usize) -> Option<PreparedText> {
    if raw.trim().is_empty() {
        return None;
    }
    let truncated = raw.chars().count() > max_chars;
    let text = if truncated {
        raw.chars().take(max_chars).collect()
    } else {
        raw.to_string()
    };
    Some(PreparedText { text, truncated })
}

async fn api_status(client: &SentimentApiClient) -> ApiStatus {
    match client.health().await {
        Ok(health) => ApiStatus::Reachable(health),
        Err(e) => {
            warn!("Sentiment API health check failed: {e}");
            ApiStatus::Unreachable(e.to_string())
        }
    }
}

fn empty_text_notice() -> Notice {
    Notice::Warning("Please enter some text to analyze.".to_string())
}

fn truncation_notice(max_chars: usize) -> Notice {
    Notice::Info(format!("Text was truncated to {max_chars} characters."))
}

fn failure_notice(e: &ClientError) -> Notice {
    error!("Sentiment API call failed: {e}");
    Notice::Error(format!("Sentiment API error: {e}"))
}

/// Handler for GET /
pub async fn index_handler(State(state): State<Arc<DashboardState>>) -> Html<String> {
    let status = api_status(&state.client).await;
    Html(view::render(&Page {
        status: &status,
        text: "",
        max_chars: state.max_chars,
        notices: &[],
        outcome: Outcome::Empty,
    }))
}

/// Handler for POST /predict
pub async fn predict_handler(
    State(state): State<Arc<DashboardState>>,
    Form(form): Form<TextForm>,
) -> Html<String> {
    let status = api_status(&state.client).await;
    let Some(prepared) = prepare_text(&form.text, state.max_chars) else {
        return Html(view::render(&Page {
            status: &status,
            text: &form.text,
            max_chars: state.max_chars,
            notices: &[empty_text_notice()],
            outcome: Outcome::Empty,
        }));
    };

    let mut notices = Vec::new();
    if prepared.truncated {
        notices.push(truncation_notice(state.max_chars));
    }
    let result = state.client.predict(&prepared.text).await;
    let outcome = match &result {
        Ok(prediction) => {
            info!(sentiment = %prediction.sentiment, "Rendered prediction");
            Outcome::Prediction(prediction)
        }
        Err(e) => {
            notices.push(failure_notice(e));
            Outcome::Empty
        }
    };

    Html(view::render(&Page {
        status: &status,
        text: &prepared.text,
        max_chars: state.max_chars,
        notices: &notices,
        outcome,
    }))
}

/// Handler for POST /explain
pub async fn explain_handler(
    State(state): State<Arc<DashboardState>>,
    Form(form): Form<TextForm>,
) -> Html<String> {
    let status = api_status(&state.client).await;
    let Some(prepared) = prepare_text(&form.text, state.max_chars) else {
        return Html(view::render(&Page {
            status: &status,
            text: &form.text,
            max_chars: state.max_chars,
            notices: &[empty_text_notice()],
            outcome: Outcome::Empty,
        }));
    };

    let mut notices = Vec::new();
    if prepared.truncated {
        notices.push(truncation_notice(state.max_chars));
    }
    let result = state.client.explain(&prepared.text).await;
    let outcome = match &result {
        Ok(explanation) => {
            info!(
                sentiment = %explanation.sentiment,
                features = explanation.explanation.len(),
                "Rendered explanation"
            );
            Outcome::Explanation(explanation)
        }
        Err(e) => {
            notices.push(failure_notice(e));
            Outcome::Empty
        }
    };

    Html(view::render(&Page {
        status: &status,
        text: &prepared.text,
        max_chars: state.max_chars,
        notices: &notices,
        outcome,
    }))
}
