use axum::http::StatusCode;
use axum_test::TestServer;
use sentiment_api::app::main_router;
use sentiment_api::artifacts::{Artifacts, EMOJI_FILE, MODEL_FILE, STOPWORDS_FILE, VECTORIZER_FILE};
use sentiment_api::domain::{Explanation, HealthReport, Prediction, Sentiment};
use sentiment_api::explain::LimeConfig;
use sentiment_api::preprocess::NormalizeMode;
use sentiment_api::service::SentimentService;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../api_artifacts")
}

fn lime_config() -> LimeConfig {
    LimeConfig {
        num_samples: 1000,
        ..LimeConfig::default()
    }
}

fn create_test_server() -> TestServer {
    let artifacts = Artifacts::load(&artifacts_dir()).unwrap();
    let service =
        SentimentService::from_artifacts(artifacts, NormalizeMode::Lemmatize, lime_config())
            .unwrap();
    TestServer::new(main_router(Arc::new(service))).unwrap()
}

/// Lexicons only: the model and vectorizer are absent.
fn create_degraded_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    for file in [EMOJI_FILE, STOPWORDS_FILE] {
        std::fs::copy(artifacts_dir().join(file), dir.path().join(file)).unwrap();
    }
    let artifacts = Artifacts::load(dir.path()).unwrap();
    let service =
        SentimentService::from_artifacts(artifacts, NormalizeMode::Lemmatize, lime_config())
            .unwrap();
    (TestServer::new(main_router(Arc::new(service))).unwrap(), dir)
}

/// A two-feature model next to a one-term vectorizer.
fn create_mismatched_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    for file in [EMOJI_FILE, STOPWORDS_FILE] {
        std::fs::copy(artifacts_dir().join(file), dir.path().join(file)).unwrap();
    }
    std::fs::write(
        dir.path().join(MODEL_FILE),
        r#"{"classes": [0, 1], "coef": [[1.0, 2.0]], "intercept": [0.0]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(VECTORIZER_FILE),
        r#"{"vocabulary": {"love": 0}, "idf": [1.0]}"#,
    )
    .unwrap();
    let artifacts = Artifacts::load(dir.path()).unwrap();
    let service =
        SentimentService::from_artifacts(artifacts, NormalizeMode::Lemmatize, lime_config())
            .unwrap();
    (TestServer::new(main_router(Arc::new(service))).unwrap(), dir)
}

#[tokio::test]
async fn test_root_serves_landing_page() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Sentiment Analysis API"));
    assert!(body.contains("/predict"));
    assert!(body.contains("/explain"));
}

#[tokio::test]
async fn test_health_reports_loaded_artifacts() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let report: HealthReport = response.json();
    assert_eq!(report.status, "ok");
    assert!(report.model_loaded);
    assert!(report.vectorizer_loaded);
}

#[tokio::test]
async fn test_health_reports_degraded_without_model() {
    let (server, _dir) = create_degraded_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let report: HealthReport = response.json();
    assert_eq!(report.status, "degraded");
    assert!(!report.model_loaded);
    assert!(!report.vectorizer_loaded);
}

#[tokio::test]
async fn test_predict_positive_tweet() {
    let server = create_test_server();

    let response = server
        .post("/predict")
        .json(&json!({"text": "I love this movie, it's amazing!"}))
        .await;

    response.assert_status_ok();
    let prediction: Prediction = response.json();
    assert_eq!(prediction.sentiment, Sentiment::Positive);
    assert!(
        (prediction.probability_positive + prediction.probability_negative - 1.0).abs() < 0.01
    );
    assert_eq!(
        prediction.confidence,
        prediction.probability_positive.max(prediction.probability_negative)
    );
}

#[tokio::test]
async fn test_predict_negative_tweet() {
    let server = create_test_server();

    let response = server
        .post("/predict")
        .json(&json!({"text": "This movie is absolutely terrible, I hate it!"}))
        .await;

    response.assert_status_ok();
    let prediction: Prediction = response.json();
    assert_eq!(prediction.sentiment, Sentiment::Negative);
    assert!(prediction.probability_negative > 0.5);
}

#[tokio::test]
async fn test_predict_is_deterministic() {
    let server = create_test_server();
    let body = json!({"text": "Great day at work 😊 #blessed @boss https://t.co/xyz"});

    let first: Prediction = server.post("/predict").json(&body).await.json();
    let second: Prediction = server.post("/predict").json(&body).await.json();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_predict_empty_text_still_scores() {
    let server = create_test_server();

    let response = server.post("/predict").json(&json!({"text": ""})).await;

    response.assert_status_ok();
    let prediction: Prediction = response.json();
    assert!(
        (prediction.probability_positive + prediction.probability_negative - 1.0).abs() < 0.01
    );
}

#[tokio::test]
async fn test_predict_missing_text_field_is_rejected() {
    let server = create_test_server();

    let response = server.post("/predict").json(&json!({"tweet": "hi"})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_predict_non_json_body_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/predict")
        .content_type("application/json")
        .text("not json")
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_predict_without_model_returns_500() {
    let (server, _dir) = create_degraded_server();

    let response = server.post("/predict").json(&json!({"text": "hello"})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Model not loaded");
}

#[tokio::test]
async fn test_explain_returns_attributions_and_html() {
    let server = create_test_server();

    let response = server
        .post("/explain")
        .json(&json!({"text": "This movie is absolutely terrible, I hate it!"}))
        .await;

    response.assert_status_ok();
    let explanation: Explanation = response.json();
    assert_eq!(explanation.sentiment, Sentiment::Negative);
    assert!(!explanation.explanation.is_empty());
    assert!(explanation.explanation.len() <= 10);
    assert!(explanation.html_explanation.contains("<div"));
    assert!(explanation.html_explanation.len() > 100);

    let magnitudes: Vec<f64> = explanation
        .explanation
        .iter()
        .map(|(_, weight)| weight.abs())
        .collect();
    assert!(magnitudes.windows(2).all(|pair| pair[0] >= pair[1]));

    let (top_token, top_weight) = &explanation.explanation[0];
    assert!(["terrible", "hate"].contains(&top_token.as_str()));
    assert!(*top_weight < 0.0);
}

#[tokio::test]
async fn test_explain_serializes_pairs_as_arrays() {
    let server = create_test_server();

    let response = server
        .post("/explain")
        .json(&json!({"text": "I love this movie, it's amazing!"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let first = &body["explanation"][0];
    assert!(first[0].is_string());
    assert!(first[1].is_number());
    assert_eq!(body["sentiment"], "positive");
}

#[tokio::test]
async fn test_explain_short_text_returns_422() {
    let server = create_test_server();

    let response = server.post("/explain").json(&json!({"text": "Super!"})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Text too short for explanation");
}

#[tokio::test]
async fn test_explain_without_model_returns_500() {
    let (server, _dir) = create_degraded_server();

    let response = server
        .post("/explain")
        .json(&json!({"text": "love this movie"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Model not loaded");
}

#[tokio::test]
async fn test_mismatched_model_is_reported_as_not_loaded() {
    let (server, _dir) = create_mismatched_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let report: HealthReport = response.json();
    assert_eq!(report.status, "degraded");
    assert!(!report.model_loaded);
    assert!(report.vectorizer_loaded);

    let response = server.post("/predict").json(&json!({"text": "love it"})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Model not loaded");
}

#[tokio::test]
async fn test_oversized_body_returns_413() {
    let server = create_test_server();
    let text = "a".repeat(3 * 1024 * 1024);

    let response = server.post("/predict").json(&json!({ "text": text })).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}
