use axum_test::TestServer;
use sentiment_dashboard::app::dashboard_router;
use sentiment_dashboard::client::{ApiClientConfig, SentimentApiClient};
use sentiment_dashboard::handler::DashboardState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_api() -> MockServer {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "model_loaded": true,
            "vectorizer_loaded": true
        })))
        .mount(&api)
        .await;
    api
}

fn create_dashboard(api_url: String, max_chars: usize) -> TestServer {
    let client = SentimentApiClient::new(ApiClientConfig {
        base_url: api_url,
        predict_timeout: Duration::from_secs(5),
        explain_timeout: Duration::from_secs(5),
    })
    .unwrap();
    let state = Arc::new(DashboardState { client, max_chars });
    TestServer::new(dashboard_router(state)).unwrap()
}

#[tokio::test]
async fn test_index_shows_form_and_api_status() {
    let api = mock_api().await;
    let server = create_dashboard(api.uri(), 280);

    let response = server.get("/").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("<textarea name=\"text\""));
    assert!(body.contains("model loaded, vectorizer loaded"));
}

#[tokio::test]
async fn test_index_reports_unreachable_api() {
    let server = create_dashboard("http://127.0.0.1:1".to_string(), 280);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("unreachable"));
}

#[tokio::test]
async fn test_predict_renders_chart() {
    let api = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({"text": "I love this"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "positive",
            "confidence": 0.93,
            "probability_positive": 0.93,
            "probability_negative": 0.07
        })))
        .expect(1)
        .mount(&api)
        .await;
    let server = create_dashboard(api.uri(), 280);

    let response = server
        .post("/predict")
        .form(&[("text", "I love this")])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("POSITIVE"));
    assert!(body.contains("Confidence: 93.0%"));
    assert!(body.contains("<svg class=\"probability-chart\""));
}

#[tokio::test]
async fn test_explain_renders_iframe_and_table() {
    let api = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/explain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "negative",
            "explanation": [["hate", -0.41], ["movie", 0.02]],
            "html_explanation": "<div class=\"lime-explanation\">hate movie</div>",
            "intercept": 0.5,
            "score": 0.7,
            "local_prediction": 0.1
        })))
        .expect(1)
        .mount(&api)
        .await;
    let server = create_dashboard(api.uri(), 280);

    let response = server
        .post("/explain")
        .form(&[("text", "I hate this movie")])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("<iframe sandbox"));
    assert!(body.contains("<table class=\"weights\">"));
    assert!(body.contains("-0.4100"));
    assert!(body.contains("NEGATIVE"));
}

#[tokio::test]
async fn test_blank_text_warns_without_calling_api() {
    let api = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api)
        .await;
    let server = create_dashboard(api.uri(), 280);

    let response = server.post("/predict").form(&[("text", "   ")]).await;

    response.assert_status_ok();
    assert!(response.text().contains("notice warning"));
}

#[tokio::test]
async fn test_long_text_is_truncated_before_sending() {
    let api = mock_api().await;
    let expected = "a".repeat(10);
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({"text": expected})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "positive",
            "confidence": 0.5,
            "probability_positive": 0.5,
            "probability_negative": 0.5
        })))
        .expect(1)
        .mount(&api)
        .await;
    let server = create_dashboard(api.uri(), 10);

    let response = server
        .post("/predict")
        .form(&[("text", "a".repeat(25))])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("notice info"));
}

#[tokio::test]
async fn test_api_error_renders_banner() {
    let api = mock_api().await;
    Mock::given(method("POST"))
        .and(path("/explain"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": "Text too short for explanation"
        })))
        .mount(&api)
        .await;
    let server = create_dashboard(api.uri(), 280);

    let response = server.post("/explain").form(&[("text", "Super!")]).await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("notice error"));
    assert!(body.contains("422"));
}
