use axum::response::Html;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Sentiment Analysis API</title></head>
<body style="font-family: Arial, sans-serif; max-width: 720px; margin: 40px auto;">
<h1>Sentiment Analysis API</h1>
<p>Tweet sentiment classification with LIME explanations.</p>
<ul>
<li><code>POST /predict</code> &mdash; body <code>{"text": "..."}</code>, returns the sentiment and class probabilities</li>
<li><code>POST /explain</code> &mdash; body <code>{"text": "..."}</code>, returns per-word attributions and an HTML visualization</li>
<li><code>GET /health</code> &mdash; artifact load status</li>
</ul>
</body>
</html>
"#;

/// Handler for GET /
pub async fn root_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
