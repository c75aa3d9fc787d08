//! Server-rendered HTML for the dashboard pages.
use std::fmt::Write;

use ammonia::clean_text;

use crate::client::{ExplainResponse, HealthResponse, PredictResponse};

const POSITIVE_COLOR: &str = "#2e9e5b";
const NEGATIVE_COLOR: &str = "#d64541";

/// What the sidebar says about the API.
#[derive(Debug, Clone)]
pub enum ApiStatus {
    Reachable(HealthResponse),
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

/// The result section rendered under the form.
#[derive(Debug, Clone)]
pub enum Outcome<'a> {
    Empty,
    Prediction(&'a PredictResponse),
    Explanation(&'a ExplainResponse),
}

pub struct Page<'a> {
    pub status: &'a ApiStatus,
    pub text: &'a str,
    pub max_chars: usize,
    pub notices: &'a [Notice],
    pub outcome: Outcome<'a>,
}

#[must_use]
pub fn render(page: &Page<'_>) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Tweet Sentiment Analysis</title>\
         <style>body{font-family:Arial,sans-serif;margin:0;display:flex;}\
         aside{width:260px;padding:20px;background:#f4f4f6;min-height:100vh;}\
         main{flex:1;padding:20px 40px;max-width:900px;}\
         textarea{width:100%;font-size:15px;}\
         .notice{padding:10px;border-radius:4px;margin:10px 0;}\
         .info{background:#e8f0fe;}.warning{background:#fff4e5;}.error{background:#fdecea;}\
         table{border-collapse:collapse;}td,th{padding:4px 10px;border-bottom:1px solid #ddd;}</style>\
         </head><body>",
    );
    sidebar(&mut html, page.status);

    html.push_str("<main><h1>Tweet Sentiment Analysis</h1>");
    form(&mut html, page.text, page.max_chars);
    for notice in page.notices {
        notice_banner(&mut html, notice);
    }
    match &page.outcome {
        Outcome::Empty => {}
        Outcome::Prediction(prediction) => prediction_section(&mut html, prediction),
        Outcome::Explanation(explanation) => explanation_section(&mut html, explanation),
    }
    html.push_str("</main></body></html>");
    html
}

fn sidebar(html: &mut String, status: &ApiStatus) {
    html.push_str(
        "<aside><h3>How to use</h3><ol>\
         <li>Type or paste a tweet.</li>\
         <li><b>Predict</b> shows the sentiment and class probabilities.</li>\
         <li><b>Explain</b> shows which words pushed the prediction.</li></ol>\
         <h3>API status</h3>",
    );
    match status {
        ApiStatus::Reachable(health) => {
            let _ = write!(
                html,
                "<p class=\"api-status\">{}: model {}, vectorizer {}</p>",
                clean_text(&health.status),
                loaded(health.model_loaded),
                loaded(health.vectorizer_loaded)
            );
        }
        ApiStatus::Unreachable(reason) => {
            let _ = write!(
                html,
                "<p class=\"api-status\">unreachable: {}</p>",
                clean_text(reason)
            );
        }
    }
    html.push_str("</aside>");
}

fn loaded(flag: bool) -> &'static str {
    if flag { "loaded" } else { "missing" }
}

fn form(html: &mut String, text: &str, max_chars: usize) {
    let _ = write!(
        html,
        "<form method=\"post\">\
         <textarea name=\"text\" rows=\"4\" maxlength=\"{max_chars}\" \
         placeholder=\"Enter a tweet (up to {max_chars} characters)\">{}</textarea>\
         <p><button formaction=\"/predict\">Predict</button> \
         <button formaction=\"/explain\">Explain</button></p></form>",
        clean_text(text)
    );
}

fn notice_banner(html: &mut String, notice: &Notice) {
    let (class, message) = match notice {
        Notice::Info(message) => ("info", message),
        Notice::Warning(message) => ("warning", message),
        Notice::Error(message) => ("error", message),
    };
    let _ = write!(
        html,
        "<div class=\"notice {class}\">{}</div>",
        clean_text(message)
    );
}

fn sentiment_color(sentiment: &str) -> &'static str {
    if sentiment == "positive" {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

fn prediction_section(html: &mut String, prediction: &PredictResponse) {
    let _ = write!(
        html,
        "<section class=\"prediction\"><h2 style=\"color:{}\">Sentiment: {}</h2>\
         <p>Confidence: {:.1}%</p>",
        sentiment_color(&prediction.sentiment),
        clean_text(&prediction.sentiment.to_uppercase()),
        prediction.confidence * 100.0
    );
    html.push_str(&probability_chart(prediction));
    html.push_str("</section>");
}

/// Horizontal SVG bar chart of the two class probabilities.
#[must_use]
pub fn probability_chart(prediction: &PredictResponse) -> String {
    const WIDTH: f64 = 400.0;
    const LABEL_WIDTH: f64 = 80.0;

    let mut svg = String::from(
        "<svg class=\"probability-chart\" xmlns=\"http://www.w3.org/2000/svg\" \
         width=\"560\" height=\"90\" role=\"img\" aria-label=\"Class probabilities\">",
    );
    for (row, (label, probability, color)) in [
        ("Negative", prediction.probability_negative, NEGATIVE_COLOR),
        ("Positive", prediction.probability_positive, POSITIVE_COLOR),
    ]
    .into_iter()
    .enumerate()
    {
        let y = 10.0 + 40.0 * row as f64;
        let bar = (probability.clamp(0.0, 1.0) * WIDTH).round();
        let _ = write!(
            svg,
            "<text x=\"0\" y=\"{text_y}\" font-size=\"14\">{label}</text>\
             <rect x=\"{LABEL_WIDTH}\" y=\"{y}\" width=\"{bar}\" height=\"24\" fill=\"{color}\"/>\
             <text x=\"{value_x}\" y=\"{text_y}\" font-size=\"14\">{percent:.1}%</text>",
            text_y = y + 17.0,
            value_x = LABEL_WIDTH + bar + 6.0,
            percent = probability * 100.0,
        );
    }
    svg.push_str("</svg>");
    svg
}

fn explanation_section(html: &mut String, explanation: &ExplainResponse) {
    let _ = write!(
        html,
        "<section class=\"explanation\"><h2 style=\"color:{}\">Sentiment: {}</h2>\
         <h3>LIME explanation</h3>\
         <iframe sandbox=\"\" style=\"width:100%;height:420px;border:1px solid #ddd;\" srcdoc=\"{}\"></iframe>",
        sentiment_color(&explanation.sentiment),
        clean_text(&explanation.sentiment.to_uppercase()),
        clean_text(&explanation.html_explanation)
    );
    html.push_str(&weight_table(explanation));
    html.push_str("</section>");
}

/// Token attributions as a table, strongest first as returned by the API.
#[must_use]
pub fn weight_table(explanation: &ExplainResponse) -> String {
    let mut table = String::from(
        "<h3>Word weights</h3><table class=\"weights\">\
         <tr><th>Word</th><th>Weight</th><th>Pushes toward</th></tr>",
    );
    for (token, weight) in &explanation.explanation {
        let (direction, color) = if *weight >= 0.0 {
            ("positive", POSITIVE_COLOR)
        } else {
            ("negative", NEGATIVE_COLOR)
        };
        let _ = write!(
            table,
            "<tr><td>{}</td><td style=\"color:{color}\">{weight:+.4}</td><td>{direction}</td></tr>",
            clean_text(token)
        );
    }
    let _ = write!(
        table,
        "</table><p class=\"fit\">intercept {:.3}, local prediction {:.3}, R² {:.3}</p>",
        explanation.intercept, explanation.local_prediction, explanation.score
    );
    table
}
