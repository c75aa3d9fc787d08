//! Self-contained HTML rendering of an explanation.
use std::fmt::Write;

use ammonia::clean_text;
use rustc_hash::FxHashMap;

use super::LimeExplanation;

const POSITIVE_COLOR: &str = "#2e9e5b";
const NEGATIVE_COLOR: &str = "#d64541";

/// Renders probabilities, per-token weight bars and the highlighted text.
///
/// `class_names` is `[negative, positive]`. All text is escaped.
#[must_use]
pub fn render(text: &str, explanation: &LimeExplanation, class_names: [&str; 2]) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(
        "<div class=\"lime-explanation\" style=\"font-family: Arial, sans-serif; font-size: 14px;\">",
    );

    html.push_str("<div class=\"lime-probabilities\"><h4>Prediction probabilities</h4>");
    for (name, probability, color) in [
        (class_names[0], explanation.probabilities[0], NEGATIVE_COLOR),
        (class_names[1], explanation.probabilities[1], POSITIVE_COLOR),
    ] {
        bar_row(&mut html, name, &format!("{probability:.2}"), probability, color);
    }
    html.push_str("</div>");

    let max_weight = explanation
        .features
        .iter()
        .map(|(_, weight)| weight.abs())
        .fold(0.0_f64, f64::max);
    let _ = write!(
        html,
        "<div class=\"lime-features\"><h4>{} &larr; &rarr; {}</h4>",
        clean_text(class_names[0]),
        clean_text(class_names[1])
    );
    for (token, weight) in &explanation.features {
        let share = if max_weight > 0.0 { weight.abs() / max_weight } else { 0.0 };
        let color = if *weight >= 0.0 { POSITIVE_COLOR } else { NEGATIVE_COLOR };
        bar_row(&mut html, token, &format!("{weight:+.3}"), share, color);
    }
    html.push_str("</div>");

    let colors: FxHashMap<&str, &str> = explanation
        .features
        .iter()
        .map(|(token, weight)| {
            let color = if *weight >= 0.0 { POSITIVE_COLOR } else { NEGATIVE_COLOR };
            (token.as_str(), color)
        })
        .collect();
    html.push_str("<div class=\"lime-text\"><h4>Text with highlighted words</h4><p>");
    let highlighted: Vec<String> = text
        .split_whitespace()
        .map(|token| match colors.get(token) {
            Some(color) => format!(
                "<span style=\"background-color: {color}; color: #fff; padding: 0 2px; border-radius: 2px;\">{}</span>",
                clean_text(token)
            ),
            None => clean_text(token),
        })
        .collect();
    html.push_str(&highlighted.join(" "));
    html.push_str("</p></div>");

    let _ = write!(
        html,
        "<div class=\"lime-fit\" style=\"color: #777; font-size: 12px;\">intercept {:.3}, local prediction {:.3}, R² {:.3}</div>",
        explanation.intercept, explanation.local_prediction, explanation.score
    );
    html.push_str("</div>");
    html
}

fn bar_row(html: &mut String, label: &str, value: &str, share: f64, color: &str) {
    let width = (share.clamp(0.0, 1.0) * 100.0).round();
    let _ = write!(
        html,
        "<div class=\"lime-bar\" style=\"display: flex; align-items: center; margin: 2px 0;\">\
         <span style=\"width: 120px; text-align: right; padding-right: 6px;\">{}</span>\
         <div style=\"width: 200px; background: #eee;\"><div style=\"width: {width}%; background: {color}; height: 14px;\"></div></div>\
         <span style=\"padding-left: 6px;\">{value}</span></div>",
        clean_text(label)
    );
}
