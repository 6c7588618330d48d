//! The single HTML page, rendered by string formatting.

use crate::domain::model::{Prediction, FEATURE_NAMES};
use crate::utils::validation::FieldIssue;
use std::collections::HashMap;

/// Short labels for the Boston housing features, same order as `FEATURE_NAMES`.
const FEATURE_LABELS: [&str; 10] = [
    "Per capita crime rate by town",
    "Proportion of residential land zoned for lots over 25,000 sq.ft.",
    "Proportion of non-retail business acres per town",
    "Charles River dummy variable (1 if tract bounds river; 0 otherwise)",
    "Nitric oxides concentration (parts per 10 million)",
    "Proportion of owner-occupied units built prior to 1940",
    "Weighted distances to five Boston employment centres",
    "Pupil-teacher ratio by town",
    "1000(Bk - 0.63)^2 where Bk is the proportion of Black residents by town",
    "% lower status of the population",
];

/// What to show on top of the bare form.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub values: Option<&'a HashMap<String, String>>,
    pub prediction_text: Option<String>,
    pub errors: Vec<String>,
}

impl<'a> PageView<'a> {
    pub fn with_prediction(values: &'a HashMap<String, String>, prediction: &Prediction) -> Self {
        Self {
            values: Some(values),
            prediction_text: Some(prediction_text(prediction)),
            errors: Vec::new(),
        }
    }

    pub fn with_issues(values: &'a HashMap<String, String>, issues: &[FieldIssue]) -> Self {
        Self {
            values: Some(values),
            prediction_text: None,
            errors: issues.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn with_message(values: &'a HashMap<String, String>, message: String) -> Self {
        Self {
            values: Some(values),
            prediction_text: None,
            errors: vec![message],
        }
    }

    pub fn with_error(message: String) -> Self {
        Self {
            values: None,
            prediction_text: None,
            errors: vec![message],
        }
    }
}

pub fn prediction_text(prediction: &Prediction) -> String {
    format!("Predicted Price: {}", prediction.formatted())
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_inputs(values: Option<&HashMap<String, String>>) -> String {
    FEATURE_NAMES
        .iter()
        .zip(FEATURE_LABELS)
        .map(|(name, label)| {
            let value = values
                .and_then(|v| v.get(*name))
                .map(|v| escape_html(v))
                .unwrap_or_default();
            format!(
                r#"      <div class="field">
        <label for="{name}">{name}</label>
        <input type="text" id="{name}" name="{name}" value="{value}" placeholder="{label}" required>
        <small>{label}</small>
      </div>
"#,
                name = name,
                value = value,
                label = escape_html(label),
            )
        })
        .collect()
}

fn render_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("        <li>{}</li>\n", escape_html(e)))
        .collect();
    format!(
        "    <div class=\"errors\" role=\"alert\">\n      <ul>\n{}      </ul>\n    </div>\n",
        items
    )
}

pub fn render_index(view: &PageView<'_>) -> String {
    let prediction = view
        .prediction_text
        .as_deref()
        .map(|text| format!("    <p class=\"prediction\">{}</p>\n", escape_html(text)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>House Price Prediction</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
    .field {{ margin-bottom: 0.75rem; }}
    .field label {{ display: inline-block; width: 6rem; font-weight: bold; }}
    .field small {{ display: block; color: #666; }}
    .prediction {{ font-size: 1.4rem; font-weight: bold; }}
    .errors {{ color: #a00; }}
  </style>
</head>
<body>
  <main>
    <h1>House Price Prediction</h1>
{errors}    <form action="/predict" method="post">
{inputs}      <button type="submit">Predict</button>
    </form>
{prediction}  </main>
</body>
</html>
"#,
        errors = render_errors(&view.errors),
        inputs = render_inputs(view.values),
        prediction = prediction,
    )
}
