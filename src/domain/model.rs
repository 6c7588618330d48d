use crate::utils::error::{AppError, Result};
use crate::utils::validation::parse_finite_number;
use std::collections::HashMap;

pub const FEATURE_COUNT: usize = 10;

/// Form field names, in the order the model expects them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "CRIM", "ZN", "INDUS", "CHAS", "NOX", "AGE", "DIS", "PTRATIO", "B", "LSTAT",
];

/// Fixed-order numeric input to the regression model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Parses the ten required fields out of a submitted form.
    ///
    /// Every field is checked before returning, so a single
    /// [`AppError::ValidationError`] carries one issue per bad field, in
    /// feature order. Unknown extra fields are ignored.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut issues = Vec::new();

        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            match parse_finite_number(name, form.get(name).map(String::as_str)) {
                Ok(value) => *slot = value,
                Err(issue) => issues.push(issue),
            }
        }

        if !issues.is_empty() {
            return Err(AppError::ValidationError { issues });
        }

        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Every finite `f64` at or above this magnitude has no fractional part.
const WHOLE_NUMBER_THRESHOLD: f64 = 4_503_599_627_370_496.0; // 2^52

/// A single model output. Only the display form is rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub value: f64,
}

impl Prediction {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn rounded(&self) -> f64 {
        // 超過 2^52 的 f64 已是整數，乘以 100 可能溢位
        if self.value.abs() >= WHOLE_NUMBER_THRESHOLD {
            return self.value;
        }
        (self.value * 100.0).round() / 100.0
    }

    /// Always exactly two decimal places, e.g. `22.90`.
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.rounded())
    }
}
