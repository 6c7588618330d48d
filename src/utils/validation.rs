use crate::utils::error::{AppError, Result};
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 單一表單欄位的問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing { field: String },
    NotANumber { field: String, value: String },
    NotFinite { field: String, value: String },
}

impl FieldIssue {
    pub fn field(&self) -> &str {
        match self {
            FieldIssue::Missing { field }
            | FieldIssue::NotANumber { field, .. }
            | FieldIssue::NotFinite { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing { field } => write!(f, "{} is required", field),
            FieldIssue::NotANumber { field, value } => {
                write!(f, "{} must be a number (got '{}')", field, value)
            }
            FieldIssue::NotFinite { field, value } => {
                write!(f, "{} must be a finite number (got '{}')", field, value)
            }
        }
    }
}

/// Parses a submitted form value as a finite `f64`.
///
/// Surrounding whitespace is ignored. `NaN` and infinities parse in Rust but
/// are rejected here.
pub fn parse_finite_number(field_name: &str, raw: Option<&str>) -> std::result::Result<f64, FieldIssue> {
    let raw = raw.ok_or_else(|| FieldIssue::Missing {
        field: field_name.to_string(),
    })?;

    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| FieldIssue::NotANumber {
        field: field_name.to_string(),
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(FieldIssue::NotFinite {
            field: field_name.to_string(),
            value: raw.to_string(),
        });
    }

    Ok(value)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, values: &[f64]) -> Result<()> {
    if let Some(position) = values.iter().position(|v| !v.is_finite()) {
        return Err(AppError::InvalidModelError {
            message: format!("{}[{}] is not a finite number", field_name, position),
        });
    }
    Ok(())
}

pub fn validate_length(field_name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(AppError::InvalidModelError {
            message: format!(
                "{} has {} entries, expected {}",
                field_name, actual, expected
            ),
        });
    }
    Ok(())
}
