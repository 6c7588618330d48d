use crate::core::{FeatureVector, Regressor, Result};
use crate::domain::model::FEATURE_COUNT;
use crate::utils::error::AppError;
use crate::utils::validation::{validate_finite, validate_length, Validate};
use serde::{Deserialize, Serialize};

/// Per-feature standardization fitted alongside the model: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Scaler>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
            scaler: None,
        }
    }

    pub fn with_scaler(mut self, scaler: Scaler) -> Self {
        self.scaler = Some(scaler);
        self
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();

        let weighted: f64 = match &self.scaler {
            Some(scaler) => x
                .iter()
                .zip(&self.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((xi, wi), (mu, sigma))| wi * (xi - mu) / sigma)
                .sum(),
            None => x.iter().zip(&self.coefficients).map(|(xi, wi)| wi * xi).sum(),
        };

        self.intercept + weighted
    }

    fn describe(&self) -> String {
        format!(
            "linear regression ({} coefficients{})",
            self.coefficients.len(),
            if self.scaler.is_some() { ", standardized" } else { "" }
        )
    }
}

impl Validate for LinearRegressor {
    fn validate(&self) -> Result<()> {
        validate_finite("intercept", &[self.intercept])?;
        validate_length("coefficients", self.coefficients.len(), FEATURE_COUNT)?;
        validate_finite("coefficients", &self.coefficients)?;

        if let Some(scaler) = &self.scaler {
            validate_length("scaler.mean", scaler.mean.len(), FEATURE_COUNT)?;
            validate_length("scaler.scale", scaler.scale.len(), FEATURE_COUNT)?;
            validate_finite("scaler.mean", &scaler.mean)?;
            validate_finite("scaler.scale", &scaler.scale)?;

            if let Some(position) = scaler.scale.iter().position(|s| *s == 0.0) {
                return Err(AppError::InvalidModelError {
                    message: format!("scaler.scale[{}] is zero", position),
                });
            }
        }

        Ok(())
    }
}
