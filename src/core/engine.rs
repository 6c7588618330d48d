use crate::core::{FeatureVector, Prediction, Regressor};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use std::collections::HashMap;

pub struct PredictionEngine<R: Regressor> {
    model: R,
}

impl<R: Regressor + Validate> PredictionEngine<R> {
    /// Refuses a model whose shape does not fit the ten-feature input.
    pub fn new(model: R) -> Result<Self> {
        model.validate()?;
        Ok(Self { model })
    }
}

impl<R: Regressor> PredictionEngine<R> {
    pub fn model(&self) -> &R {
        &self.model
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        let value = self.model.predict(features);
        tracing::debug!("Model output {} for {:?}", value, features.as_slice());

        if !value.is_finite() {
            return Err(AppError::UnusablePredictionError { value });
        }
        Ok(Prediction::new(value))
    }

    /// Form fields → fixed-order vector → model → prediction.
    pub fn predict_form(&self, form: &HashMap<String, String>) -> Result<Prediction> {
        let features = FeatureVector::from_form(form)?;
        self.predict(&features)
    }
}
