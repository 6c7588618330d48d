use crate::core::linear::LinearRegressor;
use crate::core::tree_ensemble::TreeEnsemble;
use crate::core::{ConfigProvider, FeatureVector, Regressor, Result};
use crate::domain::model::FEATURE_NAMES;
use crate::utils::error::AppError;
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: Option<String>,
    pub target: Option<String>,
    pub trained_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

/// A fitted model as exported by the training process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub metadata: ModelMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Wraps an in-memory model; it goes through the same checks as a loaded one.
    pub fn try_new(model: ModelSpec) -> Result<Self> {
        let artifact = Self {
            metadata: ModelMetadata::default(),
            feature_names: None,
            model,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Loads the artifact named by `model_path`; `debug` adds a model summary to the log.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let artifact = Self::from_file(config.model_path())?;
        if config.debug() {
            tracing::debug!("Model details: {}", artifact.describe());
        }
        Ok(artifact)
    }

    /// 從檔案載入並驗證模型，任何失敗都視為啟動失敗
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        tracing::debug!("Reading model artifact from {}", shown);
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ModelLoadError {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        Self::from_json_str(&content).map_err(|e| match e {
            AppError::SerializationError(inner) => AppError::ModelLoadError {
                path: shown,
                message: format!("invalid JSON: {}", inner),
            },
            other => other,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unnamed model")
    }
}

impl Validate for ModelArtifact {
    fn validate(&self) -> Result<()> {
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(AppError::InvalidModelError {
                    message: format!(
                        "feature_names {:?} do not match the expected order {:?}",
                        names, FEATURE_NAMES
                    ),
                });
            }
        }

        match &self.model {
            ModelSpec::Linear(model) => model.validate(),
            ModelSpec::TreeEnsemble(model) => model.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> f64 {
        match &self.model {
            ModelSpec::Linear(model) => model.predict(features),
            ModelSpec::TreeEnsemble(model) => model.predict(features),
        }
    }

    fn describe(&self) -> String {
        let inner = match &self.model {
            ModelSpec::Linear(model) => model.describe(),
            ModelSpec::TreeEnsemble(model) => model.describe(),
        };
        match &self.metadata.trained_at {
            Some(trained_at) => format!("{}: {}, trained {}", self.name(), inner, trained_at.to_rfc3339()),
            None => format!("{}: {}", self.name(), inner),
        }
    }
}
