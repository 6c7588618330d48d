pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::ServerArgs;

pub use crate::app::build_router;
pub use crate::config::ServerConfig;
pub use crate::core::{artifact::ModelArtifact, engine::PredictionEngine};
pub use crate::domain::model::{FeatureVector, Prediction, FEATURE_NAMES};
pub use crate::domain::ports::Regressor;
pub use crate::utils::error::{AppError, Result};
