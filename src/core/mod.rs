pub mod artifact;
pub mod engine;
pub mod linear;
pub mod tree_ensemble;

pub use crate::domain::model::{FeatureVector, Prediction};
pub use crate::domain::ports::{ConfigProvider, Regressor};
pub use crate::utils::error::Result;
