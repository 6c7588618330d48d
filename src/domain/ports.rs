use crate::domain::model::FeatureVector;

/// The one capability a loaded model exposes.
///
/// Implementations are read-only after construction and shared across
/// request handlers.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Short human-readable summary, used in startup logs.
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn model_path(&self) -> &str;
    fn debug(&self) -> bool;
}
