use crate::utils::validation::FieldIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load model from '{path}': {message}")]
    ModelLoadError { path: String, message: String },

    #[error("Invalid model artifact: {message}")]
    InvalidModelError { message: String },

    #[error("Validation error: {}", format_issues(.issues))]
    ValidationError { issues: Vec<FieldIssue> },

    #[error("Model output {value} cannot be displayed")]
    UnusablePredictionError { value: f64 },

    #[error("Malformed request: {message}")]
    MalformedRequestError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Model,
    Request,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::ModelLoadError { .. }
            | AppError::InvalidModelError { .. }
            | AppError::SerializationError(_) => ErrorCategory::Model,
            AppError::ValidationError { .. }
            | AppError::UnusablePredictionError { .. }
            | AppError::MalformedRequestError { .. } => ErrorCategory::Request,
            AppError::IoError(_) | AppError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Model | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否為客戶端輸入造成的錯誤 (回應 400)
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ValidationError { issues } => {
                format!("Please correct the form: {}", format_issues(issues))
            }
            AppError::UnusablePredictionError { .. } => {
                "These inputs are too large for the model to produce a price".to_string()
            }
            AppError::MalformedRequestError { .. } => {
                "The request could not be read as a form submission".to_string()
            }
            AppError::ModelLoadError { path, .. } => {
                format!("The prediction model at '{}' could not be loaded", path)
            }
            AppError::InvalidModelError { message } => {
                format!("The prediction model is not usable: {}", message)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AppError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::ServerError { message } => format!("The server could not start: {}", message),
            AppError::IoError(e) => format!("A file operation failed: {}", e),
            AppError::SerializationError(e) => format!("The model file is not valid JSON: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::ValidationError { .. } => {
                "Fill in all ten fields with plain decimal numbers"
            }
            AppError::UnusablePredictionError { .. } => {
                "Use values of a realistic magnitude for each feature"
            }
            AppError::MalformedRequestError { .. } => {
                "Submit the form with Content-Type application/x-www-form-urlencoded"
            }
            AppError::ModelLoadError { .. } | AppError::IoError(_) => {
                "Check that --model-path points to a readable model artifact"
            }
            AppError::InvalidModelError { .. } | AppError::SerializationError(_) => {
                "Re-export the model artifact from the training process"
            }
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            AppError::ServerError { .. } => "Check that the host and port are free and bindable",
        }
    }
}
