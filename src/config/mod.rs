#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::logger::{self, LogFormat};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_PATH: &str = "models/house_price_prediction.json";

/// Fully resolved settings: defaults, then the TOML file, then CLI/env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub debug: bool,
    pub verbose: bool,
    pub log_filter: Option<String>,
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            debug: false,
            verbose: false,
            log_filter: None,
            log_format: "compact".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn apply_toml(mut self, file: TomlConfig) -> Self {
        if let Some(host) = file.server.host {
            self.host = host;
        }
        if let Some(port) = file.server.port {
            self.port = port;
        }
        if let Some(debug) = file.server.debug {
            self.debug = debug;
        }
        if let Some(path) = file.model.path {
            self.model_path = path;
        }
        if file.logging.filter.is_some() {
            self.log_filter = file.logging.filter;
        }
        if let Some(format) = file.logging.format {
            self.log_format = format;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn apply_args(mut self, args: &cli::ServerArgs) -> Self {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(path) = &args.model_path {
            self.model_path = path.clone();
        }
        if let Some(format) = &args.log_format {
            self.log_format = format.clone();
        }
        // 旗標只能開啟，不能關閉設定檔中的值
        self.debug |= args.debug;
        self.verbose |= args.verbose;
        self
    }

    #[cfg(feature = "cli")]
    pub fn resolve(args: &cli::ServerArgs) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = &args.config {
            config = config.apply_toml(TomlConfig::from_file(path)?);
        }
        Ok(config.apply_args(args))
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        LogFormat::from_name(&self.log_format).ok_or_else(|| AppError::InvalidConfigValueError {
            field: "logging.format".to_string(),
            value: self.log_format.clone(),
            reason: format!("Allowed values: {}", LogFormat::NAMES.join(", ")),
        })
    }

    /// Debug mode implies verbose logging.
    pub fn verbose_logging(&self) -> bool {
        self.verbose || self.debug
    }
}

impl ConfigProvider for ServerConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn debug(&self) -> bool {
        self.debug
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_positive_number("server.port", usize::from(self.port), 1)?;
        validate_path("model.path", &self.model_path)?;
        validate_one_of("logging.format", &self.log_format, &LogFormat::NAMES)?;
        if let Some(filter) = &self.log_filter {
            logger::validate_filter("logging.filter", filter)?;
        }
        Ok(())
    }
}
