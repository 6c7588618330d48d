use crate::utils::error::{AppError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub const NAMES: [&'static str; 2] = ["compact", "json"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "house_price_web=debug,tower_http=debug,info"
    } else {
        "house_price_web=info,tower_http=info"
    }
}

/// Rejects directives `EnvFilter` cannot parse, so a typo is reported at startup.
pub fn validate_filter(field: &str, directives: &str) -> Result<()> {
    EnvFilter::try_new(directives)
        .map(|_| ())
        .map_err(|e| AppError::InvalidConfigValueError {
            field: field.to_string(),
            value: directives.to_string(),
            reason: e.to_string(),
        })
}

/// `RUST_LOG` 優先，其次是設定檔中的 filter，最後才是預設值
pub fn build_filter(configured: Option<&str>, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
    })
}

pub fn init_logger(format: LogFormat, configured: Option<&str>, verbose: bool) {
    let filter = build_filter(configured, verbose);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init(),
    }
}
