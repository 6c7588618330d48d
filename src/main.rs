use anyhow::Context;
use clap::Parser;
use house_price_web::app::{build_router, server};
use house_price_web::utils::error::ErrorSeverity;
use house_price_web::utils::{logger, validation::Validate};
use house_price_web::{AppError, ModelArtifact, PredictionEngine, ServerArgs, ServerConfig};
use std::sync::Arc;

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // 設定需先解析，日誌格式取決於設定
    let config = match ServerConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 先驗證再初始化日誌，錯誤的 filter 不會被默默忽略
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let log_format = config.log_format().unwrap_or_default();
    logger::init_logger(log_format, config.log_filter.as_deref(), config.verbose_logging());

    tracing::info!("Starting house-price-web v{}", env!("CARGO_PKG_VERSION"));
    if config.debug {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 模型只在啟動時載入一次，失敗即終止
    tracing::info!("📦 Loading model from {}", config.model_path);
    let engine = match ModelArtifact::from_config(&config).and_then(PredictionEngine::new) {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };
    tracing::info!("✅ Model loaded: {}", engine.model().name());

    let router = build_router(Arc::new(engine));

    let listener = match server::bind(&config).await {
        Ok(listener) => listener,
        Err(e) => exit_with(&e),
    };

    server::serve(listener, router)
        .await
        .context("server terminated with an error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
