use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "house-price-web")]
#[command(about = "Web form front-end for a pre-trained house price regression model")]
pub struct ServerArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to the exported model artifact (JSON)
    #[arg(short, long, env = "MODEL_PATH")]
    pub model_path: Option<String>,

    /// Debug mode: debug-level logs and a model summary at startup
    #[arg(long)]
    pub debug: bool,

    /// Log output format: compact or json
    #[arg(long)]
    pub log_format: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
