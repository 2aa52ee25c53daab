//! cofferd: multi-tenant encrypted object-store daemon
//!
//! Usage:
//!   cofferd [--config /etc/coffer/config.toml] [--listen 127.0.0.1:4000]
//!
//! The operator secret comes from the config file ([crypto].secret) or
//! the COFFER_SECRET environment variable; without one the daemon
//! refuses to start.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use secrecy::SecretString;
use std::path::PathBuf;
use tracing::{info, warn};

use coffer_auth::{AccessController, AccessPolicy};
use coffer_core::config::CofferConfig;

#[derive(Parser, Debug)]
#[command(name = "cofferd", version, about = "Coffer encrypted object-store daemon")]
struct Cli {
    /// Path to coffer.toml configuration file
    #[arg(
        long,
        short = 'c',
        env = "COFFER_CONFIG",
        default_value = "/etc/coffer/config.toml"
    )]
    config: PathBuf,

    /// Listen address override
    #[arg(long)]
    listen: Option<String>,

    /// Operator secret override
    #[arg(long, env = "COFFER_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "COFFER_LOG", default_value = "info")]
    log: String,

    /// Log format (json, text)
    #[arg(long, env = "COFFER_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log, &cli.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "cofferd starting"
    );

    let config = load_config(&cli.config).await?;

    let secret = cli
        .secret
        .map(SecretString::from)
        .or(config.crypto.secret)
        .ok_or_else(|| {
            anyhow::anyhow!("no operator secret: set [crypto].secret or COFFER_SECRET")
        })?;
    let key = coffer_crypto::derive_master_key(&secret);

    let store = coffer_store::ObjectStore::open(&config.storage.data_dir, key).await?;
    info!(data_dir = %config.storage.data_dir.display(), "object store opened");

    if config.access_keys.is_empty() {
        warn!("policy table is empty: every request will be denied");
    }
    info!(keys = config.access_keys.len(), "policy table loaded");
    let auth = AccessController::new(AccessPolicy::from_keys(config.access_keys));

    let listen = cli.listen.unwrap_or(config.server.listen);
    cofferd::server::serve(&listen, store, auth).await
}

async fn load_config(path: &PathBuf) -> Result<CofferConfig> {
    if path.exists() {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing config {}: {e}", path.display()))
    } else {
        warn!(
            "config file not found: {}  (using defaults)",
            path.display()
        );
        Ok(CofferConfig::default())
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}
