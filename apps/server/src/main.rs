//! Expense Notifier - Webhook Server
//!
//! Receives bank statement webhooks, totals today's expenses and posts the
//! summary to a Telegram chat.

mod config;
mod gate;
mod routes;
mod state;
mod unfreeze;

#[cfg(test)]
mod testing;

use clap::Parser;
use config::AppConfig;
use state::AppState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Expense Notifier CLI
#[derive(Parser, Debug)]
#[command(name = "expense-notifier")]
#[command(about = "Daily expense summaries from bank webhooks", long_about = None)]
struct Args {
    /// HTTP port, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level: trace, debug, info, warn, error (RUST_LOG wins when set)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Filter directive for `--log-level`; unknown levels fall back to `info`.
fn log_directive(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// `RUST_LOG` takes precedence over `--log-level` when set.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Expense notifier starting...");
    info!("  Account: {}", config.account);
    info!("  Timezone: {}", config.timezone);
    info!("  Webhook URL: {}", config.webhook_url);

    let state = AppState::from_config(&config).await;

    if let Err(e) = routes::serve(state, config.port).await {
        error!("Failed to start HTTP server: {}", e);
        std::process::exit(1);
    }
}
