use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use prolific_monitor::adapters::discord::client::DiscordNotifier;
use prolific_monitor::adapters::scraper::client::StudyPageClient;
use prolific_monitor::config::{Credentials, load_config};
use prolific_monitor::monitor::Monitor;

const CONFIG_PATH_VAR: &str = "MONITOR_CONFIG";

fn find_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return PathBuf::from(path);
    }

    let candidates = [
        PathBuf::from("config.yaml"),
        binary_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting prolific-monitor");

    let config = load_config(&find_config_path())?;
    let credentials = Credentials::from_env()?;
    tracing::info!(channel_id = credentials.channel_id, "Configuration loaded");

    let fetcher = Arc::new(StudyPageClient::new(&config.fetcher)?);
    let notifier = Arc::new(DiscordNotifier::new(&config.discord, &credentials)?);

    let monitor = Monitor::new(
        fetcher,
        notifier,
        config.announcement,
        config.poller.interval(),
    );
    monitor.run(shutdown_signal()).await;

    Ok(())
}
