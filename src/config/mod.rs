pub mod types;

use std::path::Path;

use url::Url;

use crate::error::{MonitorError, Result};
use types::Config;

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const CHANNEL_VAR: &str = "CHANNEL_ID";

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        MonitorError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    // An empty file deserializes to null rather than an empty mapping.
    let config: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yml::from_str(&content)?
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.poller.interval_secs == 0 {
        return Err(MonitorError::Config(
            "poller.interval_secs must be at least 1".into(),
        ));
    }
    if config.fetcher.request_timeout_secs == 0 || config.discord.request_timeout_secs == 0 {
        return Err(MonitorError::Config(
            "request timeouts must be at least 1 second".into(),
        ));
    }
    Url::parse(&config.fetcher.url)?;
    Url::parse(&config.discord.api_base_url)?;
    Url::parse(&config.announcement.link)?;
    Ok(())
}

/// Secrets for the chat destination, sourced from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub discord_token: String,
    pub channel_id: u64,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MonitorError::Config(format!("{TOKEN_VAR} is not set")))?;

        let raw_channel = lookup(CHANNEL_VAR)
            .ok_or_else(|| MonitorError::Config(format!("{CHANNEL_VAR} is not set")))?;
        let channel_id = raw_channel.trim().parse::<u64>().map_err(|e| {
            MonitorError::Config(format!("{CHANNEL_VAR} must be an integer ({raw_channel:?}): {e}"))
        })?;

        Ok(Self {
            discord_token,
            channel_id,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("discord_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}
