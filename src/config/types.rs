use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub announcement: AnnouncementConfig,
}

/// Settings for the study page client. The header values mimic a desktop
/// browser; the studies page degrades for anything that looks like a bot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    #[serde(default = "default_studies_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept")]
    pub accept: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url: default_studies_url(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollerConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscordConfig {
    #[serde(default = "default_discord_api")]
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_discord_api(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// How a new study is rendered for the channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnouncementConfig {
    #[serde(default = "default_lead")]
    pub lead: String,
    #[serde(default = "default_true")]
    pub mention_everyone: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_studies_url")]
    pub link: String,
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default = "default_footer")]
    pub footer: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_online_message")]
    pub online_message: String,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            lead: default_lead(),
            mention_everyone: true,
            title: default_title(),
            link: default_studies_url(),
            color: default_color(),
            footer: default_footer(),
            currency_symbol: default_currency_symbol(),
            online_message: default_online_message(),
        }
    }
}

fn default_studies_url() -> String {
    "https://app.prolific.co/studies".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".into()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".into()
}

fn default_timeout() -> u64 {
    10
}

fn default_interval() -> u64 {
    60
}

fn default_discord_api() -> String {
    "https://discord.com/api/v10".into()
}

fn default_true() -> bool {
    true
}

fn default_lead() -> String {
    "New study available!".into()
}

fn default_title() -> String {
    "💰 New Prolific Study! 📚".into()
}

fn default_color() -> u32 {
    0x00ff00
}

fn default_footer() -> String {
    "Click the title to go to Prolific".into()
}

fn default_currency_symbol() -> String {
    "£".into()
}

fn default_online_message() -> String {
    "🟢 Prolific Study Monitor is now online!".into()
}
