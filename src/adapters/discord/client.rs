use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::adapters::discord::payload::MessagePayload;
use crate::config::Credentials;
use crate::config::types::DiscordConfig;
use crate::domain::announcement::Announcement;
use crate::error::{MonitorError, Result};
use crate::ports::notifier::Notifier;

/// Delivers messages to a single Discord channel over the REST API.
pub struct DiscordNotifier {
    http: RwLock<Option<Client>>,
    api_base_url: String,
    channel_id: u64,
    /// Outcome of the last channel lookup; only used to log transitions.
    reachable: AtomicBool,
}

impl DiscordNotifier {
    pub fn new(config: &DiscordConfig, credentials: &Credentials) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bot {}", credentials.discord_token))
            .map_err(|e| MonitorError::Config(format!("invalid Discord token: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http: RwLock::new(Some(http)),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            channel_id: credentials.channel_id,
            reachable: AtomicBool::new(false),
        })
    }

    fn channel_url(&self) -> String {
        format!("{}/channels/{}", self.api_base_url, self.channel_id)
    }

    async fn client(&self) -> Result<Client> {
        self.http.read().await.clone().ok_or(MonitorError::Closed {
            resource: "Discord client",
        })
    }

    async fn post_message(&self, payload: &MessagePayload) -> Result<()> {
        let http = self.client().await?;
        let url = format!("{}/messages", self.channel_url());

        let response = http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| MonitorError::Notify {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if is_gone(status) {
            self.mark_unreachable();
            return Err(MonitorError::DestinationUnavailable {
                channel_id: self.channel_id,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::Notify {
                reason: format!("HTTP {status}: {body}"),
            });
        }
        Ok(())
    }

    fn mark_unreachable(&self) {
        if self.reachable.swap(false, Ordering::AcqRel) {
            warn!(
                channel_id = self.channel_id,
                "Destination channel is no longer available"
            );
        }
    }
}

fn is_gone(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
    )
}

#[async_trait]
impl Notifier for DiscordNotifier {
    /// Looks the channel up on every call so a deleted channel or revoked
    /// access is noticed before the next announcement.
    async fn resolve_destination(&self) -> Result<()> {
        let http = self.client().await?;
        let response = http
            .get(self.channel_url())
            .send()
            .await
            .map_err(|e| MonitorError::Notify {
                reason: e.to_string(),
            })?;

        match response.status() {
            s if s.is_success() => {
                if !self.reachable.swap(true, Ordering::AcqRel) {
                    info!(channel_id = self.channel_id, "Destination channel resolved");
                }
                Ok(())
            }
            s if is_gone(s) => {
                self.mark_unreachable();
                Err(MonitorError::DestinationUnavailable {
                    channel_id: self.channel_id,
                })
            }
            status => Err(MonitorError::Notify {
                reason: format!("channel lookup returned HTTP {status}"),
            }),
        }
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        self.post_message(&MessagePayload::text(text)).await
    }

    async fn announce(&self, announcement: &Announcement) -> Result<()> {
        self.post_message(&MessagePayload::from(announcement)).await
    }

    async fn close(&self) {
        if self.http.write().await.take().is_some() {
            debug!("Discord client closed");
        }
    }
}
