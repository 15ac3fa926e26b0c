use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, DNT, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::types::FetcherConfig;
use crate::error::{MonitorError, Result};
use crate::ports::page_fetcher::PageFetcher;

/// Fetches the studies page with a browser-like header set.
pub struct StudyPageClient {
    http: RwLock<Option<Client>>,
    url: String,
}

impl StudyPageClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let http = Client::builder()
            .default_headers(browser_headers(config)?)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http: RwLock::new(Some(http)),
            url: config.url.clone(),
        })
    }
}

fn browser_headers(config: &FetcherConfig) -> Result<HeaderMap> {
    let value = |name: &str, raw: &str| {
        HeaderValue::from_str(raw)
            .map_err(|e| MonitorError::Config(format!("invalid {name} header value: {e}")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, value("User-Agent", &config.user_agent)?);
    headers.insert(ACCEPT, value("Accept", &config.accept)?);
    headers.insert(ACCEPT_LANGUAGE, value("Accept-Language", &config.accept_language)?);
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    Ok(headers)
}

#[async_trait]
impl PageFetcher for StudyPageClient {
    async fn fetch(&self) -> Result<String> {
        // Clone the handle so close() never waits on an in-flight request.
        let http = self
            .http
            .read()
            .await
            .clone()
            .ok_or(MonitorError::Closed {
                resource: "study page client",
            })?;

        debug!(url = %self.url, "Fetching studies page");

        let response = http.get(&self.url).send().await.map_err(|e| {
            warn!(error = %e, "Studies page request failed");
            MonitorError::Network(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MonitorError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        response.text().await.map_err(MonitorError::Network)
    }

    async fn close(&self) {
        if self.http.write().await.take().is_some() {
            debug!("Study page client closed");
        }
    }
}
