use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw studies page. Exactly one request, no retries.
    async fn fetch(&self) -> Result<String>;

    /// Release the underlying connection pool.
    async fn close(&self) {}
}
