use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::error::Result;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Check that the destination channel can be reached.
    async fn resolve_destination(&self) -> Result<()>;

    async fn send_text(&self, text: &str) -> Result<()>;

    async fn announce(&self, announcement: &Announcement) -> Result<()>;

    async fn close(&self) {}
}
