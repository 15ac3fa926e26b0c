use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::types::AnnouncementConfig;
use crate::poller::Poller;
use crate::ports::notifier::Notifier;
use crate::ports::page_fetcher::PageFetcher;

/// Top-level supervisor: startup banner, the poll task, and shutdown order.
pub struct Monitor {
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
    style: AnnouncementConfig,
    interval: Duration,
}

impl Monitor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        notifier: Arc<dyn Notifier>,
        style: AnnouncementConfig,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            style,
            interval,
        }
    }

    /// Try the online notice once. Returns whether it was delivered.
    pub async fn announce_online(&self) -> bool {
        if let Err(e) = self.notifier.resolve_destination().await {
            warn!(error = %e, "Destination not reachable at startup, deferring online notice");
            return false;
        }
        match self.notifier.send_text(&self.style.online_message).await {
            Ok(()) => {
                info!("Online notice sent");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to send online notice");
                false
            }
        }
    }

    /// Run until `shutdown` resolves, then stop the timer, close the page
    /// client, and close the destination client, in that order.
    ///
    /// An online notice that could not be delivered at startup is handed to
    /// the poller and sent after its first successful resolution.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        let delivered = self.announce_online().await;

        let mut poller = Poller::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.notifier),
            self.style.clone(),
            self.interval,
        );
        if !delivered {
            poller = poller.with_online_notice(self.style.online_message.clone());
        }
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut handle = tokio::spawn(poller.run(stop_rx));

        tokio::select! {
            () = shutdown => {
                info!("Shutdown signal received");
                // Ignored error: the poller already exited and dropped its receiver.
                let _ = stop_tx.send(true);
                match (&mut handle).await {
                    Ok(poller) => info!(announced = poller.announced().len(), "Poller drained"),
                    Err(e) => error!(error = %e, "Poller task failed during shutdown"),
                }
            }
            result = &mut handle => match result {
                Ok(_) => error!("Poller exited unexpectedly"),
                Err(e) => error!(error = %e, "Poller task panicked"),
            },
        }

        self.fetcher.close().await;
        self.notifier.close().await;
        info!("Shutdown complete");
    }
}
