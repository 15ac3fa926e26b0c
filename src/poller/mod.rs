use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::adapters::scraper::study_parser;
use crate::config::types::AnnouncementConfig;
use crate::domain::announcement::Announcement;
use crate::domain::dedup::{AnnouncedSet, Reconciliation, reconcile};
use crate::ports::notifier::Notifier;
use crate::ports::page_fetcher::PageFetcher;

/// What a single poll cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The destination could not be resolved; nothing was fetched.
    Skipped,
    FetchFailed,
    ParseFailed,
    Completed(CycleReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub seen: usize,
    pub new: usize,
    pub delivered: usize,
    pub failed: usize,
    pub pruned: usize,
}

/// Owns the announced set and drives fetch → extract → reconcile → notify.
pub struct Poller {
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
    style: AnnouncementConfig,
    interval: Duration,
    announced: AnnouncedSet,
    /// Online notice still owed to the channel, sent after the next
    /// successful resolution.
    pending_notice: Option<String>,
}

impl Poller {
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
            announced: AnnouncedSet::new(),
            pending_notice: None,
        }
    }

    /// Queue an online notice to send once the destination resolves.
    #[must_use]
    pub fn with_online_notice(mut self, notice: String) -> Self {
        self.pending_notice = Some(notice);
        self
    }

    pub fn has_pending_notice(&self) -> bool {
        self.pending_notice.is_some()
    }

    pub fn announced(&self) -> &AnnouncedSet {
        &self.announced
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one full cycle. Failures before reconciliation leave the
    /// announced set untouched.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        if let Err(e) = self.notifier.resolve_destination().await {
            debug!(error = %e, "Destination not resolvable, skipping cycle");
            return CycleOutcome::Skipped;
        }
        self.send_pending_notice().await;

        let body = match self.fetcher.fetch().await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to fetch studies page");
                return CycleOutcome::FetchFailed;
            }
        };

        let current = match study_parser::parse_studies(&body) {
            Ok(studies) => studies,
            Err(e) => {
                error!(error = %e, "Failed to extract studies");
                return CycleOutcome::ParseFailed;
            }
        };

        let reconciliation = reconcile(&current, &self.announced);
        let mut report = CycleReport {
            seen: current.len(),
            new: reconciliation.new_ids.len(),
            pruned: reconciliation.pruned(&self.announced).count(),
            ..Default::default()
        };

        for id in &reconciliation.new_ids {
            let Some(study) = current.get(id) else {
                continue;
            };
            let announcement = Announcement::for_study(study, &self.style, Utc::now());
            match self.notifier.announce(&announcement).await {
                Ok(()) => {
                    report.delivered += 1;
                    info!(study_id = %id, reward = %study.reward, "Announced new study");
                }
                Err(e) => {
                    // Still counted as announced below; delivery is best effort.
                    report.failed += 1;
                    warn!(study_id = %id, error = %e, "Failed to announce study");
                }
            }
        }

        let Reconciliation { announced, .. } = reconciliation;
        self.announced = announced;

        info!(
            seen = report.seen,
            new = report.new,
            delivered = report.delivered,
            failed = report.failed,
            pruned = report.pruned,
            "Poll cycle complete"
        );
        CycleOutcome::Completed(report)
    }

    async fn send_pending_notice(&mut self) {
        let Some(notice) = self.pending_notice.as_deref() else {
            return;
        };
        match self.notifier.send_text(notice).await {
            Ok(()) => {
                info!("Online notice sent");
                self.pending_notice = None;
            }
            Err(e) => warn!(error = %e, "Failed to send online notice, will retry next cycle"),
        }
    }

    /// Tick until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// Cycles run inline, so a slow cycle delays the next tick instead of
    /// overlapping it. A cycle in progress finishes before shutdown is seen.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Self {
        info!(interval = ?self.interval, "Poller started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }

        info!("Poller stopped");
        self
    }
}
