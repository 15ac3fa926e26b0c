use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::error::{MonitorError, Result};
use crate::ports::notifier::Notifier;
use crate::ports::page_fetcher::PageFetcher;

type FetchFn = Box<dyn Fn(usize) -> Result<String> + Send + Sync>;
type ResolveFn = Box<dyn Fn() -> Result<()> + Send + Sync>;
type TextFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type AnnounceFn = Box<dyn Fn(&Announcement) -> Result<()> + Send + Sync>;

/// Shared, ordered record of what the mocks saw.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct MockFetcher {
    fetch_fn: Mutex<FetchFn>,
    calls: AtomicUsize,
    delay: Duration,
    closed: AtomicBool,
    log: EventLog,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            fetch_fn: Mutex::new(Box::new(|_| Ok(study_page(&[])))),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            closed: AtomicBool::new(false),
            log: event_log(),
        }
    }

    /// The closure receives the zero-based call number.
    #[must_use]
    pub fn with_fetch(self, f: impl Fn(usize) -> Result<String> + Send + Sync + 'static) -> Self {
        *self.fetch_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_pages(self, pages: Vec<String>) -> Self {
        self.with_fetch(move |call| {
            Ok(pages
                .get(call)
                .or_else(|| pages.last())
                .cloned()
                .unwrap_or_default())
        })
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("fetch-start {call}"));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let result = (self.fetch_fn.lock().unwrap())(call);
        self.log.lock().unwrap().push(format!("fetch-end {call}"));
        result
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.log.lock().unwrap().push("fetcher-closed".into());
    }
}

pub struct MockNotifier {
    resolve_fn: Mutex<ResolveFn>,
    text_fn: Mutex<TextFn>,
    announce_fn: Mutex<AnnounceFn>,
    texts: Mutex<Vec<String>>,
    announcements: Mutex<Vec<Announcement>>,
    closed: AtomicBool,
    log: EventLog,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            resolve_fn: Mutex::new(Box::new(|| Ok(()))),
            text_fn: Mutex::new(Box::new(|_| Ok(()))),
            announce_fn: Mutex::new(Box::new(|_| Ok(()))),
            texts: Mutex::new(Vec::new()),
            announcements: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            log: event_log(),
        }
    }

    #[must_use]
    pub fn with_resolve(self, f: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        *self.resolve_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_text(self, f: impl Fn(&str) -> Result<()> + Send + Sync + 'static) -> Self {
        *self.text_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_announce(
        self,
        f: impl Fn(&Announcement) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        *self.announce_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn unavailable(self) -> Self {
        self.with_resolve(|| Err(MonitorError::DestinationUnavailable { channel_id: 1 }))
    }

    #[must_use]
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    /// Texts attempted, including ones whose delivery failed.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    /// Announcements attempted, including ones whose delivery failed.
    pub fn announcements(&self) -> Vec<Announcement> {
        self.announcements.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn resolve_destination(&self) -> Result<()> {
        (self.resolve_fn.lock().unwrap())()
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        self.texts.lock().unwrap().push(text.to_string());
        self.log.lock().unwrap().push(format!("text {text}"));
        (self.text_fn.lock().unwrap())(text)
    }

    async fn announce(&self, announcement: &Announcement) -> Result<()> {
        self.announcements.lock().unwrap().push(announcement.clone());
        self.log.lock().unwrap().push("announce".into());
        (self.announce_fn.lock().unwrap())(announcement)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.log.lock().unwrap().push("notifier-closed".into());
    }
}

/// A studies page with one complete card per `(id, reward)` pair.
pub fn study_page(studies: &[(&str, &str)]) -> String {
    let cards: String = studies
        .iter()
        .map(|(id, reward)| {
            format!(
                concat!(
                    r#"<div data-study-id="{}"><span class="study-reward">{}</span>"#,
                    r#"<span class="places-left">10</span>"#,
                    r#"<span class="study-duration">15</span></div>"#,
                ),
                id, reward
            )
        })
        .collect();
    format!("<html><body>{cards}</body></html>")
}
