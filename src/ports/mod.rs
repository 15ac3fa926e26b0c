pub mod notifier;
pub mod page_fetcher;
