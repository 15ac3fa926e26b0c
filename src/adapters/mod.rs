pub mod discord;
pub mod scraper;
