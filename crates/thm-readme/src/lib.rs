mod parser;
pub mod render;
pub mod scraper;
pub mod types;

pub use scraper::{ScraperError, WebScraper};

pub(crate) const BASE_URL: &str = "https://tryhackme.com";
