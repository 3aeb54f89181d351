use crate::parser::{ParseError, parse_profile_rooms, rooms_from_json};
use crate::types::Room;

use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: crate::BASE_URL.to_string(),
        })
    }

    /// Queries the completed-rooms API. A session cookie grants access to
    /// private profiles and is passed through verbatim.
    pub async fn fetch_completed_rooms(
        &self,
        username: &str,
        session_cookie: Option<&str>,
    ) -> Result<Vec<Room>, ScraperError> {
        let url = format!(
            "{}/api/all-completed-rooms?username={}&limit=200&page=1",
            self.base_url, username
        );
        log::info!("Fetching completed rooms for {}...", username);

        let mut request = self.client.get(&url);
        if let Some(cookie) = session_cookie {
            request = request.header(reqwest::header::COOKIE, format!("session={}", cookie));
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        let data = serde_json::from_str(&body).map_err(ParseError::JsonError)?;

        Ok(rooms_from_json(&data))
    }

    /// Scrapes the public profile page. Captures only what the page
    /// serializes server-side; private profiles come back empty.
    pub async fn fetch_profile_rooms(&self, username: &str) -> Result<Vec<Room>, ScraperError> {
        let url = format!("{}/p/{}", self.base_url, username);
        log::info!("Fetching profile page: {}", url);

        let html = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if html.trim().is_empty() {
            return Err(ScraperError::ParseError(ParseError::MissingField(format!(
                "Empty response for {}",
                url
            ))));
        }

        Ok(parse_profile_rooms(&html))
    }
}
