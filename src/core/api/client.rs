//! Character collection HTTP client.
//!
//! Walks the API's cursor-based pagination (`results` + `next`) one page at
//! a time and accumulates every record in API order.

use std::time::Duration;

use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::ApiConfig;
use crate::core::characters::CharacterRecord;

use super::error::{NetworkError, Result};
use super::page::Page;

/// Canonical collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://thesimpsonsapi.com/api/characters";

/// Default upper bound on pages followed in one fetch.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Client for the character collection endpoint.
#[derive(Debug, Clone)]
pub struct CharacterClient {
    endpoint: String,
    /// `0` disables the bound.
    max_pages: u32,
    http_client: reqwest::Client,
}

impl CharacterClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Self {
        let http_client = match config.request_timeout_secs {
            Some(secs) => reqwest::Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()
                .unwrap_or_else(|e| {
                    log::warn!("Failed to build HTTP client with timeout: {e} — using defaults");
                    reqwest::Client::new()
                }),
            None => reqwest::Client::new(),
        };

        Self {
            endpoint: config.endpoint.clone(),
            max_pages: config.max_pages,
            http_client,
        }
    }

    /// Override the page bound (`0` = unlimited).
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Get the collection endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Shared HTTP client (connection pool reused for portrait downloads).
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Fetch every character by following `next` links until none remains.
    ///
    /// Pages are requested strictly one after another. Any failure discards
    /// the pages already collected; callers never see a partial list.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_all_characters(&self) -> Result<Vec<CharacterRecord>> {
        let mut cursor = Some(parse_url(&self.endpoint)?);
        let mut characters = Vec::new();
        let mut pages: u32 = 0;

        while let Some(url) = cursor {
            if self.max_pages != 0 && pages >= self.max_pages {
                log::warn!("Stopping pagination at {url}: page limit {} reached", self.max_pages);
                return Err(NetworkError::PageLimit { limit: self.max_pages });
            }

            let page = self.fetch_page(&url).await?;
            pages += 1;
            log::debug!(
                "Fetched page {pages} from {url} ({} characters)",
                page.results.len()
            );

            characters.extend(page.results);

            cursor = match page.next {
                Some(next) => Some(url.join(&next).map_err(|source| NetworkError::InvalidUrl {
                    url: next.clone(),
                    source,
                })?),
                None => None,
            };
        }

        log::info!("Fetched {} characters across {pages} pages", characters.len());
        Ok(characters)
    }

    /// Fetch and decode a single page.
    pub async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| NetworkError::Transport {
            url: url.to_string(),
            source,
        })?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|source| NetworkError::Decode {
            url: url.to_string(),
            source,
        })?;

        Ok(Page::from_value(body))
    }
}

impl Default for CharacterClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| NetworkError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
