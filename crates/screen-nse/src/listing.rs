//! The NSE equity listing (`EQUITY_L.csv`).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use screen_core::{DataError, Result, Symbol, UniverseProvider};
use tracing::{debug, info};

use crate::table::{count_rows, symbols_from_table};

/// Full list of equities traded on NSE.
pub const EQUITY_LISTING_URL: &str = "https://archives.nseindia.com/content/equities/EQUITY_L.csv";

/// NSE rejects requests that do not look like they come from a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const NSE_REFERER: &str = "https://www.nseindia.com/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote NSE equity listing.
#[derive(Clone)]
pub struct NseEquityListing {
    client: reqwest::Client,
    url: String,
}

impl fmt::Debug for NseEquityListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NseEquityListing")
            .field("url", &self.url)
            .finish()
    }
}

impl NseEquityListing {
    /// Listing at the official NSE archive URL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(EQUITY_LISTING_URL)
    }

    /// Listing at a custom URL (mirrors, tests).
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(NSE_REFERER));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
        }
    }

    /// Downloads the listing as text.
    async fn fetch_table(&self) -> Result<String> {
        debug!("Fetching NSE listing: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DataError::source_unavailable(&self.url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(DataError::source_unavailable(
                &self.url,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| DataError::source_unavailable(&self.url, e.to_string()))
    }

    /// Number of securities currently listed.
    pub async fn count(&self) -> Result<usize> {
        let table = self.fetch_table().await?;
        count_rows(table.as_bytes(), &self.url)
    }
}

impl Default for NseEquityListing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UniverseProvider for NseEquityListing {
    fn source_name(&self) -> &str {
        &self.url
    }

    async fn universe(&self) -> Result<Vec<Symbol>> {
        let table = self.fetch_table().await?;
        let symbols = symbols_from_table(table.as_bytes(), &self.url)?;
        info!(count = symbols.len(), "Fetched NSE equity listing");
        Ok(symbols)
    }
}
