#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance data provider.
//!
//! This crate provides a Yahoo Finance data provider that implements the
//! [`DataProvider`], [`FundamentalDataProvider`], and [`PriceDataProvider`]
//! traits from `screen-core`.
//!
//! # Features
//!
//! - Annual income statements and balance sheets via the quote summary API
//! - Snapshot ratios (debt-to-equity, return on equity) via the same call
//! - Daily OHLCV history using the chart API
//! - Built-in rate limiting (one request every 250ms by default)
//!
//! # Example
//!
//! ```no_run
//! use screen_yahoo::YahooProvider;
//! use screen_core::{FundamentalDataProvider, Symbol};
//!
//! # async fn example() -> screen_core::Result<()> {
//! let provider = YahooProvider::new();
//! let records = provider.fetch_records(&Symbol::new("INFY.NS")).await?;
//! println!("income statement present: {}", records.income.is_some());
//! # Ok(())
//! # }
//! ```

mod statements;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use polars::prelude::*;
use screen_core::{
    DataError, DataFrequency, DataProvider, FinancialRecords, FundamentalDataProvider,
    PriceDataProvider, Result, Symbol,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::debug;

use crate::statements::{QuoteSummaryResponse, SUMMARY_MODULES};

/// Yahoo Finance chart API base URL.
const CHART_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance quote summary API base URL.
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Default rate limit delay in milliseconds.
const DEFAULT_RATE_LIMIT_MS: u64 = 250;

/// Per-request network timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance data provider.
///
/// Implements [`DataProvider`], [`FundamentalDataProvider`], and [`PriceDataProvider`].
#[derive(Debug)]
pub struct YahooProvider {
    client: reqwest::Client,
    chart_url: String,
    summary_url: String,
    rate_limit_ms: u64,
    last_request_time: AtomicU64,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(DEFAULT_RATE_LIMIT_MS))
    }

    /// Create a new Yahoo Finance provider with a custom HTTP client.
    ///
    /// Uses the provided client for all HTTP requests. Rate limiting
    /// is still applied.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            chart_url: CHART_API_URL.to_string(),
            summary_url: QUOTE_SUMMARY_URL.to_string(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Create a new Yahoo Finance provider with custom rate limiting.
    #[must_use]
    pub fn with_rate_limit(rate_limit: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            rate_limit_ms: rate_limit.as_millis() as u64,
            ..Self::with_client(client)
        }
    }

    /// Points the provider at alternative chart and quote summary endpoints.
    #[must_use]
    pub fn with_base_urls(mut self, chart_url: &str, summary_url: &str) -> Self {
        self.chart_url = chart_url.trim_end_matches('/').to_string();
        self.summary_url = summary_url.trim_end_matches('/').to_string();
        self
    }

    /// Apply rate limiting before making a request.
    async fn apply_rate_limit(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last = self.last_request_time.load(Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);

        if elapsed < self.rate_limit_ms {
            let wait_time = self.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time)).await;
        }

        self.last_request_time.store(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            Ordering::Relaxed,
        );
    }

    /// Rate-limited GET that maps HTTP failures onto [`DataError`] and decodes JSON.
    async fn get_json<T: DeserializeOwned>(&self, symbol: &Symbol, url: &str) -> Result<T> {
        self.apply_rate_limit().await;
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                provider: "Yahoo Finance".to_string(),
                retry_after: Some(Duration::from_secs(60)),
            });
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }

        if !response.status().is_success() {
            return Err(DataError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))
    }

    /// Build the chart API URL for a symbol and date range.
    fn build_chart_url(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        frequency: DataFrequency,
    ) -> String {
        let start_ts = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or(0);

        let end_ts = end
            .and_hms_opt(23, 59, 59)
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or(0);

        let interval = match frequency {
            DataFrequency::Daily => "1d",
        };

        format!(
            "{}/{}?period1={}&period2={}&interval={}&includeAdjustedClose=true",
            self.chart_url,
            symbol.as_str(),
            start_ts,
            end_ts,
            interval
        )
    }

    /// Build the quote summary URL for a symbol.
    fn build_summary_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/{}?modules={}",
            self.summary_url,
            symbol.as_str(),
            SUMMARY_MODULES
        )
    }

    /// Parse Yahoo Finance chart response into a DataFrame.
    fn parse_chart_response(&self, symbol: &Symbol, response: ChartResponse) -> Result<DataFrame> {
        let result = response
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        let timestamps = result.timestamp.unwrap_or_default();

        if timestamps.is_empty() {
            return Err(DataError::DataNotAvailable {
                symbol: symbol.to_string(),
                start: "N/A".to_string(),
                end: "N/A".to_string(),
            });
        }

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::Parse("Missing quote data".to_string()))?;

        let adj_close = result
            .indicators
            .adjclose
            .and_then(|ac| ac.into_iter().next())
            .map(|ac| ac.adjclose)
            .unwrap_or_default();

        let epoch = DateTime::UNIX_EPOCH.date_naive();
        let dates: Vec<i32> = timestamps
            .iter()
            .map(|&ts| {
                DateTime::from_timestamp(ts, 0)
                    .map(|dt| dt.date_naive())
                    .unwrap_or(epoch)
            })
            .map(|d| (d - epoch).num_days() as i32)
            .collect();

        let symbols: Vec<&str> = vec![symbol.as_str(); dates.len()];
        let closes: Vec<Option<f64>> = quote.close;

        // Fall back to raw closes when adjusted closes are missing or misaligned
        let adj_closes: Vec<Option<f64>> = if adj_close.len() == dates.len() {
            adj_close
        } else {
            closes.clone()
        };

        let date_col = Column::new("date".into(), dates)
            .cast(&DataType::Date)
            .map_err(|e| DataError::Other(e.to_string()))?;

        let df = DataFrame::new(vec![
            Column::new("symbol".into(), symbols),
            date_col,
            Column::new("open".into(), quote.open),
            Column::new("high".into(), quote.high),
            Column::new("low".into(), quote.low),
            Column::new("close".into(), closes),
            Column::new("volume".into(), quote.volume),
            Column::new("adjusted_close".into(), adj_closes),
        ])
        .map_err(|e| DataError::Parse(e.to_string()))?;

        Ok(df)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn description(&self) -> &str {
        "Yahoo Finance data provider for annual statements, ratios and price history"
    }

    fn supported_frequencies(&self) -> &[DataFrequency] {
        &[DataFrequency::Daily]
    }
}

#[async_trait]
impl FundamentalDataProvider for YahooProvider {
    async fn fetch_records(&self, symbol: &Symbol) -> Result<FinancialRecords> {
        let url = self.build_summary_url(symbol);
        let response: QuoteSummaryResponse = self.get_json(symbol, &url).await?;

        if let Some(error) = response.quote_summary.error {
            if error.code == "Not Found" {
                return Err(DataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(DataError::Other(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        let data = response
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        Ok(data.into_records())
    }
}

#[async_trait]
impl PriceDataProvider for YahooProvider {
    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        frequency: DataFrequency,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::InvalidParameter(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        let url = self.build_chart_url(symbol, start, end, frequency);
        let chart_response: ChartResponse = self.get_json(symbol, &url).await?;

        // Check for API-level errors
        if let Some(error) = chart_response.chart.error {
            if error.code == "Not Found" {
                return Err(DataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(DataError::Other(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        self.parse_chart_response(symbol, chart_response)
    }
}

// ============================================================================
// Yahoo Finance Chart API Response Types
// ============================================================================

/// Chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use screen_core::LineItem;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> YahooProvider {
        YahooProvider::with_rate_limit(Duration::ZERO).with_base_urls(
            &format!("{}/chart", server.uri()),
            &format!("{}/summary", server.uri()),
        )
    }

    #[test]
    fn test_build_chart_url() {
        let provider = YahooProvider::new();
        let symbol = Symbol::new("RELIANCE.NS");
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let url = provider.build_chart_url(&symbol, start, end, DataFrequency::Daily);

        assert!(url.starts_with(CHART_API_URL));
        assert!(url.contains("RELIANCE.NS"));
        assert!(url.contains("interval=1d"));
        assert!(url.contains("includeAdjustedClose=true"));
    }

    #[test]
    fn test_build_summary_url() {
        let provider = YahooProvider::new();
        let url = provider.build_summary_url(&Symbol::new("tcs.ns"));
        assert_eq!(
            url,
            format!("{QUOTE_SUMMARY_URL}/TCS.NS?modules={SUMMARY_MODULES}")
        );
    }

    #[test]
    fn test_provider_info() {
        let provider = YahooProvider::default();

        assert_eq!(provider.name(), "Yahoo Finance");
        assert!(
            provider
                .supported_frequencies()
                .contains(&DataFrequency::Daily)
        );
    }

    #[test]
    fn test_parse_chart_response() {
        let provider = YahooProvider::new();
        let json = r#"{"chart": {"result": [{
            "timestamp": [1704153600, 1704240000, 1704326400],
            "indicators": {
                "quote": [{
                    "open": [10.0, 11.0, 12.0],
                    "high": [10.5, 11.5, 12.5],
                    "low": [9.5, 10.5, 11.5],
                    "close": [10.2, 11.2, null],
                    "volume": [1000, 2000, 3000]
                }],
                "adjclose": [{"adjclose": [10.1, 11.1, 12.1]}]
            }
        }], "error": null}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();

        let df = provider
            .parse_chart_response(&Symbol::new("ABC.NS"), response)
            .unwrap();

        assert_eq!(df.height(), 3);
        let adjusted = df
            .column("adjusted_close")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_eq!(adjusted.get(2), Some(12.1));
        let close = df
            .column("close")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_eq!(close.get(2), None);
    }

    #[test]
    fn test_parse_chart_response_without_timestamps() {
        let provider = YahooProvider::new();
        let json = r#"{"chart": {"result": [{
            "indicators": {"quote": [{"open": [], "high": [], "low": [], "close": [], "volume": []}]}
        }], "error": null}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();

        let err = provider
            .parse_chart_response(&Symbol::new("ABC.NS"), response)
            .unwrap_err();
        assert!(matches!(err, DataError::DataNotAvailable { .. }));
    }

    #[tokio::test]
    async fn test_fetch_records_from_quote_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary/INFY.NS"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(statements::tests::SAMPLE),
            )
            .mount(&server)
            .await;

        let records = provider_for(&server)
            .fetch_records(&Symbol::new("INFY.NS"))
            .await
            .unwrap();

        assert_eq!(records.info.unwrap().debt_to_equity, Some(45.0));
        assert_eq!(
            records.balance_sheet.unwrap().latest(LineItem::TotalAssets),
            Some(1000.0)
        );
    }

    #[tokio::test]
    async fn test_fetch_records_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary/NOPE.NS"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .fetch_records(&Symbol::new("NOPE.NS"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_records_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary/GONE.NS"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found", "description": "No fundamentals data found"}}}"#,
            ))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .fetch_records(&Symbol::new("GONE.NS"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_ohlcv_rejects_inverted_range() {
        let provider = YahooProvider::with_rate_limit(Duration::ZERO);
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = provider
            .fetch_ohlcv(&Symbol::new("ABC.NS"), start, end, DataFrequency::Daily)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidParameter(_)));
    }
}
