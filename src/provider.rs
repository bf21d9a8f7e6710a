// src/provider.rs
//
// CoinGecko REST adapter. One outbound attempt per call, no retry:
// transient failures surface immediately as UpstreamUnavailable and the
// caller decides what to do. Shape validation of the price/chart bodies
// is deliberately NOT done here (the aggregator owns it, so failures can
// be attributed precisely); only the catalog decode is checked because
// "not a list of coins" is unrecoverable before resolution even starts.

use crate::error::{FetchError, Result};
use crate::models::{CatalogEntry, MarketChartResponse, SimplePriceResponse};
use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Per-call timeout. The upstream default would be "wait forever"; a
/// bounded wait keeps a slow provider from pinning request handlers.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The three outbound operations the pipeline needs from a market-data
/// provider. Implementations should be Send + Sync so one instance can be
/// shared across request handlers.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the full coin catalog.
    async fn coin_list(&self) -> Result<Vec<CatalogEntry>>;

    /// Fetch current price, 24h change, and 24h volume (USD) for one coin.
    /// Returns the raw mapping keyed by coin id, unvalidated.
    async fn simple_price(&self, coin_id: &str) -> Result<SimplePriceResponse>;

    /// Fetch the historical market chart (USD) over the given day range.
    /// Returns the raw payload, which may carry the throttle signal.
    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<MarketChartResponse>;
}

/// CoinGecko client over a pooled reqwest transport with an explicit
/// per-call timeout.
pub struct CoinGeckoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Create a client against the public CoinGecko API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (tests point this at a
    /// stub server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-call timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn coin_list(&self) -> Result<Vec<CatalogEntry>> {
        let url = format!("{}/coins/list", self.base_url);
        debug!("Fetching coin catalog from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::UpstreamUnavailable(format!("coin list request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Coin list returned {}: {}", status, body);
            return Err(FetchError::UpstreamUnavailable(format!(
                "coin list returned {}",
                status
            )));
        }

        let catalog: Vec<CatalogEntry> = response.json().await.map_err(|e| {
            FetchError::UpstreamMalformed(format!("coin list is not a coin sequence: {}", e))
        })?;

        debug!("Catalog fetched: {} coins", catalog.len());
        Ok(catalog)
    }

    async fn simple_price(&self, coin_id: &str) -> Result<SimplePriceResponse> {
        let url = format!("{}/simple/price", self.base_url);
        debug!("Fetching simple price for '{}'", coin_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("ids", coin_id),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
                ("include_24hr_vol", "true"),
            ])
            .send()
            .await
            .map_err(|e| {
                FetchError::UpstreamUnavailable(format!("simple price request: {}", e))
            })?;

        // No shape validation here: an empty or partial mapping decodes
        // fine and the aggregator reports exactly which field is missing.
        response.json().await.map_err(|e| {
            FetchError::UpstreamUnavailable(format!("simple price body unreadable: {}", e))
        })
    }

    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<MarketChartResponse> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        debug!("Fetching {}-day market chart for '{}'", days, coin_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("vs_currency", "usd".to_string()), ("days", days.to_string())])
            .send()
            .await
            .map_err(|e| {
                FetchError::UpstreamUnavailable(format!("market chart request: {}", e))
            })?;

        // The throttle signal rides in the body (a "status" object with
        // error_code 429), typically alongside a non-2xx status line, so
        // the body is parsed regardless of status.
        response.json().await.map_err(|e| {
            FetchError::UpstreamUnavailable(format!("market chart body unreadable: {}", e))
        })
    }
}
