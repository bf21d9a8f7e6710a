// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Catalog Types
// =============================================================================

/// One coin from the provider's full catalog (`/coins/list`).
///
/// The `id` is the canonical identifier used for all follow-up calls
/// (simple-price, market-chart). Extra upstream fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical id (e.g., "bitcoin")
    pub id: String,
    /// Ticker symbol (e.g., "btc")
    pub symbol: String,
    /// Display name (e.g., "Bitcoin")
    pub name: String,
}

/// The catalog entry selected as the match for a user query.
///
/// Just a rename of `CatalogEntry` at the type level: carrying it under a
/// distinct name keeps "raw catalog row" and "the one row we resolved to"
/// from being mixed up in signatures.
pub type ResolvedCoin = CatalogEntry;

// =============================================================================
// Raw Upstream Payloads (JSON parsing only)
// =============================================================================

/// One entry of the simple-price response, keyed by coin id upstream.
///
/// All fields are optional on purpose: the fetcher deserializes without
/// validating shape, so that the aggregator can attribute a missing field
/// precisely instead of the decode step failing opaquely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimplePriceEntry {
    pub usd: Option<f64>,
    pub usd_24h_change: Option<f64>,
    pub usd_24h_vol: Option<f64>,
}

/// The full simple-price response: coin id -> price record.
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

/// A single (timestamp-ms, price-usd) point of the history series.
///
/// Serializes as a two-element array, matching the upstream wire shape
/// `[[ts, price], ...]` which is copied through to the client unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint(pub i64, pub f64);

/// Market-chart response, made explicit as a tagged shape instead of
/// ad-hoc key probing.
///
/// Exactly one of three situations holds and the aggregator checks them
/// in order:
/// - `status.error_code == 429`: the provider throttled us;
/// - `prices` present: a usable series;
/// - neither: malformed/incomplete payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Option<Vec<PricePoint>>,
    #[serde(default)]
    pub status: Option<UpstreamStatus>,
}

/// Structured "status" object the provider embeds on throttling.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamStatus {
    pub error_code: Option<i64>,
}

impl MarketChartResponse {
    /// True when the payload carries the provider's rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.error_code)
            .map(|code| code == 429)
            .unwrap_or(false)
    }
}

// =============================================================================
// Aggregated Output
// =============================================================================

/// Live market stats for one resolved coin, extracted from the
/// simple-price mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub price_usd: f64,
    pub percent_change_24h: f64,
    pub volume_24h_usd: f64,
}

/// The one externally visible success shape: identity, live stats, and
/// the history series, always fully populated or not returned at all.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    pub percent_change_24h: f64,
    pub volume_24h_usd: f64,
    pub history: Vec<PricePoint>,
}
