// src/service.rs
//
// Per-request orchestration: catalog -> resolve -> (price, chart) -> merge.
// Strict two-phase dependency: nothing is fetched for a coin until the
// query has resolved, and the two post-resolution calls run concurrently.
// Each request re-fetches the catalog; there is no cross-request cache or
// shared mutable state, so requests never need to synchronize.

use crate::aggregator::aggregate;
use crate::error::{FetchError, Result};
use crate::models::AggregatedResult;
use crate::provider::MarketDataProvider;
use crate::resolver::resolve;
use log::{info, warn};
use std::sync::Arc;

/// Day range used when the caller leaves `days` unset.
pub const DEFAULT_DAYS: u32 = 7;

/// The resolve-and-aggregate pipeline over some market-data provider.
///
/// Cheap to clone; one instance is shared across request handlers. All
/// outbound work happens inside `lookup`, so dropping the future (client
/// disconnect) abandons any outstanding upstream calls.
pub struct CryptoService<P> {
    provider: Arc<P>,
}

impl<P> Clone for CryptoService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

impl<P: MarketDataProvider> CryptoService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Resolve `query` and aggregate live stats with `days` of history.
    ///
    /// `days` is passed through to the upstream untouched; range
    /// validation belongs to the caller's input layer.
    pub async fn lookup(&self, query: &str, days: u32) -> Result<AggregatedResult> {
        let catalog = self.provider.coin_list().await?;

        let coin = match resolve(&catalog, query) {
            Some(coin) => coin,
            None => {
                info!("No catalog match for query '{}'", query);
                return Err(FetchError::CoinNotFound);
            }
        };
        info!(
            "Resolved '{}' -> {} ({}), fetching market data and {}-day history",
            query, coin.id, coin.symbol, days
        );

        // Independent once the id is known; fetch both at once.
        let (prices, chart) = tokio::join!(
            self.provider.simple_price(&coin.id),
            self.provider.market_chart(&coin.id, days),
        );

        let result = aggregate(coin, prices?, chart?);
        if let Err(e) = &result {
            warn!("Aggregation failed for query '{}': {}", query, e);
        }
        result
    }
}
