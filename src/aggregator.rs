// src/aggregator.rs
//
// Validates the two post-resolution payloads and merges them with the
// resolved coin into the final response shape. All-or-nothing: any
// missing piece fails the whole request, never a partial result.
//
// Check order matters. The throttle signal is checked before anything
// else so a rate-limited chart response is reported as RateLimited even
// when it also (necessarily) lacks a price series.

use crate::error::{FetchError, Result};
use crate::models::{
    AggregatedResult, MarketChartResponse, MarketSnapshot, ResolvedCoin, SimplePriceResponse,
};

/// Extract the three required numeric fields for `coin_id` from the raw
/// simple-price mapping.
fn extract_snapshot(prices: &SimplePriceResponse, coin_id: &str) -> Result<MarketSnapshot> {
    let entry = prices.get(coin_id).ok_or_else(|| {
        FetchError::IncompleteUpstreamData(format!("no market data entry for '{}'", coin_id))
    })?;

    let price_usd = entry.usd.ok_or_else(|| {
        FetchError::IncompleteUpstreamData(format!("missing usd price for '{}'", coin_id))
    })?;
    let percent_change_24h = entry.usd_24h_change.ok_or_else(|| {
        FetchError::IncompleteUpstreamData(format!("missing 24h change for '{}'", coin_id))
    })?;
    let volume_24h_usd = entry.usd_24h_vol.ok_or_else(|| {
        FetchError::IncompleteUpstreamData(format!("missing 24h volume for '{}'", coin_id))
    })?;

    Ok(MarketSnapshot {
        price_usd,
        percent_change_24h,
        volume_24h_usd,
    })
}

/// Merge resolved coin, market data, and history into one result.
///
/// The history series is copied through exactly as upstream delivered
/// it: no resampling, no unit conversion.
pub fn aggregate(
    coin: ResolvedCoin,
    prices: SimplePriceResponse,
    chart: MarketChartResponse,
) -> Result<AggregatedResult> {
    if chart.is_rate_limited() {
        return Err(FetchError::RateLimited);
    }

    let history = chart.prices.ok_or_else(|| {
        FetchError::IncompleteUpstreamData("market chart has no price series".to_string())
    })?;

    let snapshot = extract_snapshot(&prices, &coin.id)?;

    Ok(AggregatedResult {
        id: coin.id,
        symbol: coin.symbol,
        name: coin.name,
        price_usd: snapshot.price_usd,
        percent_change_24h: snapshot.percent_change_24h,
        volume_24h_usd: snapshot.volume_24h_usd,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricePoint, SimplePriceEntry, UpstreamStatus};
    use std::collections::HashMap;

    fn bitcoin() -> ResolvedCoin {
        ResolvedCoin {
            id: "bitcoin".to_string(),
            symbol: "btc".to_string(),
            name: "Bitcoin".to_string(),
        }
    }

    fn full_prices() -> SimplePriceResponse {
        let mut map = HashMap::new();
        map.insert(
            "bitcoin".to_string(),
            SimplePriceEntry {
                usd: Some(64000.0),
                usd_24h_change: Some(-1.25),
                usd_24h_vol: Some(31_000_000_000.0),
            },
        );
        map
    }

    fn good_chart() -> MarketChartResponse {
        MarketChartResponse {
            prices: Some(vec![
                PricePoint(1700000000000, 63500.0),
                PricePoint(1700003600000, 64000.0),
            ]),
            status: None,
        }
    }

    fn throttled_chart() -> MarketChartResponse {
        MarketChartResponse {
            prices: None,
            status: Some(UpstreamStatus {
                error_code: Some(429),
            }),
        }
    }

    #[test]
    fn test_aggregate_success() {
        let result = aggregate(bitcoin(), full_prices(), good_chart()).unwrap();
        assert_eq!(result.id, "bitcoin");
        assert_eq!(result.symbol, "btc");
        assert_eq!(result.name, "Bitcoin");
        assert_eq!(result.price_usd, 64000.0);
        assert_eq!(result.percent_change_24h, -1.25);
        assert_eq!(result.volume_24h_usd, 31_000_000_000.0);
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.history[0], PricePoint(1700000000000, 63500.0));
    }

    #[test]
    fn test_rate_limit_wins_over_missing_market_entry() {
        // Even with market data entirely absent, a throttled chart must
        // surface as RateLimited, not IncompleteUpstreamData.
        let err = aggregate(bitcoin(), HashMap::new(), throttled_chart()).unwrap_err();
        assert_eq!(err, FetchError::RateLimited);
    }

    #[test]
    fn test_rate_limit_wins_even_with_good_market_data() {
        let err = aggregate(bitcoin(), full_prices(), throttled_chart()).unwrap_err();
        assert_eq!(err, FetchError::RateLimited);
    }

    #[test]
    fn test_missing_price_series_is_incomplete() {
        let chart = MarketChartResponse {
            prices: None,
            status: None,
        };
        let err = aggregate(bitcoin(), full_prices(), chart).unwrap_err();
        assert!(matches!(err, FetchError::IncompleteUpstreamData(_)));
    }

    #[test]
    fn test_missing_market_entry_is_incomplete() {
        let err = aggregate(bitcoin(), HashMap::new(), good_chart()).unwrap_err();
        assert!(matches!(err, FetchError::IncompleteUpstreamData(_)));
    }

    #[test]
    fn test_missing_numeric_field_is_incomplete() {
        let mut prices = HashMap::new();
        prices.insert(
            "bitcoin".to_string(),
            SimplePriceEntry {
                usd: Some(64000.0),
                usd_24h_change: None,
                usd_24h_vol: Some(31_000_000_000.0),
            },
        );
        let err = aggregate(bitcoin(), prices, good_chart()).unwrap_err();
        assert!(matches!(err, FetchError::IncompleteUpstreamData(_)));
    }

    #[test]
    fn test_history_copied_through_unmodified() {
        let points = vec![
            PricePoint(3, 1.0),
            PricePoint(1, 2.0), // upstream order kept, even if odd
            PricePoint(2, 3.0),
        ];
        let chart = MarketChartResponse {
            prices: Some(points.clone()),
            status: None,
        };
        let result = aggregate(bitcoin(), full_prices(), chart).unwrap();
        assert_eq!(result.history, points);
    }

    #[test]
    fn test_result_id_matches_lookup_key() {
        let result = aggregate(bitcoin(), full_prices(), good_chart()).unwrap();
        assert_eq!(result.id, bitcoin().id);
    }
}
