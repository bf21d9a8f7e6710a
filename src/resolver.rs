// src/resolver.rs
//
// Maps a free-text user query onto exactly one catalog entry.
// Matching is exact equality after case-folding, never substring or
// fuzzy: "bitcoin", "BTC", and "Bitcoin" all resolve the same coin, but
// "bitco" resolves nothing. First match in catalog order wins.

use crate::models::{CatalogEntry, ResolvedCoin};

/// Resolve a query against the catalog by id, symbol, or name.
///
/// A linear scan is fine at current catalog sizes (~15k entries); if a
/// lookup map is ever built instead, the first-match tie-break on
/// duplicate symbols must be preserved.
pub fn resolve(catalog: &[CatalogEntry], query: &str) -> Option<ResolvedCoin> {
    let query = query.to_lowercase();

    catalog
        .iter()
        .find(|coin| {
            query == coin.id.to_lowercase()
                || query == coin.symbol.to_lowercase()
                || query == coin.name.to_lowercase()
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, symbol: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    fn sample_catalog() -> Vec<CatalogEntry> {
        vec![
            entry("bitcoin", "btc", "Bitcoin"),
            entry("ethereum", "eth", "Ethereum"),
            entry("bitcoin-cash", "bch", "Bitcoin Cash"),
        ]
    }

    #[test]
    fn test_resolve_by_id() {
        let coin = resolve(&sample_catalog(), "bitcoin").unwrap();
        assert_eq!(coin.id, "bitcoin");
    }

    #[test]
    fn test_resolve_by_symbol() {
        let coin = resolve(&sample_catalog(), "eth").unwrap();
        assert_eq!(coin.id, "ethereum");
    }

    #[test]
    fn test_resolve_by_name() {
        let coin = resolve(&sample_catalog(), "Bitcoin Cash").unwrap();
        assert_eq!(coin.id, "bitcoin-cash");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = sample_catalog();
        for query in ["BITCOIN", "Bitcoin", "BiTcOiN", "BTC"] {
            let coin = resolve(&catalog, query).unwrap();
            assert_eq!(coin.id, "bitcoin", "query {:?} should hit bitcoin", query);
        }
    }

    #[test]
    fn test_resolve_rejects_substrings() {
        let catalog = sample_catalog();
        assert!(resolve(&catalog, "bitco").is_none());
        assert!(resolve(&catalog, "itcoin").is_none());
        assert!(resolve(&catalog, "bitcoin c").is_none());
    }

    #[test]
    fn test_resolve_unknown_coin() {
        assert!(resolve(&sample_catalog(), "notarealcoin").is_none());
    }

    #[test]
    fn test_resolve_first_match_wins_on_duplicates() {
        // Duplicate symbols exist in the real catalog; iteration order
        // decides the winner.
        let catalog = vec![
            entry("wrapped-bitcoin", "btc", "Wrapped Bitcoin"),
            entry("bitcoin", "btc", "Bitcoin"),
        ];
        let coin = resolve(&catalog, "btc").unwrap();
        assert_eq!(coin.id, "wrapped-bitcoin");
    }

    #[test]
    fn test_resolve_empty_catalog() {
        assert!(resolve(&[], "bitcoin").is_none());
    }
}
