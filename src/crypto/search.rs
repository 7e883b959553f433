use crate::core::coin::{CoinMarketApi, SearchHit};
use anyhow::Result;
use tracing::debug;

/// Shortest query worth sending upstream.
pub const MIN_QUERY_LEN: usize = 2;

/// Runs an interactive coin search.
///
/// The upstream relevance order is the contract here: hits are truncated to
/// `limit` but never re-ranked or filtered locally.
pub async fn search_coins(
    api: &dyn CoinMarketApi,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchHit>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        debug!(query, "Search query too short");
        return Ok(Vec::new());
    }

    let mut hits = api.search(query).await?;
    hits.truncate(limit);
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_support::MockApi;

    fn hit(id: &str, symbol: &str) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_short_queries_do_not_reach_upstream() {
        let api = MockApi::new().with_hits(vec![hit("bitcoin", "BTC")]);

        assert!(search_coins(&api, "b", 20).await.unwrap().is_empty());
        assert!(search_coins(&api, "  ", 20).await.unwrap().is_empty());
        assert_eq!(api.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_order_is_kept_and_truncated() {
        let api = MockApi::new().with_hits(vec![
            hit("zeta", "ZET"),
            hit("alpha", "ALP"),
            hit("mid", "MID"),
        ]);

        let hits = search_coins(&api, "coin", 2).await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(api.search_calls(), 1);
    }
}
