use crate::core::coin::{CoinMarketApi, CoinRecord, RankingEntry, SearchHit};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, instrument};

#[derive(Deserialize, Debug)]
struct MarketItem {
    id: String,
    market_cap_rank: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Deserialize, Debug)]
struct SearchCoin {
    id: String,
    name: String,
    symbol: Option<String>,
    api_symbol: Option<String>,
}

impl From<SearchCoin> for SearchHit {
    fn from(coin: SearchCoin) -> Self {
        let symbol = coin
            .symbol
            .filter(|s| !s.is_empty())
            .or(coin.api_symbol)
            .unwrap_or_default()
            .to_uppercase();
        SearchHit {
            id: coin.id,
            symbol,
            name: coin.name,
        }
    }
}

/// CoinGecko public API client (no key required).
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vaultkeep/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .with_context(|| format!("Invalid CoinGecko URL: {}{}", self.base_url, endpoint))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!("Requesting {} from {}", what, url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {} URL: {}", e, what, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error: {} for {}", status, what));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {what}"))?;
        serde_json::from_str(&body).with_context(|| format!("Failed to parse JSON response for {what}"))
    }
}

#[async_trait]
impl CoinMarketApi for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoCoinList", skip(self))]
    async fn coin_list(&self) -> Result<Vec<CoinRecord>> {
        let url = self.url("/coins/list", &[])?;
        self.get_json(url, "coin list").await
    }

    #[instrument(name = "CoinGeckoMarkets", skip(self))]
    async fn market_ranks(&self, vs_currency: &str, per_page: u32) -> Result<Vec<RankingEntry>> {
        let per_page = per_page.to_string();
        let url = self.url(
            "/coins/markets",
            &[
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
            ],
        )?;
        let items: Vec<MarketItem> = self.get_json(url, "market ranking").await?;
        Ok(items
            .into_iter()
            .map(|item| RankingEntry {
                id: item.id,
                rank: item.market_cap_rank,
            })
            .collect())
    }

    #[instrument(name = "CoinGeckoSimplePrice", skip(self), fields(ids = ids.len()))]
    async fn simple_price(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<HashMap<String, f64>> {
        let joined = ids.join(",");
        let url = self.url(
            "/simple/price",
            &[("ids", joined.as_str()), ("vs_currencies", vs_currency)],
        )?;
        let quotes: HashMap<String, HashMap<String, Option<f64>>> =
            self.get_json(url, "simple price").await?;

        Ok(quotes
            .into_iter()
            .filter_map(|(id, by_currency)| {
                by_currency
                    .get(vs_currency)
                    .copied()
                    .flatten()
                    .map(|price| (id, price))
            })
            .collect())
    }

    #[instrument(name = "CoinGeckoSearch", skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = self.url("/search", &[("query", query)])?;
        let response: SearchResponse = self.get_json(url, "coin search").await?;
        Ok(response.coins.into_iter().map(SearchHit::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(endpoint: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_coin_list() {
        let mock_response = r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
            {"id": "ethereum", "symbol": "eth", "name": "Ethereum"}
        ]"#;
        let mock_server = create_mock_server("/coins/list", 200, mock_response).await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        let coins = provider.coin_list().await.unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(
            coins[0],
            CoinRecord {
                id: "bitcoin".to_string(),
                symbol: "btc".to_string(),
                name: "Bitcoin".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_coin_list_non_array_is_an_error() {
        let mock_server =
            create_mock_server("/coins/list", 200, r#"{"status": {"error_code": 429}}"#).await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        let result = provider.coin_list().await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for coin list")
        );
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let mock_server = create_mock_server("/coins/list", 429, "Too Many Requests").await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        let result = provider.coin_list().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 429 Too Many Requests for coin list"
        );
    }

    #[tokio::test]
    async fn test_market_ranks_sends_snapshot_parameters() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("vs_currency", "eur"))
            .and(query_param("order", "market_cap_desc"))
            .and(query_param("per_page", "250"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"id": "bitcoin", "market_cap_rank": 1, "current_price": 50000},
                    {"id": "fresh-listing", "market_cap_rank": null}
                ]"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        let ranks = provider.market_ranks("eur", 250).await.unwrap();
        assert_eq!(
            ranks,
            vec![
                RankingEntry {
                    id: "bitcoin".to_string(),
                    rank: Some(1),
                },
                RankingEntry {
                    id: "fresh-listing".to_string(),
                    rank: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_simple_price_flattens_target_currency() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin,ethereum,no-quote"))
            .and(query_param("vs_currencies", "eur"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "bitcoin": {"eur": 50000},
                    "ethereum": {"eur": 3000.5},
                    "no-quote": {"eur": null},
                    "other-currency": {"usd": 1.0}
                }"#,
            ))
            .mount(&mock_server)
            .await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        let ids = vec![
            "bitcoin".to_string(),
            "ethereum".to_string(),
            "no-quote".to_string(),
        ];
        let prices = provider.simple_price(&ids, "eur").await.unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.get("bitcoin"), Some(&50000.0));
        assert_eq!(prices.get("ethereum"), Some(&3000.5));
    }

    #[tokio::test]
    async fn test_search_reshapes_hits_in_upstream_order() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "pepe coin"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "coins": [
                        {"id": "pepe", "name": "Pepe", "symbol": "pepe", "api_symbol": "pepe"},
                        {"id": "pepecoin", "name": "PepeCoin", "symbol": "", "api_symbol": "pepecoin"},
                        {"id": "nameless", "name": "Nameless"}
                    ],
                    "exchanges": []
                }"#,
            ))
            .mount(&mock_server)
            .await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        let hits = provider.search("pepe coin").await.unwrap();
        let symbols: Vec<&str> = hits.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["PEPE", "PEPECOIN", ""]);
        assert_eq!(hits[1].id, "pepecoin");
    }

    #[tokio::test]
    async fn test_search_without_coins_field() {
        let mock_server = create_mock_server("/search", 200, "{}").await;

        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();
        assert!(provider.search("nothing").await.unwrap().is_empty());
    }
}
