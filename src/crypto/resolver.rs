//! Ticker to coin resolution.
//!
//! A ticker only ever resolves to a coin whose catalog symbol matches it
//! exactly (ignoring case). When several coins share the ticker, the one with
//! the best market-cap rank wins. Without a ranking there is no winner: the
//! resolver refuses to guess rather than fall back to catalog order or any
//! local similarity score.

use super::directory::CoinDirectory;
use super::ranking::RankingFetcher;
use crate::core::coin::{CoinRecord, ResolvedAsset, normalize_symbol};
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

type Rankings = Option<HashMap<String, u32>>;

pub struct SymbolResolver {
    directory: CoinDirectory,
    ranking: RankingFetcher,
}

impl SymbolResolver {
    pub fn new(directory: CoinDirectory, ranking: RankingFetcher) -> Self {
        Self { directory, ranking }
    }

    #[instrument(name = "ResolveSymbol", skip(self))]
    pub async fn resolve(&self, symbol: &str) -> Option<ResolvedAsset> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return None;
        }

        let records = self.directory.records().await;
        let rankings = OnceCell::new();
        self.resolve_against(&records, &symbol, &rankings).await
    }

    /// Resolves a batch of symbols against one directory snapshot. The
    /// ranking is fetched at most once, and only if some symbol collides.
    /// Unresolvable symbols are left out; duplicates collapse.
    pub async fn resolve_all<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<ResolvedAsset> {
        let mut wanted: Vec<String> = symbols
            .iter()
            .map(|s| normalize_symbol(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        wanted.sort();
        wanted.dedup();
        if wanted.is_empty() {
            return Vec::new();
        }

        let records = self.directory.records().await;
        let rankings = OnceCell::new();
        let mut resolved = Vec::with_capacity(wanted.len());
        for symbol in &wanted {
            if let Some(asset) = self.resolve_against(&records, symbol, &rankings).await {
                resolved.push(asset);
            }
        }
        resolved
    }

    /// `symbol` must already be normalized.
    async fn resolve_against(
        &self,
        records: &[CoinRecord],
        symbol: &str,
        rankings: &OnceCell<Rankings>,
    ) -> Option<ResolvedAsset> {
        if records.is_empty() {
            debug!(symbol, "Coin directory unavailable");
            return None;
        }

        let matches = exact_matches(records, symbol);
        let chosen = match matches.as_slice() {
            [] => {
                debug!(symbol, "No coin with this ticker");
                return None;
            }
            [only] => *only,
            _ => {
                debug!(
                    symbol,
                    candidates = matches.len(),
                    "Ticker collision, consulting market-cap ranking"
                );
                let ranks = rankings
                    .get_or_init(|| self.ranking.rankings())
                    .await
                    .as_ref();
                let Some(ranks) = ranks else {
                    debug!(symbol, "No ranking to break the tie");
                    return None;
                };
                pick_by_rank(&matches, ranks)?
            }
        };

        debug!(symbol, id = %chosen.id, "Resolved ticker");
        Some(ResolvedAsset {
            symbol: symbol.to_string(),
            id: chosen.id.clone(),
            name: chosen.name.clone(),
        })
    }
}

fn exact_matches<'a>(records: &'a [CoinRecord], symbol: &str) -> Vec<&'a CoinRecord> {
    records
        .iter()
        .filter(|record| record.symbol.trim().to_uppercase() == symbol)
        .collect()
}

/// Lowest rank wins; coins missing from the ranking sort after every ranked
/// coin.
fn pick_by_rank<'a>(
    matches: &[&'a CoinRecord],
    ranks: &HashMap<String, u32>,
) -> Option<&'a CoinRecord> {
    matches
        .iter()
        .copied()
        .min_by_key(|record| ranks.get(&record.id).copied().unwrap_or(u32::MAX))
}
