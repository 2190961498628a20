use blockchain::{is_native_mint, ValidatedAddress, NATIVE_DISPLAY_NAME, NATIVE_MINT};
use futures::{stream, StreamExt, TryStreamExt};
use num_bigint::BigUint;
use shared::models::usd_value;
use shared::{Error, Result, TokenRecord};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::jupiter_client::{HoldingsResponse, TokenDataSource, TokenSearchResult};

/// Largest number of mints the search endpoint accepts per call.
pub const SEARCH_BATCH_SIZE: usize = 100;

/// Summed raw balances per mint, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceMap {
    order: Vec<String>,
    amounts: HashMap<String, BigUint>,
}

impl BalanceMap {
    /// Build the balance map from a holdings response.
    ///
    /// The native entry is always present, even at zero. Other mints are
    /// summed across their token accounts and dropped when the sum is zero.
    pub fn from_holdings(holdings: &HoldingsResponse) -> Result<Self> {
        let mut balances = BalanceMap::default();
        balances.accumulate(NATIVE_MINT, parse_amount(NATIVE_MINT, &holdings.amount)?);

        for (mint, accounts) in &holdings.tokens {
            let mut total = BigUint::default();
            for account in accounts {
                total += parse_amount(mint, &account.amount)?;
            }
            if total > BigUint::default() {
                balances.accumulate(mint, total);
            }
        }

        Ok(balances)
    }

    fn accumulate(&mut self, mint: &str, amount: BigUint) {
        match self.amounts.get_mut(mint) {
            Some(existing) => *existing += amount,
            None => {
                self.order.push(mint.to_string());
                self.amounts.insert(mint.to_string(), amount);
            }
        }
    }

    pub fn get(&self, mint: &str) -> Option<&BigUint> {
        self.amounts.get(mint)
    }

    /// Mints in insertion order.
    pub fn mints(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn parse_amount(mint: &str, raw: &str) -> Result<BigUint> {
    BigUint::from_str(raw).map_err(|e| {
        Error::UpstreamHoldings(format!("invalid amount {:?} for {}: {}", raw, mint, e))
    })
}

/// Merge one search result with its balance into an output record.
pub fn build_record(result: TokenSearchResult, balances: &BalanceMap) -> TokenRecord {
    let amount = balances.get(&result.id).cloned().unwrap_or_default();
    let usd_value = usd_value(&amount, result.decimals, result.usd_price);
    let name = if is_native_mint(&result.id) {
        NATIVE_DISPLAY_NAME.to_string()
    } else {
        result.name
    };

    TokenRecord {
        mint: result.id,
        amount,
        name,
        symbol: result.symbol,
        decimals: result.decimals,
        icon: result.icon,
        usd_price_unit: result.usd_price,
        usd_value,
        jupiter_is_verified: result.is_verified.unwrap_or(false),
        price_change_24h_percent: result.stats24h.and_then(|stats| stats.price_change),
    }
}

/// Aggregates a wallet's balances with token metadata.
pub struct HoldingsService {
    source: Arc<dyn TokenDataSource>,
    search_concurrency: usize,
}

impl HoldingsService {
    pub fn new(source: Arc<dyn TokenDataSource>, search_concurrency: usize) -> Self {
        Self {
            source,
            search_concurrency: search_concurrency.max(1),
        }
    }

    /// Fetch the wallet's holdings and enrich them with metadata.
    ///
    /// Output follows batch order, then upstream order within each batch.
    /// Any upstream failure fails the whole call.
    pub async fn get_tokens(
        &self,
        address: &ValidatedAddress,
        api_key: &str,
    ) -> Result<Vec<TokenRecord>> {
        let holdings = self.source.holdings(address.as_str(), api_key).await?;
        let balances = BalanceMap::from_holdings(&holdings)?;
        debug!("Collected {} balances for {}", balances.len(), address);

        let batches = self.search_batches(&balances, api_key).await?;

        let tokens: Vec<TokenRecord> = batches
            .into_iter()
            .flatten()
            .map(|result| build_record(result, &balances))
            .collect();

        info!("Resolved {} tokens for {}", tokens.len(), address);
        Ok(tokens)
    }

    async fn search_batches(
        &self,
        balances: &BalanceMap,
        api_key: &str,
    ) -> Result<Vec<Vec<TokenSearchResult>>> {
        let source = &self.source;
        let batches: Vec<Vec<String>> = balances
            .mints()
            .chunks(SEARCH_BATCH_SIZE)
            .map(<[String]>::to_vec)
            .collect();

        stream::iter(batches.into_iter().enumerate())
            .map(move |(index, batch)| async move {
                debug!("Searching batch {} ({} mints)", index, batch.len());
                source.search(&batch, api_key).await
            })
            .buffered(self.search_concurrency)
            .try_collect()
            .await
    }
}
