// In-memory token source shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use holdings_api::{
    HoldingsResponse, TokenAccountBalance, TokenDataSource, TokenSearchResult, TokenStats,
};
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_WALLET: &str = "11111111111111111111111111111111";

#[derive(Default)]
pub struct FakeSource {
    pub holdings: HoldingsResponse,
    /// Status text returned instead of holdings.
    pub holdings_error: Option<String>,
    pub metadata: HashMap<String, TokenSearchResult>,
    /// Any batch containing this mint fails.
    pub failing_mint: Option<String>,
    /// Return each batch's results in reverse request order.
    pub reverse_results: bool,
    /// Appended to the response of the batch containing `extra_anchor`.
    pub extra_results: Vec<TokenSearchResult>,
    pub extra_anchor: Option<String>,
    pub holdings_calls: AtomicUsize,
    pub search_calls: Mutex<Vec<Vec<String>>>,
    pub api_keys: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(holdings: HoldingsResponse) -> Self {
        Self {
            holdings,
            ..Default::default()
        }
    }

    /// Register metadata for every mint in `tokens`.
    pub fn with_metadata(mut self, tokens: Vec<TokenSearchResult>) -> Self {
        for token in tokens {
            self.metadata.insert(token.id.clone(), token);
        }
        self
    }

    pub fn holdings_call_count(&self) -> usize {
        self.holdings_calls.load(Ordering::SeqCst)
    }

    pub fn search_batches(&self) -> Vec<Vec<String>> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.holdings_call_count() + self.search_batches().len()
    }
}

#[async_trait]
impl TokenDataSource for FakeSource {
    async fn holdings(&self, _address: &str, api_key: &str) -> Result<HoldingsResponse> {
        self.holdings_calls.fetch_add(1, Ordering::SeqCst);
        self.api_keys.lock().unwrap().push(api_key.to_string());

        match &self.holdings_error {
            Some(status) => Err(Error::UpstreamHoldings(status.clone())),
            None => Ok(self.holdings.clone()),
        }
    }

    async fn search(&self, mints: &[String], api_key: &str) -> Result<Vec<TokenSearchResult>> {
        self.search_calls.lock().unwrap().push(mints.to_vec());
        self.api_keys.lock().unwrap().push(api_key.to_string());

        if let Some(failing) = &self.failing_mint {
            if mints.contains(failing) {
                return Err(Error::UpstreamSearch("500 Internal Server Error".to_string()));
            }
        }

        let mut results: Vec<TokenSearchResult> = mints
            .iter()
            .filter_map(|mint| self.metadata.get(mint).cloned())
            .collect();
        if self.reverse_results {
            results.reverse();
        }
        if let Some(anchor) = &self.extra_anchor {
            if mints.contains(anchor) {
                results.extend(self.extra_results.iter().cloned());
            }
        }

        Ok(results)
    }
}

pub fn holdings(native: &str, tokens: &[(&str, &[&str])]) -> HoldingsResponse {
    HoldingsResponse {
        amount: native.to_string(),
        tokens: tokens
            .iter()
            .map(|(mint, amounts)| {
                let accounts = amounts
                    .iter()
                    .map(|amount| TokenAccountBalance {
                        amount: amount.to_string(),
                    })
                    .collect();
                (mint.to_string(), accounts)
            })
            .collect(),
    }
}

pub fn token(id: &str, name: &str, decimals: u8, usd_price: Option<f64>) -> TokenSearchResult {
    TokenSearchResult {
        id: id.to_string(),
        name: name.to_string(),
        symbol: name.chars().take(4).collect::<String>().to_uppercase(),
        decimals,
        icon: Some(format!("https://icons.example.com/{}.png", id)),
        usd_price,
        is_verified: Some(true),
        stats24h: Some(TokenStats {
            price_change: Some(1.5),
        }),
    }
}
