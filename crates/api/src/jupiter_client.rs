use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use shared::{Error, Result};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-api-key";

/// Balances reported by the holdings endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoldingsResponse {
    /// Native SOL balance in lamports.
    pub amount: String,
    /// Token accounts per mint, in the order the upstream listed them.
    #[serde(default, deserialize_with = "ordered_entries")]
    pub tokens: Vec<(String, Vec<TokenAccountBalance>)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenAccountBalance {
    /// Raw amount in the token's smallest unit.
    pub amount: String,
}

/// One result of the token search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSearchResult {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub usd_price: Option<f64>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub stats24h: Option<TokenStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStats {
    #[serde(default)]
    pub price_change: Option<f64>,
}

/// Source of balances and token metadata for the holdings aggregator.
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    /// Fetch balances for a wallet. Fails with `Error::UpstreamHoldings`.
    async fn holdings(&self, address: &str, api_key: &str) -> Result<HoldingsResponse>;

    /// Fetch metadata for a batch of mints. Fails with `Error::UpstreamSearch`.
    async fn search(&self, mints: &[String], api_key: &str) -> Result<Vec<TokenSearchResult>>;
}

/// HTTP client for the Jupiter Ultra API.
pub struct JupiterClient {
    client: Client,
    base_url: String,
}

impl JupiterClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Jupiter client initialized with base URL {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn holdings_url(&self, address: &str) -> String {
        format!("{}/holdings/{}", self.base_url, address)
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Send a request and decode a JSON body, reporting every failure through `to_error`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        api_key: &str,
        to_error: fn(String) -> Error,
    ) -> Result<T> {
        let response = request
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach Jupiter API: {}", e);
                to_error(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Jupiter API returned error status {}: {}", status, body);
            return Err(to_error(status.to_string()));
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Failed to parse Jupiter response: {}", e);
            to_error(format!("invalid response body: {}", e))
        })
    }
}

#[async_trait]
impl TokenDataSource for JupiterClient {
    async fn holdings(&self, address: &str, api_key: &str) -> Result<HoldingsResponse> {
        debug!("Fetching holdings for {}", address);
        let request = self.client.get(self.holdings_url(address));
        self.get_json(request, api_key, Error::UpstreamHoldings).await
    }

    async fn search(&self, mints: &[String], api_key: &str) -> Result<Vec<TokenSearchResult>> {
        debug!("Searching metadata for {} mints", mints.len());
        let request = self
            .client
            .get(self.search_url())
            .query(&[("query", search_query(mints))]);
        self.get_json(request, api_key, Error::UpstreamSearch).await
    }
}

/// The search endpoint takes mints as one comma-separated value.
pub fn search_query(mints: &[String]) -> String {
    mints.join(",")
}

type MintEntries = Vec<(String, Vec<TokenAccountBalance>)>;

/// Decode a JSON object into its entries without losing key order.
fn ordered_entries<'de, D>(deserializer: D) -> std::result::Result<MintEntries, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = MintEntries;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of mint to token accounts")
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor)
}
