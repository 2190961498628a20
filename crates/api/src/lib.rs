pub mod error;
pub mod logging;
pub mod routes;
pub mod handlers;
pub mod jupiter_client;
pub mod holdings_service;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use holdings_service::{BalanceMap, HoldingsService, SEARCH_BATCH_SIZE};
pub use jupiter_client::{
    HoldingsResponse, JupiterClient, TokenAccountBalance, TokenDataSource, TokenSearchResult,
    TokenStats,
};

use axum::http::HeaderValue;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub holdings_service: Arc<HoldingsService>,
    /// Upstream credential; requests fail with a configuration error when absent.
    pub api_key: Option<String>,
    /// `Cache-Control` value attached to successful token responses.
    pub cache_control: Option<HeaderValue>,
}

impl AppState {
    pub fn new(
        holdings_service: Arc<HoldingsService>,
        api_key: Option<String>,
        cache_control: Option<HeaderValue>,
    ) -> Self {
        Self {
            holdings_service,
            api_key,
            cache_control,
        }
    }
}
