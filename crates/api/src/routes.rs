use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use shared::config::HttpConfig;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{handlers, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Token holdings
        .route("/api/tokens", get(handlers::get_tokens_by_query))
        .route("/api/tokens/:address", get(handlers::get_tokens_by_path))

        .with_state(state)
}

/// CORS for the read-only endpoints. No configured origins means any origin.
pub fn cors_layer(config: &HttpConfig) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if config.cors_allowed_origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}
