use anyhow::Result;
use axum::http::HeaderValue;
use holdings_api::{logging, routes, AppState, HoldingsService, JupiterClient};
use shared::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    logging::init(config.logging.format);
    tracing::info!("Starting token holdings API");

    if config.jupiter.api_key.is_none() {
        tracing::warn!("JUPITER_API_KEY is not set; token requests will fail until it is configured");
    }

    // Upstream client
    let jupiter_client = Arc::new(JupiterClient::new(
        config.jupiter.base_url.clone(),
        config.jupiter.timeout_secs.map(Duration::from_secs),
    )?);

    let holdings_service = Arc::new(HoldingsService::new(
        jupiter_client,
        config.jupiter.search_concurrency,
    ));
    tracing::info!(
        "Holdings service initialized (search concurrency {})",
        config.jupiter.search_concurrency
    );

    let cache_control = config
        .http
        .cache_control
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()?;

    let app_state = Arc::new(AppState::new(
        holdings_service,
        config.jupiter.api_key.clone(),
        cache_control,
    ));

    let app = routes::create_router(app_state)
        .layer(routes::cors_layer(&config.http)?)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on {}", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
