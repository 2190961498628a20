use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use blockchain::{validate_address, AddressParam};
use shared::{Error, TokensResponse};
use std::sync::Arc;

use crate::{error::ApiResult, AppState};

/// Query parameter carrying the wallet address on `/api/tokens`.
pub const ADDRESS_PARAM: &str = "address";

/// `GET /api/tokens/:address`
///
/// A segment axum cannot decode (e.g. invalid UTF-8) is reported as an
/// invalid address so the body stays JSON.
pub async fn get_tokens_by_path(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let Path(address) = path.map_err(|e| Error::InvalidAddress(e.body_text()))?;
    tokens_response(&state, AddressParam::Single(address)).await
}

/// `GET /api/tokens?address=...`
///
/// Pairs are taken raw so a repeated `address` is seen and rejected.
pub async fn get_tokens_by_query(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = query.map_err(|e| Error::InvalidAddress(e.body_text()))?;
    let values = params
        .into_iter()
        .filter(|(key, _)| key == ADDRESS_PARAM)
        .map(|(_, value)| value)
        .collect();

    tokens_response(&state, AddressParam::from_values(values)).await
}

async fn tokens_response(state: &AppState, param: AddressParam) -> ApiResult<Response> {
    let address = validate_address(param)?;
    let api_key = state.api_key.as_deref().ok_or(Error::MissingCredential)?;

    let tokens = state.holdings_service.get_tokens(&address, api_key).await?;

    let mut response = Json(TokensResponse { tokens }).into_response();
    if let Some(cache_control) = &state.cache_control {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, cache_control.clone());
    }

    Ok(response)
}

/// Liveness check
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
