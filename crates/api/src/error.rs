use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Error type for the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    // Caller input errors
    ValidationError(String),

    // Service configuration errors
    ConfigurationError(String),

    // Upstream token API errors, carrying the upstream status text
    HoldingsUpstreamError(String),
    SearchUpstreamError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::HoldingsUpstreamError(msg) => write!(f, "Holdings API error: {}", msg),
            ApiError::SearchUpstreamError(msg) => write!(f, "Search API error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body returned to API callers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::ConfigurationError(_)
            | ApiError::HoldingsUpstreamError(_)
            | ApiError::SearchUpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to callers. Server-side details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::ValidationError(msg) => msg.clone(),
            ApiError::ConfigurationError(_) => "Service misconfigured".to_string(),
            ApiError::HoldingsUpstreamError(_) => "Failed to fetch token holdings".to_string(),
            ApiError::SearchUpstreamError(_) => "Failed to fetch token metadata".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ValidationError(_) => {}
            ApiError::ConfigurationError(msg) => error!("Configuration error: {}", msg),
            ApiError::HoldingsUpstreamError(msg) => error!("Holdings API error: {}", msg),
            ApiError::SearchUpstreamError(msg) => error!("Search API error: {}", msg),
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::MissingParameter
            | shared::Error::MultipleValues
            | shared::Error::InvalidAddress(_) => ApiError::ValidationError(err.to_string()),
            shared::Error::MissingCredential | shared::Error::Configuration(_) => {
                ApiError::ConfigurationError(err.to_string())
            }
            shared::Error::UpstreamHoldings(status) => ApiError::HoldingsUpstreamError(status),
            shared::Error::UpstreamSearch(status) => ApiError::SearchUpstreamError(status),
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
