use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Address parameter is required")]
    MissingParameter,

    #[error("Only one address may be provided")]
    MultipleValues,

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Upstream API credential is not configured")]
    MissingCredential,

    #[error("Holdings request failed: {0}")]
    UpstreamHoldings(String),

    #[error("Token search request failed: {0}")]
    UpstreamSearch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter | Error::MultipleValues | Error::InvalidAddress(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
