pub mod models;
pub mod error;
pub mod config;

pub use error::{Error, Result};
pub use models::{TokenRecord, TokensResponse};
