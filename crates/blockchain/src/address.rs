use shared::{Error, Result};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// The address parameter as it arrived on the request, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressParam {
    Missing,
    Multiple(Vec<String>),
    Single(String),
}

impl AddressParam {
    /// Classify every value supplied for the parameter.
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => AddressParam::Missing,
            1 => AddressParam::Single(values.remove(0)),
            _ => AddressParam::Multiple(values),
        }
    }
}

impl From<Option<String>> for AddressParam {
    fn from(value: Option<String>) -> Self {
        value.map_or(AddressParam::Missing, AddressParam::Single)
    }
}

/// A Solana address that passed the format check.
///
/// Only ever forwarded to the upstream as-is; never decoded again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAddress(String);

impl ValidatedAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate the address parameter of a holdings request.
///
/// A valid address is base-58, at most 44 characters, and decodes to
/// exactly 32 bytes.
pub fn validate_address(param: AddressParam) -> Result<ValidatedAddress> {
    let address = match param {
        AddressParam::Missing => return Err(Error::MissingParameter),
        AddressParam::Multiple(values) => {
            debug!("Rejecting {} address values", values.len());
            return Err(Error::MultipleValues);
        }
        AddressParam::Single(address) => address,
    };

    Pubkey::from_str(&address).map_err(|e| {
        warn!("Invalid wallet address format: {} - {}", address, e);
        Error::InvalidAddress(format!("Invalid Solana address format: {}", e))
    })?;

    Ok(ValidatedAddress(address))
}
