pub mod address;
pub mod types;

pub use address::{validate_address, AddressParam, ValidatedAddress};
pub use types::*;
