use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A holding enriched with market metadata, as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub mint: String,
    #[serde(with = "biguint_string")]
    pub amount: BigUint,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub icon: Option<String>,
    pub usd_price_unit: Option<f64>,
    pub usd_value: Option<f64>,
    pub jupiter_is_verified: bool,
    pub price_change_24h_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokensResponse {
    pub tokens: Vec<TokenRecord>,
}

/// USD value of a raw balance.
///
/// The raw amount is divided by `10^decimals` with truncating integer
/// division before the float multiply, so 1_500_000 raw units at 6 decimals
/// count as 1 whole token.
pub fn usd_value(amount: &BigUint, decimals: u8, usd_price_unit: Option<f64>) -> Option<f64> {
    let price = usd_price_unit?;
    let whole_units = amount / BigUint::from(10u32).pow(u32::from(decimals));
    Some(whole_units.to_f64().unwrap_or(f64::INFINITY) * price)
}

/// Serializes `BigUint` as a decimal JSON string, since balances routinely
/// exceed the range JSON numbers carry exactly.
pub mod biguint_string {
    use num_bigint::BigUint;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BigUint::from_str(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record(amount: BigUint) -> TokenRecord {
        TokenRecord {
            mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            amount,
            name: "USD Coin".to_string(),
            symbol: "USDC".to_string(),
            decimals: 6,
            icon: None,
            usd_price_unit: Some(1.0),
            usd_value: Some(1.0),
            jupiter_is_verified: true,
            price_change_24h_percent: None,
        }
    }

    #[test]
    fn test_usd_value_truncates_before_multiplying() {
        let amount = BigUint::from(1_500_000u64);
        assert_eq!(usd_value(&amount, 6, Some(2.0)), Some(2.0));
    }

    #[test]
    fn test_usd_value_without_price_is_none() {
        let amount = BigUint::from(1_500_000u64);
        assert_eq!(usd_value(&amount, 6, None), None);
    }

    #[test]
    fn test_usd_value_below_one_unit_is_zero() {
        let amount = BigUint::from(999_999u64);
        assert_eq!(usd_value(&amount, 6, Some(150.0)), Some(0.0));
    }

    #[test]
    fn test_usd_value_zero_decimals() {
        let amount = BigUint::from(42u32);
        assert_eq!(usd_value(&amount, 0, Some(0.5)), Some(21.0));
    }

    #[test]
    fn test_record_serializes_camel_case_with_string_amount() {
        let big = BigUint::from_str("340282366920938463463374607431768211457").unwrap();
        let json = serde_json::to_value(record(big)).unwrap();

        assert_eq!(json["amount"], "340282366920938463463374607431768211457");
        assert_eq!(json["usdPriceUnit"], 1.0);
        assert_eq!(json["jupiterIsVerified"], true);
        assert!(json["icon"].is_null());
        assert!(json["priceChange24hPercent"].is_null());
    }

    #[test]
    fn test_record_amount_parses_back_exactly() {
        let json = serde_json::to_string(&record(BigUint::from(u64::MAX) * 3u32)).unwrap();
        let parsed: TokenRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.amount, BigUint::from(u64::MAX) * 3u32);
    }
}
