//! Currency amounts
//!
//! Amounts are exact decimals end to end: decoded from the JSON number's
//! own digits into `rust_decimal::Decimal`, stored as `NUMERIC`, rendered
//! back as text. serde_json's `arbitrary_precision` feature keeps the
//! digits intact, so no amount ever passes through `f64`.

use rust_decimal::Decimal;
use serde::de::{self, Deserialize, Deserializer};

use super::ValidationError;

/// Strictly positive USD amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsdAmount(Decimal);

impl UsdAmount {
    pub fn new(field: &'static str, value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NotPositive { field });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Serde helper for optional amount fields.
///
/// Accepts JSON numbers only (`"5000"` is a type error) and refuses values
/// that a `Decimal` cannot hold without rounding.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Number>::deserialize(deserializer)? {
        Some(number) => exact_decimal(&number.to_string())
            .map(Some)
            .map_err(de::Error::custom),
        None => Ok(None),
    }
}

fn exact_decimal(digits: &str) -> Result<Decimal, String> {
    let parsed = if digits.contains(['e', 'E']) {
        Decimal::from_scientific(digits)
    } else {
        Decimal::from_str_exact(digits)
    };
    parsed.map_err(|_| format!("amount {digits} cannot be represented exactly"))
}
