//! Amount type for monetary values that are persisted as decimal strings.
//!
//! Amounts are written as plain decimal strings (e.g. `"500"` or `"12.50"`). Reading is lenient:
//! a JSON number is accepted as well, and a value that cannot be parsed becomes zero (with a
//! warning) so that one bad record never prevents a summary from being computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use tracing::warn;

/// Represents a monetary amount.
///
/// # Examples
///
/// ```
/// # use gofinances::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str(" 12.50 ").unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// ```
///
/// Lenient parsing of stored values:
/// ```
/// # use gofinances::model::Amount;
/// let amount = Amount::parse_lenient("abc");
/// assert!(amount.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// The largest amount a new transaction may have: one trillion.
    pub const MAX: Amount = Amount::new(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value.is_sign_positive()
    }

    /// Parses a stored amount, coercing anything that is not a number to zero.
    pub fn parse_lenient(s: &str) -> Self {
        match Amount::from_str(s) {
            Ok(amount) => amount,
            Err(_) => match Decimal::from_scientific(s.trim()) {
                Ok(value) => Amount::new(value),
                Err(e) => {
                    warn!("Treating the non-numeric stored amount '{s}' as zero: {e}");
                    Amount::ZERO
                }
            },
        }
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Strict parsing, used for user input. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(AmountError)?;
        Ok(Amount { value })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// What may be found in the `amount` field of a stored transaction.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StoredAmount::deserialize(deserializer)? {
            StoredAmount::Text(s) => Amount::parse_lenient(&s),
            StoredAmount::Number(n) => Amount::parse_lenient(&n.to_string()),
        })
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
