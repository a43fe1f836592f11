use crate::core::errors::SplitBillError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Whole number of minor currency units (wei, cents, ...).
///
/// Serialized as a decimal string: 18-decimal token amounts do not fit the
/// integer range most JSON clients can represent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(into = "String")]
#[schema(value_type = String, example = "50000000000000000000")]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(minor_units: u128) -> Self {
        Amount(minor_units)
    }

    pub const fn minor_units(self) -> u128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Sum of `amounts`, or `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Option<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a))
    }

    /// Parses a decimal string of minor units.
    pub fn parse(raw: &str) -> Result<Self, SplitBillError> {
        let trimmed = raw.trim();
        if trimmed.starts_with('-') {
            return Err(SplitBillError::InvalidAmount(format!(
                "{} is negative",
                trimmed
            )));
        }
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(SplitBillError::InvalidAmount(format!(
                "{:?} is not a whole number of minor units",
                trimmed
            )));
        }
        trimmed
            .parse::<u128>()
            .map(Amount)
            .map_err(|e| SplitBillError::InvalidAmount(format!("{}: {}", trimmed, e)))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl FromStr for Amount {
    type Err = SplitBillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
