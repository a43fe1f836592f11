use crate::core::errors::SplitBillError;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use utoipa::ToSchema;

const MAX_ADDRESS_LENGTH: usize = 128;

/// Participant identifier.
///
/// The original spelling is kept for display, but equality and hashing go
/// through [`Address::canonical`] so `0xAbC` and `0xabc` are the same payer.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8")]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, SplitBillError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SplitBillError::invalid_input(
                "address",
                "Invalid address",
                "address cannot be empty",
            ));
        }
        if trimmed.len() > MAX_ADDRESS_LENGTH {
            return Err(SplitBillError::invalid_input(
                "address",
                "Address Too Long",
                format!("address cannot exceed {} characters", MAX_ADDRESS_LENGTH),
            ));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SplitBillError::invalid_input(
                "address",
                "Invalid address",
                format!("address {} contains whitespace or control characters", trimmed),
            ));
        }
        Ok(Address(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn canonical(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn matches(&self, other: &Address) -> bool {
        self.canonical() == other.canonical()
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl FromStr for Address {
    type Err = SplitBillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn comparison_ignores_case() {
        let upper = Address::parse("0xABCdef").unwrap();
        let lower = Address::parse("0xabcdef").unwrap();
        assert_eq!(upper, lower);

        let set: HashSet<Address> = [upper, lower].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_keeps_original_spelling() {
        let addr = Address::parse("  0xAbC  ").unwrap();
        assert_eq!(addr.to_string(), "0xAbC");
        assert_eq!(addr.canonical(), "0xabc");
    }

    #[test]
    fn rejects_blank_and_spaced_addresses() {
        assert!(matches!(
            Address::parse("   "),
            Err(SplitBillError::InvalidInput(field, _)) if field == "address"
        ));
        assert!(Address::parse("0xab cd").is_err());
        assert!(Address::parse(&"a".repeat(MAX_ADDRESS_LENGTH + 1)).is_err());
    }
}
