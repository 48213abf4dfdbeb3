//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of a merchant order as assigned by the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates an OrderId from the store's numeric id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("order_id"));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::invalid_format("order_id", format!("'{}' is not a number", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_parses_numeric_string() {
        let id: OrderId = "482".parse().unwrap();
        assert_eq!(id, OrderId::new(482));
    }

    #[test]
    fn order_id_rejects_empty_string() {
        let result = "".parse::<OrderId>();
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn order_id_rejects_non_numeric() {
        let result = "abc".parse::<OrderId>();
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn order_id_displays_as_number() {
        assert_eq!(OrderId::new(55).to_string(), "55");
    }

    #[test]
    fn order_id_serializes_transparently() {
        let json = serde_json::to_string(&OrderId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
