//! Merchant reference value object.
//!
//! The merchant reference travels with the checkout session and comes back
//! in every webhook. Format: `WC-<uniqueToken>-<orderId>`. The token may
//! itself contain `-`, so the order id is always the final segment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{OrderId, ValidationError};

const PREFIX: &str = "WC";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MerchantReference {
    raw: String,
    order_id: OrderId,
}

impl MerchantReference {
    /// Builds a reference from an order id and a unique token.
    pub fn new(order_id: OrderId, token: impl AsRef<str>) -> Self {
        Self {
            raw: format!("{}-{}-{}", PREFIX, token.as_ref(), order_id),
            order_id,
        }
    }

    /// Deterministic reference for the n-th checkout attempt of an order.
    pub fn for_attempt(order_id: OrderId, attempt: u32) -> Self {
        Self::new(order_id, format!("r{}", attempt))
    }

    /// Parses a reference received from the processor.
    ///
    /// Only the final `-` segment is interpreted; everything before it is
    /// opaque.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("merchantReference"));
        }

        let last_segment = raw.rsplit('-').next().unwrap_or(raw);
        let order_id = last_segment.parse::<OrderId>().map_err(|_| {
            ValidationError::invalid_format(
                "merchantReference",
                format!("'{}' does not end in an order id", raw),
            )
        })?;

        Ok(Self {
            raw: raw.to_string(),
            order_id,
        })
    }

    /// The order this reference points at.
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for MerchantReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for MerchantReference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MerchantReference {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MerchantReference> for String {
    fn from(reference: MerchantReference) -> Self {
        reference.raw
    }
}
