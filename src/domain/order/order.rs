//! Order entity as seen by the gateway.
//!
//! Orders are owned by the order store. The gateway reads them, requests
//! status transitions and writes a couple of metadata slots.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::OrderStatus;
use crate::domain::foundation::OrderId;

/// Metadata key holding the merchant reference of the current session.
pub const MERCHANT_REF_META_KEY: &str = "sparco_merchant_ref";

/// Metadata key holding the processor's payment URL for the current session.
pub const PAYMENT_URL_META_KEY: &str = "sparco_payment_url";

/// Customer contact details forwarded to the processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// Delivery address; the processor takes the street, city and state from here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address_1: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    /// Decimal total as stored by the shop, e.g. `"150.00"`.
    pub total: String,
    /// ISO 4217 currency code.
    pub currency: String,
    pub billing: BillingDetails,
    #[serde(default)]
    pub shipping: ShippingAddress,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Order {
    /// Creates a new order in the `new` status with empty metadata.
    pub fn new(
        id: OrderId,
        total: impl Into<String>,
        currency: impl Into<String>,
        billing: BillingDetails,
    ) -> Self {
        Self {
            id,
            status: OrderStatus::New,
            total: total.into(),
            currency: currency.into(),
            billing,
            shipping: ShippingAddress::default(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_shipping(mut self, shipping: ShippingAddress) -> Self {
        self.shipping = shipping;
        self
    }

    /// Returns true if the total is a positive, finite amount.
    ///
    /// Unparseable totals are treated as nothing to pay.
    pub fn is_payable(&self) -> bool {
        self.total
            .trim()
            .parse::<f64>()
            .map(|amount| amount.is_finite() && amount > 0.0)
            .unwrap_or(false)
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Merchant reference of the current checkout session, if any.
    pub fn merchant_reference(&self) -> Option<&str> {
        self.meta(MERCHANT_REF_META_KEY)
    }

    /// Payment URL of the current checkout session, if any.
    pub fn payment_url(&self) -> Option<&str> {
        self.meta(PAYMENT_URL_META_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_total(total: &str) -> Order {
        Order::new(OrderId::new(1), total, "ZMW", BillingDetails::default())
    }

    #[test]
    fn new_order_starts_in_new_status() {
        assert_eq!(order_with_total("10.00").status, OrderStatus::New);
    }

    #[test]
    fn positive_total_is_payable() {
        assert!(order_with_total("150.00").is_payable());
        assert!(order_with_total(" 0.01 ").is_payable());
    }

    #[test]
    fn zero_or_garbage_total_is_not_payable() {
        assert!(!order_with_total("0").is_payable());
        assert!(!order_with_total("0.00").is_payable());
        assert!(!order_with_total("").is_payable());
        assert!(!order_with_total("free").is_payable());
    }

    #[test]
    fn non_finite_total_is_not_payable() {
        for total in ["inf", "-inf", "infinity", "NaN", "1e400"] {
            assert!(!order_with_total(total).is_payable(), "{}", total);
        }
    }

    #[test]
    fn empty_metadata_values_read_as_absent() {
        let mut order = order_with_total("1");
        order.metadata.insert(PAYMENT_URL_META_KEY.to_string(), String::new());
        order
            .metadata
            .insert(MERCHANT_REF_META_KEY.to_string(), "WC-r1-1".to_string());

        assert_eq!(order.payment_url(), None);
        assert_eq!(order.merchant_reference(), Some("WC-r1-1"));
    }
}
