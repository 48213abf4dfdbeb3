//! Outbound checkout session request and the processor's reply.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::order::{MerchantReference, Order};

/// Path of the checkout endpoint relative to the processor base URL.
pub const CHECKOUT_PATH: &str = "/gateway/api/v1/checkout";

/// Body POSTed to the processor to open a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub transaction_name: String,
    pub amount: String,
    pub currency: String,
    pub transaction_reference: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_addr: String,
    pub customer_city: String,
    pub customer_state: String,
    pub customer_country_code: String,
    pub customer_postal_code: String,
    pub merchant_public_key: String,
    pub webhook_url: String,
    pub return_url: String,
    pub auto_return: bool,
}

impl CheckoutRequest {
    /// Assembles the request for `order` under `reference`.
    pub fn for_order(
        order: &Order,
        reference: &MerchantReference,
        merchant_public_key: &str,
        webhook_url: &str,
        return_url: &str,
    ) -> Self {
        Self {
            transaction_name: format!("Order-{}", order.id),
            amount: order.total.clone(),
            currency: order.currency.clone(),
            transaction_reference: reference.to_string(),
            customer_first_name: order.billing.first_name.clone(),
            customer_last_name: order.billing.last_name.clone(),
            customer_email: order.billing.email.clone(),
            customer_phone: order.billing.phone.clone(),
            customer_addr: order.shipping.address_1.clone(),
            customer_city: order.shipping.city.clone(),
            customer_state: order.shipping.state.clone(),
            customer_country_code: order.billing.country.clone(),
            customer_postal_code: String::new(),
            merchant_public_key: merchant_public_key.to_string(),
            webhook_url: webhook_url.to_string(),
            return_url: return_url.to_string(),
            auto_return: true,
        }
    }
}

/// Processor reply to a checkout request with HTTP 200.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutApiResponse {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_error: bool,
}

/// Accepts booleans, numbers and the strings `"1"`/`"true"` as flags.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}
