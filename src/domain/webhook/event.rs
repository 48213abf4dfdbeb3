//! Sparco payment notification types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::WebhookError;
use crate::domain::order::MerchantReference;
use crate::domain::signature::{FieldMap, PUB_KEY_KEY, SIGNATURE_KEY, TIMESTAMP_KEY};

/// Payment status reported by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// Payment is being processed.
    Processing,
    /// Authorization succeeded, funds captured.
    TxnAuthSuccessful,
    /// Authorization failed.
    TxnAuthUnsuccessful,
    /// Any value the gateway does not act on.
    Unrecognized(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::TxnAuthSuccessful => "TXN_AUTH_SUCCESSFUL",
            PaymentStatus::TxnAuthUnsuccessful => "TXN_AUTH_UNSUCCESSFUL",
            PaymentStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "PROCESSING" => PaymentStatus::Processing,
            "TXN_AUTH_SUCCESSFUL" => PaymentStatus::TxnAuthSuccessful,
            "TXN_AUTH_UNSUCCESSFUL" => PaymentStatus::TxnAuthUnsuccessful,
            other => PaymentStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        PaymentStatus::from(s.as_str())
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified payment notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub merchant_reference: MerchantReference,
    pub is_error: bool,
    pub status: PaymentStatus,
    pub signature: Option<String>,
    pub pub_key: Option<String>,
    pub timestamp: Option<String>,
}

impl WebhookEvent {
    /// Extracts the event from a notification's fields.
    ///
    /// A missing `status` is read as an unrecognized empty status rather than
    /// an error, so the notification is still acknowledged.
    ///
    /// # Errors
    ///
    /// - `MissingField` if `merchantReference` is absent
    /// - `InvalidMerchantReference` if it does not end in an order id
    pub fn from_fields(fields: &FieldMap) -> Result<Self, WebhookError> {
        let raw_reference = fields
            .get("merchantReference")
            .ok_or(WebhookError::MissingField("merchantReference"))?;
        let merchant_reference = MerchantReference::parse(raw_reference)
            .map_err(|_| WebhookError::InvalidMerchantReference(raw_reference.to_string()))?;

        Ok(Self {
            merchant_reference,
            is_error: is_truthy(fields.get_or_empty("isError")),
            status: PaymentStatus::from(fields.get_or_empty("status")),
            signature: fields.get(SIGNATURE_KEY).map(str::to_string),
            pub_key: fields.get(PUB_KEY_KEY).map(str::to_string),
            timestamp: fields.get(TIMESTAMP_KEY).map(str::to_string),
        })
    }
}

/// Interprets a coerced scalar as a boolean flag.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
