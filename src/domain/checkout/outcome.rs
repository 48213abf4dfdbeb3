//! Successful checkout initiation results.

use crate::domain::order::MerchantReference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// A session is open and the order is on hold until the webhook arrives.
    AwaitingPayment {
        merchant_reference: MerchantReference,
        /// Where to send the customer. `None` if the processor gave no URL.
        payment_url: Option<String>,
        /// True when an existing session was handed back instead of a new one.
        reused: bool,
    },

    /// The order total is zero; there is nothing to collect.
    NothingToPay,
}

impl CheckoutOutcome {
    /// Processor payment page to redirect the customer to, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            CheckoutOutcome::AwaitingPayment { payment_url, .. } => payment_url.as_deref(),
            CheckoutOutcome::NothingToPay => None,
        }
    }
}
