//! InitiateCheckoutHandler - Command handler for opening a Sparco checkout session.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::checkout::{CheckoutApiResponse, CheckoutError, CheckoutOutcome, CheckoutRequest};
use crate::domain::foundation::OrderId;
use crate::domain::order::{
    MerchantReference, Order, OrderError, OrderStateMachine, OrderStatus, MERCHANT_REF_META_KEY,
    PAYMENT_URL_META_KEY,
};
use crate::ports::{HttpClient, OrderStore, TransportError};

const AWAITING_PAYMENT_NOTE: &str = "Waiting for payment";
const REJECTED_NOTE: &str = "Payment failed. Processor rejected the checkout session.";
const UNEXPECTED_RESPONSE_NOTE: &str = "Payment failed. Unexpected response from processor.";

/// Command to open a checkout session for an order.
#[derive(Debug, Clone)]
pub struct InitiateCheckoutCommand {
    pub order_id: OrderId,
    /// Where the processor sends the customer back after paying.
    pub return_url: String,
}

/// Processor settings the handler needs for each request.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub public_key: String,
    pub webhook_url: String,
    pub checkout_url: String,
    pub timeout: Duration,
}

/// Handler for opening Sparco checkout sessions.
///
/// Stamps the order with a fresh merchant reference, posts the checkout
/// request and moves the order to `on-hold` (or `failed`) depending on the
/// processor's answer. A transport failure leaves the order status alone so
/// the customer can retry.
pub struct InitiateCheckoutHandler {
    store: Arc<dyn OrderStore>,
    http_client: Arc<dyn HttpClient>,
    state_machine: OrderStateMachine,
    settings: CheckoutSettings,
}

impl InitiateCheckoutHandler {
    pub fn new(
        store: Arc<dyn OrderStore>,
        http_client: Arc<dyn HttpClient>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            state_machine: OrderStateMachine::new(store.clone()),
            store,
            http_client,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiateCheckoutCommand,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        // 1. Load order
        let order = self
            .store
            .get(cmd.order_id)
            .await
            .map_err(|e| OrderError::from_store(cmd.order_id, e))?
            .ok_or(CheckoutError::OrderNotFound(cmd.order_id))?;

        // 2. Nothing to collect
        if !order.is_payable() {
            tracing::info!(order_id = %order.id, total = %order.total, "Order has nothing to pay");
            return Ok(CheckoutOutcome::NothingToPay);
        }

        // 3. Hand back an open session
        if let Some(outcome) = existing_session(&order) {
            tracing::debug!(order_id = %order.id, "Reusing open checkout session");
            return Ok(outcome);
        }

        if !order.status.accepts_checkout() {
            return Err(CheckoutError::NotPayable {
                order_id: order.id,
                status: order.status,
            });
        }

        // 4. Stamp a fresh merchant reference
        let attempt = self
            .store
            .next_checkout_attempt(order.id)
            .await
            .map_err(|e| OrderError::from_store(order.id, e))?;
        let reference = MerchantReference::for_attempt(order.id, attempt);
        self.store
            .set_metadata(order.id, MERCHANT_REF_META_KEY, reference.as_str())
            .await
            .map_err(|e| OrderError::from_store(order.id, e))?;

        // 5. Call processor
        let request = CheckoutRequest::for_order(
            &order,
            &reference,
            &self.settings.public_key,
            &self.settings.webhook_url,
            &cmd.return_url,
        );
        let body = serde_json::to_value(&request)
            .map_err(|e| TransportError::Other(format!("Failed to encode checkout request: {}", e)))?;

        let response = match self
            .http_client
            .post_json(&self.settings.checkout_url, &body, self.settings.timeout)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    order_id = %order.id,
                    merchant_reference = %reference,
                    error = %err,
                    "Checkout request did not reach the processor"
                );
                return Err(err.into());
            }
        };

        // 6. Interpret reply
        if response.status != 200 {
            tracing::warn!(
                order_id = %order.id,
                status = response.status,
                "Processor returned non-200 for checkout"
            );
            self.fail_order(order.id, UNEXPECTED_RESPONSE_NOTE).await?;
            return Err(CheckoutError::RemoteProtocol {
                status: response.status,
            });
        }

        let reply: CheckoutApiResponse = match serde_json::from_str(&response.body) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(order_id = %order.id, error = %err, "Unreadable checkout response");
                self.fail_order(order.id, UNEXPECTED_RESPONSE_NOTE).await?;
                return Err(CheckoutError::RemoteProtocol {
                    status: response.status,
                });
            }
        };

        if reply.is_error {
            tracing::warn!(
                order_id = %order.id,
                merchant_reference = %reference,
                "Processor rejected checkout session"
            );
            self.fail_order(order.id, REJECTED_NOTE).await?;
            return Err(CheckoutError::RemoteBusiness {
                payment_url: reply.payment_url,
            });
        }

        self.state_machine
            .transition(order.id, OrderStatus::OnHold, AWAITING_PAYMENT_NOTE)
            .await?;
        if let Some(url) = reply.payment_url.as_deref() {
            self.store
                .set_metadata(order.id, PAYMENT_URL_META_KEY, url)
                .await
                .map_err(|e| OrderError::from_store(order.id, e))?;
        }

        tracing::info!(
            order_id = %order.id,
            merchant_reference = %reference,
            has_payment_url = reply.payment_url.is_some(),
            "Checkout session opened"
        );

        Ok(CheckoutOutcome::AwaitingPayment {
            merchant_reference: reference,
            payment_url: reply.payment_url,
            reused: false,
        })
    }

    async fn fail_order(&self, id: OrderId, note: &str) -> Result<(), CheckoutError> {
        self.state_machine
            .transition(id, OrderStatus::Failed, note)
            .await?;
        Ok(())
    }
}

/// Returns the open session of an on-hold order that already has one.
fn existing_session(order: &Order) -> Option<CheckoutOutcome> {
    if order.status != OrderStatus::OnHold {
        return None;
    }
    let payment_url = order.payment_url()?;
    let reference = MerchantReference::parse(order.merchant_reference()?).ok()?;

    Some(CheckoutOutcome::AwaitingPayment {
        merchant_reference: reference,
        payment_url: Some(payment_url.to_string()),
        reused: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOrderStore;
    use crate::adapters::sparco::MockHttpClient;
    use crate::domain::order::{BillingDetails, ShippingAddress};
    use serde_json::json;

    const CHECKOUT_URL: &str = "https://checkout.sparco.io/gateway/api/v1/checkout";

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            public_key: "pk_test_shop".to_string(),
            webhook_url: "https://shop.example/api/webhooks/sparco".to_string(),
            checkout_url: CHECKOUT_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    fn order(id: u64, total: &str) -> Order {
        let billing = BillingDetails {
            first_name: "Mwila".to_string(),
            last_name: "Banda".to_string(),
            email: "mwila@example.com".to_string(),
            phone: "0971234567".to_string(),
            country: "ZM".to_string(),
        };
        Order::new(OrderId::new(id), total, "ZMW", billing).with_shipping(ShippingAddress {
            address_1: "Plot 12 Cairo Road".to_string(),
            city: "Lusaka".to_string(),
            state: "Lusaka".to_string(),
        })
    }

    fn setup(
        orders: Vec<Order>,
    ) -> (Arc<InMemoryOrderStore>, Arc<MockHttpClient>, InitiateCheckoutHandler) {
        let store = Arc::new(InMemoryOrderStore::with_orders(orders));
        let client = Arc::new(MockHttpClient::new());
        let handler = InitiateCheckoutHandler::new(store.clone(), client.clone(), settings());
        (store, client, handler)
    }

    fn command(id: u64) -> InitiateCheckoutCommand {
        InitiateCheckoutCommand {
            order_id: OrderId::new(id),
            return_url: "https://shop.example/checkout/order-received/".to_string(),
        }
    }

    async fn load(store: &InMemoryOrderStore, id: u64) -> Order {
        store.get(OrderId::new(id)).await.unwrap().unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Successful Sessions
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn opens_session_and_puts_order_on_hold() {
        let (store, client, handler) = setup(vec![order(55, "150.00")]);
        client.respond_json(200, json!({"paymentUrl": "https://checkout.sparco.io/pay/abc"}));

        let outcome = handler.handle(command(55)).await.unwrap();

        assert_eq!(outcome.redirect_url(), Some("https://checkout.sparco.io/pay/abc"));
        let stored = load(&store, 55).await;
        assert_eq!(stored.status, OrderStatus::OnHold);
        assert_eq!(stored.merchant_reference(), Some("WC-r1-55"));
        assert_eq!(stored.payment_url(), Some("https://checkout.sparco.io/pay/abc"));
        assert_eq!(store.notes(OrderId::new(55)).await, vec!["Waiting for payment"]);
    }

    #[tokio::test]
    async fn sends_order_details_to_checkout_endpoint() {
        let (_store, client, handler) = setup(vec![order(55, "150.00")]);
        client.respond_json(200, json!({"paymentUrl": "https://checkout.sparco.io/pay/abc"}));

        handler.handle(command(55)).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.url, CHECKOUT_URL);
        assert_eq!(sent.timeout, Duration::from_secs(60));
        assert_eq!(sent.body["transactionName"], "Order-55");
        assert_eq!(sent.body["amount"], "150.00");
        assert_eq!(sent.body["currency"], "ZMW");
        assert_eq!(sent.body["transactionReference"], "WC-r1-55");
        assert_eq!(sent.body["customerCity"], "Lusaka");
        assert_eq!(sent.body["customerCountryCode"], "ZM");
        assert_eq!(sent.body["merchantPublicKey"], "pk_test_shop");
        assert_eq!(sent.body["webhookUrl"], "https://shop.example/api/webhooks/sparco");
        assert_eq!(sent.body["autoReturn"], true);
    }

    #[tokio::test]
    async fn missing_payment_url_still_awaits_payment() {
        let (store, client, handler) = setup(vec![order(56, "10.00")]);
        client.respond_json(200, json!({"isError": false}));

        let outcome = handler.handle(command(56)).await.unwrap();

        assert!(matches!(
            outcome,
            CheckoutOutcome::AwaitingPayment { payment_url: None, reused: false, .. }
        ));
        assert_eq!(load(&store, 56).await.status, OrderStatus::OnHold);
    }

    #[tokio::test]
    async fn open_session_is_reused_without_calling_processor() {
        let (_store, client, handler) = setup(vec![order(57, "20.00")]);
        client.respond_json(200, json!({"paymentUrl": "https://checkout.sparco.io/pay/first"}));
        handler.handle(command(57)).await.unwrap();

        let outcome = handler.handle(command(57)).await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::AwaitingPayment { reused: true, .. }));
        assert_eq!(outcome.redirect_url(), Some("https://checkout.sparco.io/pay/first"));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn zero_total_needs_no_session() {
        let (_store, client, handler) = setup(vec![order(58, "0.00")]);

        let outcome = handler.handle(command(58)).await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::NothingToPay);
        assert_eq!(client.request_count(), 0);
    }

    // ══════════════════════════════════════════════════════════════
    // Failures
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn business_error_fails_order_and_keeps_redirect() {
        let (store, client, handler) = setup(vec![order(60, "150.00")]);
        client.respond_json(
            200,
            json!({"isError": true, "paymentUrl": "https://checkout.sparco.io/error"}),
        );

        let err = handler.handle(command(60)).await.unwrap_err();

        assert_eq!(err.redirect_url(), Some("https://checkout.sparco.io/error"));
        assert_eq!(load(&store, 60).await.status, OrderStatus::Failed);
    }

    #[tokio::test]
    async fn non_200_fails_order() {
        let (store, client, handler) = setup(vec![order(61, "150.00")]);
        client.respond(500, "Internal Server Error");

        let err = handler.handle(command(61)).await.unwrap_err();

        assert_eq!(err, CheckoutError::RemoteProtocol { status: 500 });
        assert_eq!(load(&store, 61).await.status, OrderStatus::Failed);
    }

    #[tokio::test]
    async fn unreadable_200_fails_order() {
        let (store, client, handler) = setup(vec![order(62, "150.00")]);
        client.respond(200, "<html>maintenance</html>");

        let err = handler.handle(command(62)).await.unwrap_err();

        assert_eq!(err, CheckoutError::RemoteProtocol { status: 200 });
        assert_eq!(load(&store, 62).await.status, OrderStatus::Failed);
    }

    #[tokio::test]
    async fn transport_error_leaves_order_untouched() {
        let (store, client, handler) = setup(vec![order(63, "150.00")]);
        client.fail_with(TransportError::Timeout);

        let err = handler.handle(command(63)).await.unwrap_err();

        assert_eq!(err, CheckoutError::Transport(TransportError::Timeout));
        let stored = load(&store, 63).await;
        assert_eq!(stored.status, OrderStatus::New);
        assert_eq!(stored.payment_url(), None);
    }

    #[tokio::test]
    async fn retry_after_transport_error_uses_new_reference() {
        let (store, client, handler) = setup(vec![order(64, "150.00")]);
        client.fail_with(TransportError::Connect("refused".into()));
        let _ = handler.handle(command(64)).await;

        client.respond_json(200, json!({"paymentUrl": "https://checkout.sparco.io/pay/2"}));
        handler.handle(command(64)).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].body["transactionReference"], "WC-r1-64");
        assert_eq!(requests[1].body["transactionReference"], "WC-r2-64");
        assert_eq!(load(&store, 64).await.merchant_reference(), Some("WC-r2-64"));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let (_store, _client, handler) = setup(vec![]);

        let err = handler.handle(command(404)).await.unwrap_err();

        assert_eq!(err, CheckoutError::OrderNotFound(OrderId::new(404)));
    }

    #[tokio::test]
    async fn completed_order_cannot_start_checkout() {
        let mut paid = order(65, "150.00");
        paid.status = OrderStatus::Completed;
        let (_store, client, handler) = setup(vec![paid]);

        let err = handler.handle(command(65)).await.unwrap_err();

        assert_eq!(
            err,
            CheckoutError::NotPayable {
                order_id: OrderId::new(65),
                status: OrderStatus::Completed,
            }
        );
        assert_eq!(client.request_count(), 0);
    }
}
