use super::submission::SubmissionState;
use crate::domain::ports::{OrderReceipt, OrderServiceArc};
use crate::error::{DispatchError, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// What a payment button action ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The order service accepted the cart.
    OrderPlaced { order_id: String },
    /// The shopper was sent to a hosted checkout page.
    Redirected { url: String },
    /// A message is shown and no order was placed.
    Rejected { message: String },
    /// Payment is pending on the provider side; nothing to do yet.
    AwaitingProvider,
    /// Required client objects are not initialized yet. Nothing is shown.
    Aborted,
    /// The input did not concern this button.
    Ignored,
}

/// Calls the order service with a timeout, retrying only on timeout.
#[derive(Clone)]
pub struct OrderPlacer {
    service: OrderServiceArc,
    timeout: Duration,
    attempts: u32,
}

impl OrderPlacer {
    pub fn new(service: OrderServiceArc, timeout: Duration, attempts: u32) -> Self {
        Self {
            service,
            timeout,
            attempts: attempts.max(1),
        }
    }

    #[instrument(skip(self))]
    pub async fn place(&self, cart_id: &str) -> Result<OrderReceipt> {
        for attempt in 1..=self.attempts {
            match tokio::time::timeout(self.timeout, self.service.place_order(cart_id)).await {
                Ok(result) => return result,
                Err(_) => warn!(attempt, "Order placement timed out"),
            }
        }
        Err(DispatchError::Timeout {
            operation: "Placing the order",
        })
    }

    /// Places the order and settles the button state: the submitting flag is
    /// always cleared and a failure message replaces any previous one.
    pub async fn complete(&self, cart_id: &str, state: &SubmissionState) -> Outcome {
        match self.place(cart_id).await {
            Ok(receipt) => {
                info!(order_id = %receipt.order_id, "Order placed");
                state.finish();
                Outcome::OrderPlaced {
                    order_id: receipt.order_id,
                }
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "Order placement failed");
                state.fail(message.clone());
                Outcome::Rejected { message }
            }
        }
    }
}
