use super::{ButtonContext, UNKNOWN_ERROR};
use crate::application::placement::Outcome;
use crate::domain::card::{BillingDetails, CardConfirmation, CardPaymentMethod};
use crate::domain::ports::CardClientArc;
use crate::domain::provider::Provider;
use crate::domain::view::ButtonView;
use crate::error::{DispatchError, Result};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Confirms a card payment in place with the processor's card element.
pub struct CardHandler {
    ctx: ButtonContext,
    client: Option<CardClientArc>,
    timeout: Duration,
}

impl CardHandler {
    pub fn new(ctx: ButtonContext, client: Option<CardClientArc>, timeout: Duration) -> Self {
        Self {
            ctx,
            client,
            timeout,
        }
    }

    pub fn context(&self) -> &ButtonContext {
        &self.ctx
    }

    fn client_ready(&self) -> bool {
        self.client.as_ref().is_some_and(|c| c.elements_ready())
    }

    #[instrument(skip(self), fields(cart_id = %self.ctx.cart.id))]
    pub async fn press(&self) -> Result<Outcome> {
        if self.ctx.not_ready {
            return Ok(Outcome::Ignored);
        }
        self.ctx.state.begin()?;

        let Some(client) = self.client.as_ref().filter(|c| c.elements_ready()) else {
            debug!("Card client not initialized, aborting");
            self.ctx.state.finish();
            return Ok(Outcome::Aborted);
        };
        let Some(card) = client.card_element() else {
            debug!("Card element not mounted, aborting");
            self.ctx.state.finish();
            return Ok(Outcome::Aborted);
        };

        let Some(secret) = self
            .ctx
            .cart
            .pending_session()
            .and_then(|s| s.data.client_secret())
        else {
            let message = DispatchError::MissingSessionData("client_secret").to_string();
            self.ctx.state.fail(message.clone());
            return Ok(Outcome::Rejected { message });
        };

        let payment_method = CardPaymentMethod {
            card,
            billing_details: BillingDetails::from_cart(&self.ctx.cart),
        };
        let confirmation = match tokio::time::timeout(
            self.timeout,
            client.confirm_card_payment(secret, payment_method),
        )
        .await
        {
            Ok(Ok(confirmation)) => confirmation,
            Ok(Err(e)) => return Ok(self.reject(e.to_string())),
            Err(_) => {
                let e = DispatchError::Timeout {
                    operation: "Confirming the card payment",
                };
                return Ok(self.reject(e.to_string()));
            }
        };

        Ok(self.settle(confirmation).await)
    }

    async fn settle(&self, confirmation: CardConfirmation) -> Outcome {
        if let Some(error) = confirmation.error {
            let message = error.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            let settled = error
                .payment_intent
                .as_ref()
                .is_some_and(|pi| pi.status.is_settled());

            if settled {
                // The processor reports an error for an intent that is already
                // authorized or captured: the order goes through and the message
                // stays on screen.
                warn!(error = %message, "Card confirmation errored on a settled payment intent");
                self.ctx.state.show_error(message);
                return self.ctx.placer.complete(&self.ctx.cart.id, &self.ctx.state).await;
            }
            return self.reject(message);
        }

        match confirmation.payment_intent {
            Some(intent) if intent.status.is_settled() => {
                self.ctx.placer.complete(&self.ctx.cart.id, &self.ctx.state).await
            }
            intent => {
                debug!(status = ?intent.map(|i| i.status), "Payment intent not settled yet");
                self.ctx.state.finish();
                Outcome::AwaitingProvider
            }
        }
    }

    fn reject(&self, message: String) -> Outcome {
        warn!(error = %message, "Card confirmation rejected");
        self.ctx.state.fail(message.clone());
        Outcome::Rejected { message }
    }

    pub fn view(&self) -> ButtonView {
        self.ctx
            .place_order_view(Provider::Stripe.error_test_id(), !self.client_ready())
    }
}
