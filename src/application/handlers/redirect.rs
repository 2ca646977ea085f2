use super::ButtonContext;
use crate::application::placement::Outcome;
use crate::domain::charge::ChargeResponse;
use crate::domain::ports::{NavigatorArc, ReferenceLedgerArc};
use crate::domain::provider::Provider;
use crate::domain::view::ButtonView;
use crate::error::{DispatchError, Result};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Hosted-checkout gateways: the shopper is sent to the gateway's page and
/// comes back with the charge result in the query string.
pub struct RedirectHandler {
    ctx: ButtonContext,
    provider: Provider,
    navigator: NavigatorArc,
    ledger: ReferenceLedgerArc,
    resume_enabled: bool,
    paid_status: String,
}

impl RedirectHandler {
    pub fn new(
        ctx: ButtonContext,
        provider: Provider,
        navigator: NavigatorArc,
        ledger: ReferenceLedgerArc,
        resume_enabled: bool,
        paid_status: impl Into<String>,
    ) -> Self {
        Self {
            ctx,
            provider,
            navigator,
            ledger,
            resume_enabled,
            paid_status: paid_status.into(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn context(&self) -> &ButtonContext {
        &self.ctx
    }

    /// Sends the shopper to the checkout URL stored on the pending session.
    /// The button stays busy until the page is re-entered.
    #[instrument(skip(self), fields(provider = %self.provider, cart_id = %self.ctx.cart.id))]
    pub async fn press(&self) -> Result<Outcome> {
        if self.ctx.not_ready {
            return Ok(Outcome::Ignored);
        }
        self.ctx.state.begin()?;

        let Some(url) = self
            .ctx
            .cart
            .pending_session()
            .and_then(|s| s.data.checkout_url())
            .map(str::to_owned)
        else {
            let message = DispatchError::MissingSessionData("checkoutUrl").to_string();
            self.ctx.state.fail(message.clone());
            return Ok(Outcome::Rejected { message });
        };

        debug!(%url, "Redirecting to hosted checkout");
        if let Err(e) = self.navigator.push(&url).await {
            let message = e.to_string();
            self.ctx.state.fail(message.clone());
            return Ok(Outcome::Rejected { message });
        }
        Ok(Outcome::Redirected { url })
    }

    /// Handles the query string the page was (re-)entered with.
    ///
    /// Queries without a reference number are not gateway returns and leave
    /// the state untouched. A paid reference places the order at most once,
    /// however many times it is observed. It is only kept as handled once the
    /// order is placed, so a failed placement can be retried by re-entering.
    #[instrument(skip(self), fields(provider = %self.provider, cart_id = %self.ctx.cart.id))]
    pub async fn resume(&self, query: &str) -> Result<Outcome> {
        if !self.resume_enabled {
            return Ok(Outcome::Ignored);
        }
        let Some(charge) = ChargeResponse::parse(query)? else {
            return Ok(Outcome::Ignored);
        };
        let reference = charge.reference_number();

        if !charge.is_paid(&self.paid_status) {
            if self.ledger.contains(reference).await? {
                debug!(reference, "Gateway reference already handled");
                return Ok(Outcome::Ignored);
            }
            debug!(reference, status = ?charge.order_status(), "Gateway return not paid yet");
            self.ctx.state.mark_submitting();
            return Ok(Outcome::AwaitingProvider);
        }

        if !self.ledger.observe(reference).await? {
            debug!(reference, "Gateway reference already handled");
            return Ok(Outcome::Ignored);
        }

        info!(reference, "Gateway reported payment, placing order");
        self.ctx.state.mark_submitting();
        let outcome = self.ctx.placer.complete(&self.ctx.cart.id, &self.ctx.state).await;
        if !matches!(outcome, Outcome::OrderPlaced { .. }) {
            // The shopper has paid; the next return with this reference retries.
            if let Err(e) = self.ledger.release(reference).await {
                warn!(reference, error = %e, "Failed to release gateway reference");
            }
        }
        Ok(outcome)
    }

    /// Resumes with the query string of the current page.
    pub async fn resume_current(&self) -> Result<Outcome> {
        let query = self.navigator.current_query();
        self.resume(&query).await
    }

    /// Resumes on the current value and then on every change, until the
    /// sending side goes away.
    pub async fn watch(&self, mut queries: watch::Receiver<String>) {
        loop {
            let query = queries.borrow_and_update().clone();
            if let Err(e) = self.resume(&query).await {
                warn!(error = %e, "Failed to resume gateway return");
            }
            if queries.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn view(&self) -> ButtonView {
        self.ctx.place_order_view(self.provider.error_test_id(), false)
    }
}
