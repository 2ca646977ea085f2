use super::{ButtonContext, UNKNOWN_ERROR};
use crate::application::placement::Outcome;
use crate::domain::ports::WalletSdkArc;
use crate::domain::provider::Provider;
use crate::domain::view::{ButtonView, Control};
use crate::domain::wallet::ScriptState;
use crate::error::{DispatchError, Result};
use std::time::Duration;
use tracing::{instrument, warn};

/// Bridges the wallet SDK's own button to order placement.
pub struct WalletHandler {
    ctx: ButtonContext,
    sdk: Option<WalletSdkArc>,
    timeout: Duration,
}

impl WalletHandler {
    pub fn new(ctx: ButtonContext, sdk: Option<WalletSdkArc>, timeout: Duration) -> Self {
        Self { ctx, sdk, timeout }
    }

    pub fn context(&self) -> &ButtonContext {
        &self.ctx
    }

    /// A missing SDK is treated as a script that has not loaded yet.
    pub fn script_state(&self) -> ScriptState {
        self.sdk
            .as_ref()
            .map_or(ScriptState::Pending, |sdk| sdk.script_state())
    }

    /// The wallet's "create order" callback: the order id stored on the
    /// pending session.
    pub fn create_order(&self) -> Result<String> {
        self.ctx
            .cart
            .pending_session()
            .and_then(|s| s.data.external_order_id())
            .map(str::to_owned)
            .ok_or(DispatchError::MissingSessionData("id"))
    }

    /// The wallet's approval callback.
    #[instrument(skip(self), fields(cart_id = %self.ctx.cart.id))]
    pub async fn approve(&self) -> Result<Outcome> {
        let Some(sdk) = self.sdk.as_ref() else {
            return Ok(Outcome::Ignored);
        };
        if self.ctx.not_ready || sdk.script_state() != ScriptState::Resolved {
            return Ok(Outcome::Ignored);
        }
        self.ctx.state.begin()?;

        let order_id = match self.create_order() {
            Ok(id) => id,
            Err(e) => return Ok(self.reject(e.to_string())),
        };

        let outcome = match tokio::time::timeout(self.timeout, sdk.authorize(&order_id)).await {
            Ok(Ok(authorization)) if authorization.is_completed() => {
                self.ctx.placer.complete(&self.ctx.cart.id, &self.ctx.state).await
            }
            Ok(Ok(authorization)) => self.reject(format!(
                "An error occurred, status: {}",
                authorization.status
            )),
            Ok(Err(e)) => {
                warn!(error = %e, "Wallet authorization failed");
                self.reject(UNKNOWN_ERROR.to_string())
            }
            Err(_) => {
                warn!("Wallet authorization timed out");
                self.reject(UNKNOWN_ERROR.to_string())
            }
        };
        Ok(outcome)
    }

    fn reject(&self, message: String) -> Outcome {
        self.ctx.state.fail(message.clone());
        Outcome::Rejected { message }
    }

    pub fn view(&self) -> ButtonView {
        match self.script_state() {
            ScriptState::Pending => ButtonView::spinner(),
            ScriptState::Rejected => ButtonView::hidden(),
            ScriptState::Resolved => {
                let submission = self.ctx.state.snapshot();
                ButtonView {
                    control: Control::WalletButton,
                    label: None,
                    disabled: self.ctx.not_ready || submission.submitting,
                    loading: false,
                    test_id: Some(self.ctx.test_id.clone()),
                    error: submission.error,
                    error_test_id: Some(Provider::PayPal.error_test_id()),
                }
            }
        }
    }
}
