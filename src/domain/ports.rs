use super::card::{CardConfirmation, CardElement, CardPaymentMethod};
use super::wallet::{Authorization, ScriptState};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Confirmation returned by the order service once a cart became an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
}

/// Cart/order backend. Turning a cart into an order must be safe to call
/// again for a cart whose payment was already confirmed.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn place_order(&self, cart_id: &str) -> Result<OrderReceipt>;
}

/// Card processor client plus its element registry.
#[async_trait]
pub trait CardClient: Send + Sync {
    /// Whether the element registry has been initialized.
    fn elements_ready(&self) -> bool;
    /// The mounted card element, if any.
    fn card_element(&self) -> Option<CardElement>;
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        payment_method: CardPaymentMethod,
    ) -> Result<CardConfirmation>;
}

#[async_trait]
pub trait WalletSdk: Send + Sync {
    fn script_state(&self) -> ScriptState;
    async fn authorize(&self, order_id: &str) -> Result<Authorization>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    /// The current query string, without the leading `?`.
    fn current_query(&self) -> String;
    /// Sends the browser to an absolute URL.
    async fn push(&self, url: &str) -> Result<()>;
}

/// Remembers which gateway reference numbers were already acted upon.
#[async_trait]
pub trait ReferenceLedger: Send + Sync {
    /// Claims a reference number, returning `true` the first time it is seen.
    async fn observe(&self, reference: &str) -> Result<bool>;
    /// Gives a claimed reference back, so a later return can act on it again.
    async fn release(&self, reference: &str) -> Result<()>;
    async fn contains(&self, reference: &str) -> Result<bool>;
}

pub type OrderServiceArc = Arc<dyn OrderService>;
pub type CardClientArc = Arc<dyn CardClient>;
pub type WalletSdkArc = Arc<dyn WalletSdk>;
pub type NavigatorArc = Arc<dyn Navigator>;
pub type ReferenceLedgerArc = Arc<dyn ReferenceLedger>;
