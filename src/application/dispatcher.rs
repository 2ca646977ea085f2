use super::handlers::ButtonContext;
use super::handlers::card::CardHandler;
use super::handlers::manual::ManualHandler;
use super::handlers::redirect::RedirectHandler;
use super::handlers::wallet::WalletHandler;
use super::placement::{OrderPlacer, Outcome};
use super::router::{Route, Routing, route};
use crate::config::DispatchConfig;
use crate::domain::cart::Cart;
use crate::domain::ports::{
    CardClientArc, NavigatorArc, OrderServiceArc, ReferenceLedgerArc, WalletSdkArc,
};
use crate::domain::provider::Provider;
use crate::domain::view::ButtonView;
use crate::error::{DispatchError, Result};
use tokio::sync::watch;
use tracing::debug;

const GIFT_CARD_ERROR_TEST_ID: &str = "gift-card-payment-error-message";

/// Binds carts to their payment button.
///
/// Holds the external services; the card client and wallet SDK are optional
/// because they initialize asynchronously on the client.
pub struct PaymentDispatcher {
    orders: OrderServiceArc,
    navigator: NavigatorArc,
    ledger: ReferenceLedgerArc,
    card: Option<CardClientArc>,
    wallet: Option<WalletSdkArc>,
    config: DispatchConfig,
}

impl PaymentDispatcher {
    pub fn new(
        orders: OrderServiceArc,
        navigator: NavigatorArc,
        ledger: ReferenceLedgerArc,
        config: DispatchConfig,
    ) -> Self {
        Self {
            orders,
            navigator,
            ledger,
            card: None,
            wallet: None,
            config,
        }
    }

    pub fn with_card_client(mut self, client: CardClientArc) -> Self {
        self.card = Some(client);
        self
    }

    pub fn with_wallet(mut self, sdk: WalletSdkArc) -> Self {
        self.wallet = Some(sdk);
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Routes the cart and builds the matching button.
    pub fn mount(&self, cart: Cart, test_id: &str) -> PaymentButton {
        let routing = route(&cart);
        debug!(cart_id = %cart.id, ?routing, "Mounting payment button");

        let placer = OrderPlacer::new(
            self.orders.clone(),
            self.config.call_timeout(),
            self.config.placement_attempts(),
        );
        let ctx = ButtonContext::new(cart, routing.not_ready, test_id, placer);
        let timeout = self.config.call_timeout();

        let handler = match routing.route {
            Route::Unavailable => Handler::Unavailable,
            Route::GiftCard => {
                Handler::GiftCard(ManualHandler::new(ctx, "gift card", GIFT_CARD_ERROR_TEST_ID))
            }
            Route::Provider(Provider::Stripe) => {
                Handler::Card(CardHandler::new(ctx, self.card.clone(), timeout))
            }
            Route::Provider(Provider::Manual) => Handler::Manual(ManualHandler::new(
                ctx,
                Provider::Manual.as_str(),
                Provider::Manual.error_test_id(),
            )),
            Route::Provider(Provider::PayPal) => {
                Handler::Wallet(WalletHandler::new(ctx, self.wallet.clone(), timeout))
            }
            Route::Provider(provider @ (Provider::Fawry | Provider::Fawaterak)) => {
                Handler::Redirect(RedirectHandler::new(
                    ctx,
                    provider,
                    self.navigator.clone(),
                    self.ledger.clone(),
                    self.config.resume_enabled(provider),
                    self.config.paid_status.clone(),
                ))
            }
        };

        PaymentButton { routing, handler }
    }
}

pub enum Handler {
    Card(CardHandler),
    Manual(ManualHandler),
    GiftCard(ManualHandler),
    Wallet(WalletHandler),
    Redirect(RedirectHandler),
    Unavailable,
}

/// A mounted payment button: the routing decision plus the handler that
/// drives it.
pub struct PaymentButton {
    routing: Routing,
    handler: Handler,
}

impl PaymentButton {
    pub fn routing(&self) -> Routing {
        self.routing
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    fn name(&self) -> &'static str {
        match &self.handler {
            Handler::Card(_) => Provider::Stripe.as_str(),
            Handler::Manual(h) | Handler::GiftCard(h) => h.name(),
            Handler::Wallet(_) => Provider::PayPal.as_str(),
            Handler::Redirect(h) => h.provider().as_str(),
            Handler::Unavailable => "placeholder",
        }
    }

    fn unsupported(&self, action: &'static str) -> DispatchError {
        DispatchError::UnsupportedAction {
            action,
            handler: self.name(),
        }
    }

    pub fn view(&self) -> ButtonView {
        match &self.handler {
            Handler::Card(h) => h.view(),
            Handler::Manual(h) | Handler::GiftCard(h) => h.view(),
            Handler::Wallet(h) => h.view(),
            Handler::Redirect(h) => h.view(),
            Handler::Unavailable => ButtonView::placeholder(),
        }
    }

    /// Shopper clicked "Place order".
    pub async fn press(&self) -> Result<Outcome> {
        match &self.handler {
            Handler::Card(h) => h.press().await,
            Handler::Manual(h) | Handler::GiftCard(h) => h.press().await,
            Handler::Redirect(h) => h.press().await,
            Handler::Unavailable => Ok(Outcome::Ignored),
            Handler::Wallet(_) => Err(self.unsupported("press")),
        }
    }

    /// The wallet SDK's "create order" callback.
    pub fn create_order(&self) -> Result<String> {
        match &self.handler {
            Handler::Wallet(h) => h.create_order(),
            _ => Err(self.unsupported("create_order")),
        }
    }

    /// The wallet SDK's approval callback.
    pub async fn approve(&self) -> Result<Outcome> {
        match &self.handler {
            Handler::Wallet(h) => h.approve().await,
            _ => Err(self.unsupported("approve")),
        }
    }

    /// Query string changed. Only redirect gateways react.
    pub async fn resume(&self, query: &str) -> Result<Outcome> {
        match &self.handler {
            Handler::Redirect(h) => h.resume(query).await,
            _ => Ok(Outcome::Ignored),
        }
    }

    /// Initial-load resume with the current page's query string.
    pub async fn resume_current(&self) -> Result<Outcome> {
        match &self.handler {
            Handler::Redirect(h) => h.resume_current().await,
            _ => Ok(Outcome::Ignored),
        }
    }

    /// Subscribes a redirect gateway to query changes. Other buttons return
    /// immediately.
    pub async fn watch(&self, queries: watch::Receiver<String>) {
        if let Handler::Redirect(h) = &self.handler {
            h.watch(queries).await;
        }
    }
}
