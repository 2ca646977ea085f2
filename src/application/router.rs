use crate::domain::cart::Cart;
use crate::domain::provider::Provider;
use serde::Serialize;

/// Which confirmation flow a cart goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum Route {
    GiftCard,
    Provider(Provider),
    /// No usable provider: the disabled placeholder is shown.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Routing {
    pub not_ready: bool,
    pub route: Route,
}

/// Selects the flow for a cart. Pure: reads the cart and nothing else.
///
/// Routing looks at the first payment session only; a cart fully covered by
/// gift cards skips provider routing altogether.
pub fn route(cart: &Cart) -> Routing {
    let not_ready = !cart.is_ready();

    let route = if cart.paid_by_gift_card() {
        Route::GiftCard
    } else {
        let provider_id = cart.first_session().map(|s| s.provider_id.as_str());
        match Provider::classify(provider_id) {
            Some(provider) => Route::Provider(provider),
            None => Route::Unavailable,
        }
    };

    Routing { not_ready, route }
}
