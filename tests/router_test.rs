mod common;

use checkout_dispatch::application::router::{Route, route};
use checkout_dispatch::domain::provider::Provider;
use checkout_dispatch::domain::view::{Control, PLACE_ORDER_LABEL, SELECT_METHOD_LABEL};
use checkout_dispatch::infrastructure::scripted::ScriptedWallet;
use common::*;
use serde_json::json;
use std::sync::Arc;

fn not_ready_variants(provider_id: &str) -> Vec<checkout_dispatch::domain::cart::Cart> {
    let base = cart_with_session(provider_id, json!({}));

    let mut no_shipping = base.clone();
    no_shipping.shipping_address = None;
    let mut no_billing = base.clone();
    no_billing.billing_address = None;
    let mut no_email = base.clone();
    no_email.email = None;
    let mut no_methods = base;
    no_methods.shipping_methods.clear();

    vec![no_shipping, no_billing, no_email, no_methods]
}

#[test]
fn test_not_ready_disables_every_provider() {
    let harness = Harness::placing();
    let dispatcher = harness
        .dispatcher()
        .with_wallet(Arc::new(ScriptedWallet::authorizing("COMPLETED")));

    for provider_id in [STRIPE, MANUAL, PAYPAL, FAWRY, FAWATERAK] {
        for cart in not_ready_variants(provider_id) {
            let button = dispatcher.mount(cart, "submit-order-button");
            assert!(button.routing().not_ready, "{provider_id} should not be ready");
            assert!(button.view().disabled, "{provider_id} button should be disabled");
        }
    }
}

#[test]
fn test_ready_cart_enables_manual_button() {
    let harness = Harness::placing();
    let button = harness
        .dispatcher()
        .mount(cart_with_session(MANUAL, json!({})), "submit-order-button");

    let view = button.view();
    assert!(!button.routing().not_ready);
    assert_eq!(view.control, Control::Button);
    assert_eq!(view.label, Some(PLACE_ORDER_LABEL));
    assert!(!view.disabled);
    assert!(!view.loading);
    assert_eq!(view.test_id.as_deref(), Some("submit-order-button"));
    assert_eq!(view.error_test_id, Some("manual-payment-error-message"));
}

#[test]
fn test_every_identifier_selects_exactly_one_route() {
    let cases = [
        (STRIPE, Route::Provider(Provider::Stripe)),
        (MANUAL, Route::Provider(Provider::Manual)),
        (PAYPAL, Route::Provider(Provider::PayPal)),
        (FAWRY, Route::Provider(Provider::Fawry)),
        (FAWATERAK, Route::Provider(Provider::Fawaterak)),
        ("pp_unknown", Route::Unavailable),
        ("", Route::Unavailable),
    ];

    for (provider_id, expected) in cases {
        let cart = cart_with_session(provider_id, json!({}));
        assert_eq!(route(&cart).route, expected, "{provider_id}");
    }
}

#[tokio::test]
async fn test_unavailable_route_renders_disabled_placeholder() {
    let harness = Harness::placing();
    let button = harness.dispatcher().mount(ready_cart(), "submit-order-button");

    let view = button.view();
    assert_eq!(view.control, Control::Placeholder);
    assert_eq!(view.label, Some(SELECT_METHOD_LABEL));
    assert!(view.disabled);

    button.press().await.unwrap();
    assert_eq!(harness.orders.calls(), 0);
}

#[tokio::test]
async fn test_wallet_callbacks_are_rejected_elsewhere() {
    let harness = Harness::placing();
    let button = harness
        .dispatcher()
        .mount(cart_with_session(MANUAL, json!({})), "submit-order-button");

    assert!(button.approve().await.is_err());
    assert!(button.create_order().is_err());
}
