mod common;

use checkout_dispatch::application::placement::Outcome;
use checkout_dispatch::domain::card::{CardConfirmation, CardError, IntentStatus, PaymentIntent};
use checkout_dispatch::infrastructure::scripted::{
    CardScript, ScriptedCardClient, ScriptedOrderService,
};
use common::*;
use serde_json::json;
use std::sync::Arc;

fn stripe_cart() -> checkout_dispatch::domain::cart::Cart {
    cart_with_session(STRIPE, json!({ "client_secret": "pi_123_secret_456" }))
}

fn intent(status: IntentStatus) -> Option<PaymentIntent> {
    Some(PaymentIntent { id: None, status })
}

#[tokio::test]
async fn test_error_on_succeeded_intent_still_places_order() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation {
        error: Some(CardError {
            message: Some("Payment intent in unexpected state".into()),
            code: None,
            payment_intent: intent(IntentStatus::Succeeded),
        }),
        payment_intent: None,
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client.clone())
        .mount(stripe_cart(), "submit-order-button");

    let outcome = button.press().await.unwrap();

    assert_eq!(
        outcome,
        Outcome::OrderPlaced {
            order_id: "order_01".into()
        }
    );
    assert_eq!(harness.orders.calls(), 1);
    let view = button.view();
    assert_eq!(
        view.error.as_deref(),
        Some("Payment intent in unexpected state")
    );
    assert!(!view.loading);
}

#[tokio::test]
async fn test_error_on_requires_capture_intent_places_order() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation {
        error: Some(CardError {
            message: Some("stale".into()),
            code: None,
            payment_intent: intent(IntentStatus::RequiresCapture),
        }),
        payment_intent: None,
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client)
        .mount(stripe_cart(), "submit-order-button");

    button.press().await.unwrap();
    assert_eq!(harness.orders.calls(), 1);
}

#[tokio::test]
async fn test_declined_card_surfaces_message_without_order() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation {
        error: Some(CardError {
            message: Some("card_declined".into()),
            ..Default::default()
        }),
        payment_intent: None,
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client)
        .mount(stripe_cart(), "submit-order-button");

    let outcome = button.press().await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Rejected {
            message: "card_declined".into()
        }
    );
    assert_eq!(harness.orders.calls(), 0);
    let view = button.view();
    assert_eq!(view.error.as_deref(), Some("card_declined"));
    assert_eq!(view.error_test_id, Some("stripe-payment-error-message"));
    assert!(!view.disabled);
}

#[tokio::test]
async fn test_succeeded_intent_places_order() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation {
        error: None,
        payment_intent: intent(IntentStatus::Succeeded),
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client.clone())
        .mount(stripe_cart(), "submit-order-button");

    button.press().await.unwrap();

    assert_eq!(harness.orders.calls(), 1);
    assert_eq!(button.view().error, None);

    let (secret, method) = client.last_request().unwrap();
    assert_eq!(secret, "pi_123_secret_456");
    assert_eq!(method.billing_details.name, "Nour Adel");
    assert_eq!(method.billing_details.address.postal_code.as_deref(), Some("11511"));
    assert_eq!(method.billing_details.address.line2, None);
    assert_eq!(method.billing_details.email.as_deref(), Some("shopper@example.com"));
    assert_eq!(method.billing_details.phone.as_deref(), Some("+201000000000"));
}

#[tokio::test]
async fn test_unsettled_intent_waits_for_provider() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation {
        error: None,
        payment_intent: intent(IntentStatus::Processing),
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client)
        .mount(stripe_cart(), "submit-order-button");

    assert_eq!(button.press().await.unwrap(), Outcome::AwaitingProvider);
    assert_eq!(harness.orders.calls(), 0);
    assert!(!button.view().loading);
}

#[tokio::test]
async fn test_missing_client_aborts_silently() {
    let harness = Harness::placing();
    let button = harness.dispatcher().mount(stripe_cart(), "submit-order-button");

    assert!(button.view().disabled);
    assert_eq!(button.press().await.unwrap(), Outcome::Aborted);

    let view = button.view();
    assert_eq!(view.error, None);
    assert!(!view.loading);
}

#[tokio::test]
async fn test_uninitialized_elements_or_card_abort_silently() {
    let harness = Harness::placing();

    let not_ready = Arc::new(
        ScriptedCardClient::confirming(CardConfirmation::default()).with_elements_ready(false),
    );
    let button = harness
        .dispatcher()
        .with_card_client(not_ready.clone())
        .mount(stripe_cart(), "submit-order-button");
    assert!(button.view().disabled);
    assert_eq!(button.press().await.unwrap(), Outcome::Aborted);
    assert_eq!(not_ready.calls(), 0);

    let no_card = Arc::new(
        ScriptedCardClient::confirming(CardConfirmation::default()).with_card_element(None),
    );
    let button = harness
        .dispatcher()
        .with_card_client(no_card.clone())
        .mount(stripe_cart(), "submit-order-button");
    assert_eq!(button.press().await.unwrap(), Outcome::Aborted);
    assert_eq!(no_card.calls(), 0);
    assert_eq!(button.view().error, None);
}

#[tokio::test]
async fn test_transport_failure_is_surfaced() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::new(CardScript::Failure {
        message: "Network request failed".into(),
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client)
        .mount(stripe_cart(), "submit-order-button");

    button.press().await.unwrap();
    assert_eq!(button.view().error.as_deref(), Some("Network request failed"));
    assert_eq!(harness.orders.calls(), 0);
}

#[tokio::test]
async fn test_missing_client_secret_is_rejected() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation::default()));
    let button = harness
        .dispatcher()
        .with_card_client(client.clone())
        .mount(cart_with_session(STRIPE, json!({})), "submit-order-button");

    assert!(matches!(
        button.press().await.unwrap(),
        Outcome::Rejected { .. }
    ));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_order_placement_failure_re_enables_button() {
    let harness = Harness::new(ScriptedOrderService::failing("Cart is already completed"));
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation {
        error: None,
        payment_intent: intent(IntentStatus::Succeeded),
    }));
    let button = harness
        .dispatcher()
        .with_card_client(client)
        .mount(stripe_cart(), "submit-order-button");

    button.press().await.unwrap();

    let view = button.view();
    assert_eq!(view.error.as_deref(), Some("Cart is already completed"));
    assert!(!view.loading);
    assert!(!view.disabled);
}

#[tokio::test]
async fn test_not_ready_cart_never_confirms() {
    let harness = Harness::placing();
    let client = Arc::new(ScriptedCardClient::confirming(CardConfirmation::default()));
    let mut cart = stripe_cart();
    cart.email = None;
    let button = harness
        .dispatcher()
        .with_card_client(client.clone())
        .mount(cart, "submit-order-button");

    assert_eq!(button.press().await.unwrap(), Outcome::Ignored);
    assert_eq!(client.calls(), 0);
}
