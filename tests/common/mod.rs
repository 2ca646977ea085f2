#![allow(dead_code)]

use checkout_dispatch::application::dispatcher::PaymentDispatcher;
use checkout_dispatch::config::DispatchConfig;
use checkout_dispatch::domain::cart::{
    Address, Cart, PaymentCollection, PaymentSession, SessionData, SessionStatus, ShippingMethod,
};
use checkout_dispatch::infrastructure::in_memory::InMemoryReferenceLedger;
use checkout_dispatch::infrastructure::scripted::{RecordingNavigator, ScriptedOrderService};
use serde_json::Value;
use std::sync::Arc;

pub const STRIPE: &str = "pp_stripe_stripe";
pub const MANUAL: &str = "pp_system_default";
pub const PAYPAL: &str = "pp_paypal_paypal";
pub const FAWRY: &str = "pp_fawry_fawry";
pub const FAWATERAK: &str = "pp_fawaterak_fawaterak";

pub fn ready_cart() -> Cart {
    Cart {
        id: "cart_01".to_string(),
        email: Some("shopper@example.com".to_string()),
        shipping_address: Some(Address {
            first_name: Some("Nour".into()),
            last_name: Some("Adel".into()),
            address_1: Some("12 Tahrir St".into()),
            city: Some("Cairo".into()),
            country_code: Some("eg".into()),
            ..Default::default()
        }),
        billing_address: Some(Address {
            first_name: Some("Nour".into()),
            last_name: Some("Adel".into()),
            address_1: Some("12 Tahrir St".into()),
            city: Some("Cairo".into()),
            country_code: Some("eg".into()),
            postal_code: Some("11511".into()),
            phone: Some("+201000000000".into()),
            ..Default::default()
        }),
        shipping_methods: vec![ShippingMethod {
            id: "sm_01".to_string(),
            name: Some("Standard".to_string()),
        }],
        ..Default::default()
    }
}

/// A ready cart with a single pending session for `provider_id`.
pub fn cart_with_session(provider_id: &str, data: Value) -> Cart {
    let data = match data {
        Value::Object(map) => SessionData(map),
        _ => SessionData::default(),
    };
    Cart {
        payment_collection: Some(PaymentCollection {
            payment_sessions: vec![PaymentSession {
                id: "ps_01".to_string(),
                provider_id: provider_id.to_string(),
                status: SessionStatus::Pending,
                data,
            }],
        }),
        ..ready_cart()
    }
}

/// External services shared by a test, kept concrete so calls can be counted.
pub struct Harness {
    pub orders: Arc<ScriptedOrderService>,
    pub navigator: Arc<RecordingNavigator>,
    pub ledger: Arc<InMemoryReferenceLedger>,
}

impl Harness {
    pub fn new(orders: ScriptedOrderService) -> Self {
        Self {
            orders: Arc::new(orders),
            navigator: Arc::new(RecordingNavigator::default()),
            ledger: Arc::new(InMemoryReferenceLedger::new()),
        }
    }

    pub fn placing() -> Self {
        Self::new(ScriptedOrderService::placed("order_01"))
    }

    pub fn dispatcher(&self) -> PaymentDispatcher {
        self.dispatcher_with(DispatchConfig::default())
    }

    pub fn dispatcher_with(&self, config: DispatchConfig) -> PaymentDispatcher {
        PaymentDispatcher::new(
            self.orders.clone(),
            self.navigator.clone(),
            self.ledger.clone(),
            config,
        )
    }
}
