use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A postal address attached to a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    pub code: String,
}

/// Lifecycle status of a payment session, as reported by the cart service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Authorized,
    Captured,
    RequiresMore,
    Error,
    Canceled,
}

/// Provider-specific data stored on a payment session.
///
/// The cart service treats it as an opaque object; only a few well-known keys
/// are read here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData(pub Map<String, Value>);

impl SessionData {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Card processor client secret.
    pub fn client_secret(&self) -> Option<&str> {
        self.get_str("client_secret")
    }

    /// Hosted checkout page of a redirect gateway.
    pub fn checkout_url(&self) -> Option<&str> {
        self.get_str("checkoutUrl")
    }

    /// Order identifier held by an external wallet.
    pub fn external_order_id(&self) -> Option<&str> {
        self.get_str("id")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: String,
    pub provider_id: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub data: SessionData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentCollection {
    #[serde(default)]
    pub payment_sessions: Vec<PaymentSession>,
}

/// A shopper's cart as read from the cart service.
///
/// The dispatcher never mutates a cart; it only inspects it and asks the
/// order service to turn it into an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,
    #[serde(default)]
    pub payment_collection: Option<PaymentCollection>,
    #[serde(default)]
    pub gift_cards: Vec<GiftCard>,
    #[serde(default)]
    pub total: Decimal,
}

impl Cart {
    /// A cart is ready to pay once it has both addresses, an email and at
    /// least one shipping method.
    pub fn is_ready(&self) -> bool {
        self.shipping_address.is_some()
            && self.billing_address.is_some()
            && self.email.is_some()
            && !self.shipping_methods.is_empty()
    }

    pub fn payment_sessions(&self) -> &[PaymentSession] {
        self.payment_collection
            .as_ref()
            .map(|c| c.payment_sessions.as_slice())
            .unwrap_or_default()
    }

    /// The session used for provider routing: the first one in the collection.
    pub fn first_session(&self) -> Option<&PaymentSession> {
        self.payment_sessions().first()
    }

    /// The session a confirmation flow acts on.
    pub fn pending_session(&self) -> Option<&PaymentSession> {
        self.payment_sessions()
            .iter()
            .find(|s| s.status == SessionStatus::Pending)
    }

    pub fn paid_by_gift_card(&self) -> bool {
        !self.gift_cards.is_empty() && self.total == Decimal::ZERO
    }
}
