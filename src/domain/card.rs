use super::cart::Cart;
use serde::{Deserialize, Serialize};

/// Opaque handle to a mounted card input owned by the card processor's SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardElement(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
}

impl IntentStatus {
    /// Funds are authorized or captured; the order can be placed.
    pub fn is_settled(self) -> bool {
        matches!(self, IntentStatus::RequiresCapture | IntentStatus::Succeeded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    #[serde(default)]
    pub id: Option<String>,
    pub status: IntentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<PaymentIntent>,
}

/// Result of a client-side card confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfirmation {
    #[serde(default)]
    pub error: Option<CardError>,
    #[serde(default, rename = "paymentIntent", alias = "payment_intent")]
    pub payment_intent: Option<PaymentIntent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub city: Option<String>,
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub name: String,
    pub address: BillingAddress,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl BillingDetails {
    /// Builds billing details from the cart's billing address and email.
    /// Absent fields stay unset.
    pub fn from_cart(cart: &Cart) -> Self {
        let billing = cart.billing_address.clone().unwrap_or_default();
        let name = format!(
            "{} {}",
            billing.first_name.as_deref().unwrap_or_default(),
            billing.last_name.as_deref().unwrap_or_default()
        );

        Self {
            name,
            address: BillingAddress {
                city: billing.city,
                country: billing.country_code,
                line1: billing.address_1,
                line2: billing.address_2,
                postal_code: billing.postal_code,
                state: billing.province,
            },
            email: cart.email.clone(),
            phone: billing.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPaymentMethod {
    pub card: CardElement,
    pub billing_details: BillingDetails,
}
