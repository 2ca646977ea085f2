use serde::Serialize;
use std::fmt;

/// Payment providers the checkout knows how to confirm.
///
/// Classification is by identifier prefix. The order of `CLASSIFICATION`
/// decides the winner should two prefixes ever match the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Card processor, confirmed client-side with a tokenized card element.
    Stripe,
    /// Manual capture, used for test orders.
    Manual,
    /// Digital wallet with its own approval button.
    PayPal,
    /// Redirect gateway.
    Fawry,
    /// Redirect gateway.
    Fawaterak,
}

const CLASSIFICATION: [(&str, Provider); 5] = [
    ("pp_stripe_", Provider::Stripe),
    ("pp_system_default", Provider::Manual),
    ("pp_paypal", Provider::PayPal),
    ("pp_fawry", Provider::Fawry),
    ("pp_fawaterak", Provider::Fawaterak),
];

impl Provider {
    /// Classifies a provider identifier, returning `None` for anything unknown.
    pub fn classify(provider_id: Option<&str>) -> Option<Self> {
        let id = provider_id?;
        CLASSIFICATION
            .iter()
            .find(|(prefix, _)| id.starts_with(prefix))
            .map(|(_, provider)| *provider)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Stripe => "stripe",
            Provider::Manual => "manual",
            Provider::PayPal => "paypal",
            Provider::Fawry => "fawry",
            Provider::Fawaterak => "fawaterak",
        }
    }

    /// Test id of the inline error area rendered under the button.
    pub fn error_test_id(&self) -> &'static str {
        match self {
            Provider::Stripe => "stripe-payment-error-message",
            Provider::Manual => "manual-payment-error-message",
            Provider::PayPal => "paypal-payment-error-message",
            Provider::Fawry => "fawry-payment-error-message",
            Provider::Fawaterak => "fawaterak-payment-error-message",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_stripe(provider_id: Option<&str>) -> bool {
    Provider::classify(provider_id) == Some(Provider::Stripe)
}

pub fn is_manual(provider_id: Option<&str>) -> bool {
    Provider::classify(provider_id) == Some(Provider::Manual)
}

pub fn is_paypal(provider_id: Option<&str>) -> bool {
    Provider::classify(provider_id) == Some(Provider::PayPal)
}

pub fn is_fawry(provider_id: Option<&str>) -> bool {
    Provider::classify(provider_id) == Some(Provider::Fawry)
}

pub fn is_fawaterak(provider_id: Option<&str>) -> bool {
    Provider::classify(provider_id) == Some(Provider::Fawaterak)
}
