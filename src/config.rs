use crate::domain::provider::Provider;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for the payment dispatcher. Every field has a default, so an
/// empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Upper bound for any single call to a provider or the order service.
    pub call_timeout_ms: u64,
    /// Total attempts for order placement when the order service times out.
    pub order_placement_attempts: u32,
    /// Gateway order status meaning the shopper has paid.
    pub paid_status: String,
    pub redirect_resume: RedirectResume,
}

/// Whether a redirect gateway resumes automatically on return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectResume {
    pub fawry: bool,
    pub fawaterak: bool,
}

impl Default for RedirectResume {
    fn default() -> Self {
        Self {
            fawry: true,
            fawaterak: true,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 30_000,
            order_placement_attempts: 2,
            paid_status: "PAID".to_string(),
            redirect_resume: RedirectResume::default(),
        }
    }
}

impl DispatchConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Never less than one attempt.
    pub fn placement_attempts(&self) -> u32 {
        self.order_placement_attempts.max(1)
    }

    pub fn resume_enabled(&self, provider: Provider) -> bool {
        match provider {
            Provider::Fawry => self.redirect_resume.fawry,
            Provider::Fawaterak => self.redirect_resume.fawaterak,
            Provider::Stripe | Provider::Manual | Provider::PayPal => false,
        }
    }
}
