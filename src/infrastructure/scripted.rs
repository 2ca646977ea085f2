//! Adapters that answer with pre-recorded responses.
//!
//! They stand in for the real cart backend and provider SDKs when a checkout
//! is replayed from a scenario file, and they count every call so a replay
//! can report what was reached.

use crate::domain::card::{CardConfirmation, CardElement, CardPaymentMethod};
use crate::domain::ports::{CardClient, Navigator, OrderReceipt, OrderService, WalletSdk};
use crate::domain::wallet::{Authorization, ScriptState};
use crate::error::{DispatchError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Delay before the `attempt`-th call answers. The last entry repeats.
fn delay_for(delays: &[u64], attempt: usize) -> Duration {
    delays
        .get(attempt)
        .or_else(|| delays.last())
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OrderScript {
    Placed { order_id: String },
    Failed { message: String },
}

impl Default for OrderScript {
    fn default() -> Self {
        OrderScript::Placed {
            order_id: "order_01".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedOrderService {
    script: OrderScript,
    delays_ms: Vec<u64>,
    // Calls answered with an error before the script applies.
    failures: Option<(usize, String)>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedOrderService {
    pub fn new(script: OrderScript) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn placed(order_id: &str) -> Self {
        Self::new(OrderScript::Placed {
            order_id: order_id.to_string(),
        })
    }

    pub fn failing(message: &str) -> Self {
        Self::new(OrderScript::Failed {
            message: message.to_string(),
        })
    }

    pub fn with_delays_ms(mut self, delays_ms: Vec<u64>) -> Self {
        self.delays_ms = delays_ms;
        self
    }

    /// Fails the first `count` calls with `message`, then follows the script.
    pub fn failing_first(mut self, count: usize, message: &str) -> Self {
        self.failures = Some((count, message.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderService for ScriptedOrderService {
    async fn place_order(&self, _cart_id: &str) -> Result<OrderReceipt> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        pause(delay_for(&self.delays_ms, attempt)).await;
        let failure = self.failures.as_ref().filter(|(count, _)| attempt < *count);
        if let Some((_, message)) = failure {
            return Err(DispatchError::OrderPlacement(message.clone()));
        }
        match &self.script {
            OrderScript::Placed { order_id } => Ok(OrderReceipt {
                order_id: order_id.clone(),
            }),
            OrderScript::Failed { message } => Err(DispatchError::OrderPlacement(message.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CardScript {
    Confirmation(CardConfirmation),
    Failure { message: String },
}

/// Card client whose confirmation answers from a script.
#[derive(Debug, Clone)]
pub struct ScriptedCardClient {
    elements_ready: bool,
    card_element: Option<CardElement>,
    script: CardScript,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<(String, CardPaymentMethod)>>>,
}

impl ScriptedCardClient {
    pub fn new(script: CardScript) -> Self {
        Self {
            elements_ready: true,
            card_element: Some(CardElement("card".to_string())),
            script,
            delay: Duration::ZERO,
            calls: Arc::default(),
            last_request: Arc::default(),
        }
    }

    pub fn confirming(confirmation: CardConfirmation) -> Self {
        Self::new(CardScript::Confirmation(confirmation))
    }

    pub fn with_elements_ready(mut self, ready: bool) -> Self {
        self.elements_ready = ready;
        self
    }

    pub fn with_card_element(mut self, element: Option<CardElement>) -> Self {
        self.card_element = element;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Client secret and payment method of the latest confirmation.
    pub fn last_request(&self) -> Option<(String, CardPaymentMethod)> {
        lock(&self.last_request).clone()
    }
}

#[async_trait]
impl CardClient for ScriptedCardClient {
    fn elements_ready(&self) -> bool {
        self.elements_ready
    }

    fn card_element(&self) -> Option<CardElement> {
        self.card_element.clone()
    }

    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        payment_method: CardPaymentMethod,
    ) -> Result<CardConfirmation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_request) = Some((client_secret.to_string(), payment_method));
        pause(self.delay).await;
        match &self.script {
            CardScript::Confirmation(confirmation) => Ok(confirmation.clone()),
            CardScript::Failure { message } => Err(DispatchError::Provider(message.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WalletScript {
    Authorization(Authorization),
    Failure { message: String },
}

#[derive(Debug, Clone)]
pub struct ScriptedWallet {
    script_state: ScriptState,
    script: WalletScript,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    authorized_orders: Arc<Mutex<Vec<String>>>,
}

impl ScriptedWallet {
    pub fn new(script_state: ScriptState, script: WalletScript) -> Self {
        Self {
            script_state,
            script,
            delay: Duration::ZERO,
            calls: Arc::default(),
            authorized_orders: Arc::default(),
        }
    }

    pub fn authorizing(status: &str) -> Self {
        Self::new(
            ScriptState::Resolved,
            WalletScript::Authorization(Authorization {
                status: status.to_string(),
            }),
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn authorized_orders(&self) -> Vec<String> {
        lock(&self.authorized_orders).clone()
    }
}

#[async_trait]
impl WalletSdk for ScriptedWallet {
    fn script_state(&self) -> ScriptState {
        self.script_state
    }

    async fn authorize(&self, order_id: &str) -> Result<Authorization> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.authorized_orders).push(order_id.to_string());
        pause(self.delay).await;
        match &self.script {
            WalletScript::Authorization(authorization) => Ok(authorization.clone()),
            WalletScript::Failure { message } => Err(DispatchError::Provider(message.clone())),
        }
    }
}

/// Navigator that records pushes instead of leaving the page.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    query: Arc<Mutex<String>>,
    pushed: Arc<Mutex<Vec<String>>>,
    push_error: Option<String>,
}

impl RecordingNavigator {
    pub fn new(query: &str) -> Self {
        Self {
            query: Arc::new(Mutex::new(query.to_string())),
            ..Default::default()
        }
    }

    pub fn failing_push(mut self, message: &str) -> Self {
        self.push_error = Some(message.to_string());
        self
    }

    pub fn set_query(&self, query: &str) {
        *lock(&self.query) = query.to_string();
    }

    pub fn pushed(&self) -> Vec<String> {
        lock(&self.pushed).clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    fn current_query(&self) -> String {
        lock(&self.query).clone()
    }

    async fn push(&self, url: &str) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(DispatchError::Navigation(message.clone()));
        }
        lock(&self.pushed).push(url.to_string());
        Ok(())
    }
}
