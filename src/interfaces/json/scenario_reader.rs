use crate::config::DispatchConfig;
use crate::domain::card::CardElement;
use crate::domain::cart::Cart;
use crate::domain::wallet::ScriptState;
use crate::error::Result;
use crate::infrastructure::scripted::{
    CardScript, OrderScript, ScriptedCardClient, ScriptedWallet, WalletScript,
};
use serde::Deserialize;
use std::io::Read;

/// A checkout replay: the cart plus how each external service answers.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub cart: Cart,
    #[serde(default)]
    pub order: OrderScript,
    /// Absent when the card client has not initialized.
    #[serde(default)]
    pub card: Option<CardScenario>,
    /// Absent when the wallet script is still loading.
    #[serde(default)]
    pub wallet: Option<WalletScenario>,
    /// Query string of the current page.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub config: DispatchConfig,
}

fn default_true() -> bool {
    true
}

fn default_card_element() -> Option<CardElement> {
    Some(CardElement("card".to_string()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardScenario {
    #[serde(default = "default_true")]
    pub elements_ready: bool,
    #[serde(default = "default_card_element")]
    pub card_element: Option<CardElement>,
    pub response: CardScript,
}

impl CardScenario {
    pub fn client(&self) -> ScriptedCardClient {
        ScriptedCardClient::new(self.response.clone())
            .with_elements_ready(self.elements_ready)
            .with_card_element(self.card_element.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletScenario {
    pub script_state: ScriptState,
    pub response: WalletScript,
}

impl WalletScenario {
    pub fn sdk(&self) -> ScriptedWallet {
        ScriptedWallet::new(self.script_state, self.response.clone())
    }
}

/// Reads a [`Scenario`] from a JSON source.
pub struct ScenarioReader<R: Read> {
    source: R,
}

impl<R: Read> ScenarioReader<R> {
    /// Creates a new `ScenarioReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<Scenario> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
