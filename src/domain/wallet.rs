use serde::{Deserialize, Serialize};

pub const AUTHORIZATION_COMPLETED: &str = "COMPLETED";

/// Load state of the wallet's client script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptState {
    Pending,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub status: String,
}

impl Authorization {
    pub fn is_completed(&self) -> bool {
        self.status == AUTHORIZATION_COMPLETED
    }
}
