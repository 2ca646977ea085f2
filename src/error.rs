use thiserror::Error;

/// Errors raised while dispatching a checkout payment.
///
/// Provider and order-service messages are carried verbatim so they can be
/// shown to the shopper as-is.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    OrderPlacement(String),
    #[error("{0}")]
    Provider(String),
    #[error("{operation} timed out, please try again.")]
    Timeout { operation: &'static str },
    #[error("A payment is already being submitted")]
    AlreadySubmitting,
    #[error("Payment session is missing `{0}`")]
    MissingSessionData(&'static str),
    #[error("Action `{action}` is not supported by the {handler} payment button")]
    UnsupportedAction {
        action: &'static str,
        handler: &'static str,
    },
    #[error("Navigation error: {0}")]
    Navigation(String),
    #[error("Invalid query string: {0}")]
    Query(#[from] serde_urlencoded::de::Error),
    #[error("Reference ledger error: {0}")]
    Ledger(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for DispatchError {
    fn from(e: rocksdb::Error) -> Self {
        DispatchError::Ledger(e.to_string())
    }
}
