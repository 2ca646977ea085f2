use crate::domain::ports::ReferenceLedger;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger of handled gateway references.
///
/// Lives as long as the process; a page reload in a browser build gets a
/// fresh one, which is fine because the order service is idempotent.
#[derive(Default, Clone)]
pub struct InMemoryReferenceLedger {
    references: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryReferenceLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReferenceLedger for InMemoryReferenceLedger {
    async fn observe(&self, reference: &str) -> Result<bool> {
        let mut references = self.references.write().await;
        Ok(references.insert(reference.to_string()))
    }

    async fn release(&self, reference: &str) -> Result<()> {
        self.references.write().await.remove(reference);
        Ok(())
    }

    async fn contains(&self, reference: &str) -> Result<bool> {
        let references = self.references.read().await;
        Ok(references.contains(reference))
    }
}
