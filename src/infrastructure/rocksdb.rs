use crate::domain::ports::ReferenceLedger;
use crate::error::{DispatchError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// Column Family holding handled gateway reference numbers.
pub const CF_REFERENCES: &str = "gateway_references";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ReferenceRecord {
    reference: String,
    first_seen_unix: u64,
}

/// A persistent reference ledger backed by RocksDB.
///
/// Survives restarts, so a gateway return replayed after a crash still
/// places its order only once. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbReferenceLedger {
    db: Arc<DB>,
    // Serializes check-then-insert in `observe`.
    write_lock: Arc<Mutex<()>>,
}

impl RocksDbReferenceLedger {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_references = ColumnFamilyDescriptor::new(CF_REFERENCES, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_references])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn references(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_REFERENCES)
            .ok_or_else(|| DispatchError::Ledger("References column family not found".into()))
    }
}

#[async_trait]
impl ReferenceLedger for RocksDbReferenceLedger {
    async fn observe(&self, reference: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let cf = self.references()?;

        if self.db.get_pinned_cf(&cf, reference.as_bytes())?.is_some() {
            return Ok(false);
        }

        let first_seen_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let record = ReferenceRecord {
            reference: reference.to_string(),
            first_seen_unix,
        };
        self.db
            .put_cf(&cf, reference.as_bytes(), serde_json::to_vec(&record)?)?;
        Ok(true)
    }

    async fn release(&self, reference: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let cf = self.references()?;
        self.db.delete_cf(&cf, reference.as_bytes())?;
        Ok(())
    }

    async fn contains(&self, reference: &str) -> Result<bool> {
        let cf = self.references()?;
        Ok(self.db.get_pinned_cf(&cf, reference.as_bytes())?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let ledger = RocksDbReferenceLedger::open(dir.path()).expect("Failed to open RocksDB");
        assert!(ledger.db.cf_handle(CF_REFERENCES).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_observe_once() {
        let dir = tempdir().unwrap();
        let ledger = RocksDbReferenceLedger::open(dir.path()).unwrap();

        assert!(ledger.observe("ABC").await.unwrap());
        assert!(!ledger.observe("ABC").await.unwrap());
        assert!(ledger.contains("ABC").await.unwrap());
        assert!(!ledger.contains("DEF").await.unwrap());
    }

    #[tokio::test]
    async fn test_rocksdb_release() {
        let dir = tempdir().unwrap();
        let ledger = RocksDbReferenceLedger::open(dir.path()).unwrap();

        assert!(ledger.observe("ABC").await.unwrap());
        ledger.release("ABC").await.unwrap();
        assert!(!ledger.contains("ABC").await.unwrap());
        assert!(ledger.observe("ABC").await.unwrap());
    }

    #[tokio::test]
    async fn test_rocksdb_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let ledger = RocksDbReferenceLedger::open(dir.path()).unwrap();
            ledger.observe("ABC").await.unwrap();
        }

        let ledger = RocksDbReferenceLedger::open(dir.path()).unwrap();
        assert!(!ledger.observe("ABC").await.unwrap());
    }
}
