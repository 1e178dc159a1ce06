//! Receipt persistence over a key-value backend.
//!
//! The whole collection lives as one JSON array under a single key. Every
//! write is a full read-modify-write; the last writer wins.

mod backend;
#[cfg(feature = "native")]
mod file;
mod memory;

pub use backend::{KeyValueBackend, StorageResult};
#[cfg(feature = "native")]
pub use file::FileBackend;
pub use memory::MemoryBackend;

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::receipt::Receipt;
use crate::search::sort_recent_first;

/// Key the receipt collection is stored under.
pub const DEFAULT_KEY: &str = "receipts";

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No receipt with that number existed; it was appended.
    Inserted,
    /// An existing receipt was replaced in place.
    Replaced,
}

/// Durable CRUD over the receipt collection, keyed by receipt number.
#[derive(Debug, Clone)]
pub struct ReceiptStore<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> ReceiptStore<B> {
    /// Store receipts under [`DEFAULT_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    /// Store receipts under a custom key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read every stored receipt in on-disk order.
    ///
    /// Never fails: a missing key, an unreadable backend or malformed data
    /// all yield an empty collection (the latter two are logged).
    pub fn load_all(&self) -> Vec<Receipt> {
        match self.try_load_all() {
            Ok(receipts) => receipts,
            Err(e) => {
                warn!("Ignoring stored receipts under '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Read every stored receipt, reporting malformed data and backend errors.
    pub fn try_load_all(&self) -> Result<Vec<Receipt>, StoreError> {
        let raw = match self.backend.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                debug!("No receipts stored under '{}'", self.key);
                return Ok(Vec::new());
            }
        };

        let receipts: Vec<Receipt> = serde_json::from_str(&raw).map_err(StoreError::Malformed)?;
        debug!("Loaded {} receipts", receipts.len());
        Ok(receipts)
    }

    /// All receipts, most recent first.
    pub fn list_recent(&self) -> Vec<Receipt> {
        let mut receipts = self.load_all();
        sort_recent_first(&mut receipts);
        receipts
    }

    /// Look up a receipt by number.
    pub fn get(&self, receipt_number: &str) -> Option<Receipt> {
        self.load_all()
            .into_iter()
            .find(|r| r.receipt_number == receipt_number)
    }

    /// Insert a receipt or replace the one with the same number in place.
    ///
    /// Nothing is written if the current collection cannot be read, the
    /// new one cannot be serialized, or the backend rejects the write.
    pub fn upsert(&self, receipt: &Receipt) -> Result<UpsertOutcome, StoreError> {
        let mut receipts = self.try_load_all()?;

        let outcome = match receipts
            .iter()
            .position(|r| r.receipt_number == receipt.receipt_number)
        {
            Some(index) => {
                receipts[index] = receipt.clone();
                UpsertOutcome::Replaced
            }
            None => {
                receipts.push(receipt.clone());
                UpsertOutcome::Inserted
            }
        };

        self.write(&receipts)?;
        info!("Saved receipt {} ({:?})", receipt.receipt_number, outcome);
        Ok(outcome)
    }

    /// Remove every receipt with the given number and return the remainder.
    ///
    /// Unconditional: the age-based delete window is enforced by callers.
    pub fn delete(&self, receipt_number: &str) -> Result<Vec<Receipt>, StoreError> {
        let mut receipts = self.try_load_all()?;
        let before = receipts.len();
        receipts.retain(|r| r.receipt_number != receipt_number);

        let removed = before - receipts.len();
        if removed == 0 {
            debug!("No receipt {} to delete", receipt_number);
            return Ok(receipts);
        }

        self.write(&receipts)?;
        info!("Deleted receipt {} ({} record(s))", receipt_number, removed);
        Ok(receipts)
    }

    fn write(&self, receipts: &[Receipt]) -> Result<(), StoreError> {
        let json = serde_json::to_string(receipts).map_err(StoreError::Serialization)?;
        self.backend.set(&self.key, &json)?;
        Ok(())
    }
}
