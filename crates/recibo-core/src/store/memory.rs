//! In-memory backend.
//!
//! Data is lost when the process exits. Clones share the same map, so a
//! test can hand one clone to a store and inspect the raw blob through
//! another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::backend::{KeyValueBackend, StorageResult};
use crate::error::StorageError;

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

/// Thread-safe in-memory key-value backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    /// Create an empty backend without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total stored bytes (keys plus values).
    pub fn with_quota(self, bytes: usize) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.quota_bytes = Some(bytes);
        }
        self
    }

    /// Simulate storage being disabled.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.unavailable = unavailable;
        }
    }

    /// Store a raw value, bypassing quota and availability checks.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.insert(key.to_string(), value.to_string());
        }
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, MemoryState>> {
        let state = self
            .state
            .lock()
            .map_err(|_| StorageError::Unavailable("memory backend lock poisoned".to_string()))?;

        if state.unavailable {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        Ok(state)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self.lock()?;

        if let Some(limit) = state.quota_bytes {
            let others: usize = state
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    needed,
                    limit: Some(limit),
                });
            }
        }

        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
