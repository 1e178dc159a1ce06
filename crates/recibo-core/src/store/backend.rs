//! Key-value backend abstraction.

use crate::error::StorageError;

/// Result type for backend operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A durable, synchronous string key-value store.
///
/// Implementations:
/// - `FileBackend` - one JSON file per key in a directory (native)
/// - `MemoryBackend` - in-process map for tests
/// - `LocalStorageBackend` - browser `localStorage` (recibo-wasm)
pub trait KeyValueBackend {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key` in a single write.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
