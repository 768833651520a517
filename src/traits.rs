//! Core traits for testability and abstraction.

use crate::error::Result;

/// Trait for the local key-value store that holds all durable state.
///
/// Values are serialized text (JSON records). The production implementation
/// uses `SQLite`, while tests use the in-memory stores in [`crate::testing`].
/// Implementations are treated as externally synchronized: callers never
/// issue overlapping writes for the same key.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn remove(&self, key: &str) -> Result<()>;

    /// List all stored keys starting with `prefix`, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}
