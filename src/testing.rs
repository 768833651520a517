//! Testing utilities and in-memory store implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::error::{Error, Result};
use crate::traits::KeyValueStore;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// An in-memory key-value store.
///
/// Records how many writes (sets and removes) it has received so tests can
/// assert on persistence side effects.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { values: RefCell::new(values), writes: Cell::new(0) }
    }

    /// Number of `set` and `remove` calls received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Raw value stored under `key`, bypassing the trait.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.values.borrow_mut().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self.values.borrow().keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
}

/// A store whose every operation fails, for testing error paths.
#[derive(Debug, Default)]
pub struct FailingStore {
    error_message: String,
}

impl FailingStore {
    /// Create a failing store with the specified error message.
    #[must_use]
    pub fn new(error_message: impl Into<String>) -> Self {
        Self { error_message: error_message.into() }
    }

    fn error(&self) -> Error {
        Error::Store(self.error_message.clone())
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(self.error())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(self.error())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(self.error())
    }

    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>> {
        Err(self.error())
    }
}

/// A store that serves reads from an inner [`MemoryStore`] but rejects writes.
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    /// Wrap a pre-populated memory store.
    #[must_use]
    pub const fn new(inner: MemoryStore) -> Self {
        Self { inner }
    }

    /// The wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(Error::Store(format!("read-only store: cannot write {key}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Err(Error::Store(format!("read-only store: cannot remove {key}")))
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.keys_with_prefix(prefix)
    }
}

/// A store whose reads of keys under a prefix fail a set number of times.
///
/// Writes and all other reads go to the inner [`MemoryStore`].
#[derive(Debug)]
pub struct FlakyReadStore {
    inner: MemoryStore,
    prefix: String,
    failures_left: Cell<usize>,
}

impl FlakyReadStore {
    /// Fail the next `failures` reads of keys starting with `prefix`.
    #[must_use]
    pub fn new(inner: MemoryStore, prefix: impl Into<String>, failures: usize) -> Self {
        Self { inner, prefix: prefix.into(), failures_left: Cell::new(failures) }
    }

    /// The wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FlakyReadStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let left = self.failures_left.get();
        if left > 0 && key.starts_with(&self.prefix) {
            self.failures_left.set(left - 1);
            return Err(Error::Store(format!("transient read failure for {key}")));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.keys_with_prefix(prefix)
    }
}
