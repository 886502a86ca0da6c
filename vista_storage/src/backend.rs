// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storage port, an in-memory backend, and the never-failing wrapper.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::warn;

use crate::error::StorageError;

/// A string key/value store shaped like the Web Storage API.
///
/// Methods take `&self`: like `sessionStorage`/`localStorage`, a backend is a shared resource
/// and implementations use interior mutability.
pub trait StorageBackend {
    /// Returns the stored value for `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removes `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: StorageBackend + ?Sized> StorageBackend for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-process [`StorageBackend`].
///
/// An optional byte quota (keys plus values) and an access switch let hosts and tests
/// reproduce the failures real browser storage reports.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
    denied: Cell<bool>,
}

impl MemoryStorage {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `bytes` of keys plus values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with [`StorageError::AccessDenied`] (or succeed again).
    pub fn set_denied(&self, denied: bool) {
        self.denied.set(denied);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns true if `key` is stored, bypassing the access switch.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn check_access(&self) -> Result<(), StorageError> {
        if self.denied.get() {
            Err(StorageError::AccessDenied)
        } else {
            Ok(())
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_access()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_access()?;
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_bytes_without(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    available,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_access()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Wraps a [`StorageBackend`] so that no call can fail.
///
/// Errors are logged at `warn` and mapped to "absent" (`None`) or "not done" (`false`).
#[derive(Debug, Default)]
pub struct SafeStorage<S> {
    backend: S,
}

impl<S: StorageBackend> SafeStorage<S> {
    /// Wrap `backend`.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Borrow the wrapped backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns the value for `key`, or `None` if it is missing or unreadable.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "storage read failed");
                None
            }
        }
    }

    /// Stores `value` under `key`. Returns false if the backend refused.
    pub fn set(&self, key: &str, value: &str) -> bool {
        match self.backend.set_item(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, %err, "storage write failed");
                false
            }
        }
    }

    /// Removes `key`. Returns false if the backend refused.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove_item(key) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, %err, "storage remove failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let s = MemoryStorage::new();
        assert!(s.is_empty());
        s.set_item("a", "1").unwrap();
        assert_eq!(s.get_item("a").unwrap().as_deref(), Some("1"));
        s.remove_item("a").unwrap();
        assert_eq!(s.get_item("a").unwrap(), None);
        // Removing twice is fine.
        s.remove_item("a").unwrap();
    }

    #[test]
    fn quota_counts_keys_and_values() {
        let s = MemoryStorage::with_quota(8);
        s.set_item("ab", "cdef").unwrap();
        // Overwriting the same key reuses its bytes.
        s.set_item("ab", "cdefgh").unwrap();
        let err = s.set_item("x", "y").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 2,
                available: 0,
                ..
            }
        ));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn denied_access_fails_every_call() {
        let s = MemoryStorage::new();
        s.set_item("k", "v").unwrap();
        s.set_denied(true);
        assert!(matches!(s.get_item("k"), Err(StorageError::AccessDenied)));
        assert!(matches!(s.set_item("k", "w"), Err(StorageError::AccessDenied)));
        assert!(matches!(s.remove_item("k"), Err(StorageError::AccessDenied)));
        assert!(s.contains_key("k"));
    }

    #[test]
    fn safe_storage_swallows_errors() {
        let backend = MemoryStorage::with_quota(4);
        let safe = SafeStorage::new(&backend);
        assert!(!safe.set("key", "value"));
        assert_eq!(safe.get("key"), None);

        backend.set_denied(true);
        assert_eq!(safe.get("k"), None);
        assert!(!safe.set("k", "v"));
        assert!(!safe.remove("k"));
    }

    #[test]
    fn shared_through_rc() {
        let backend = Rc::new(MemoryStorage::new());
        let safe = SafeStorage::new(Rc::clone(&backend));
        assert!(safe.set("k", "v"));
        assert!(backend.contains_key("k"));
    }
}
