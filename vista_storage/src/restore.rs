// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed, TTL-bounded restore state.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::backend::{SafeStorage, StorageBackend};
use crate::clock::Clock;
use crate::encode::encode_uri_component;
use crate::error::StorageError;

/// Prefix of every restore-state key in the backend.
pub const RESTORE_KEY_PREFIX: &str = "view.restore.";

/// Age after which a restore entry is treated as absent, unless the caller passes another.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_millis(1_800_000);

const FILTER_KEY: &str = "filterKey";
const TIMESTAMP: &str = "timestamp";

/// Restore-progress payloads that outlive a navigation but not a browsing session.
///
/// Entries are JSON objects stored under `view.restore.<encoded key>`, stamped with the caller's
/// key (`filterKey`, unless the payload already names one) and the save time (`timestamp`).
/// Entries older than the requested maximum age, malformed JSON, and non-object payloads are
/// deleted on read and reported as absent.
#[derive(Debug)]
pub struct RestoreStateStore<S, C> {
    storage: SafeStorage<S>,
    clock: C,
}

impl<S: StorageBackend, C: Clock> RestoreStateStore<S, C> {
    /// Create a store over a session-scoped backend.
    pub fn new(backend: S, clock: C) -> Self {
        Self {
            storage: SafeStorage::new(backend),
            clock,
        }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &S {
        self.storage.backend()
    }

    /// Backend key for a caller-supplied key.
    pub fn storage_key(key: &str) -> String {
        format!("{RESTORE_KEY_PREFIX}{}", encode_uri_component(key))
    }

    /// Save `state` under `key`.
    ///
    /// Returns false if `key` is empty, `state` is not a JSON object, or the backend refused the
    /// write.
    pub fn save_restore_state(&self, key: &str, state: &Value) -> bool {
        if key.is_empty() {
            warn!("restore state key is empty");
            return false;
        }
        let Value::Object(state) = state else {
            warn!(key, "restore state is not an object");
            return false;
        };

        let mut entry = state.clone();
        entry
            .entry(FILTER_KEY)
            .or_insert_with(|| Value::String(key.to_owned()));
        entry.insert(TIMESTAMP.to_owned(), Value::from(self.clock.now_ms()));

        let json = Value::Object(entry).to_string();
        let saved = self.storage.set(&Self::storage_key(key), &json);
        debug!(key, saved, "restore state saved");
        saved
    }

    /// Serialize `payload` and save it under `key`.
    ///
    /// Returns false if the payload does not serialize to a JSON object.
    pub fn save_restore_payload<T: Serialize>(&self, key: &str, payload: &T) -> bool {
        match serde_json::to_value(payload) {
            Ok(value) => self.save_restore_state(key, &value),
            Err(err) => {
                warn!(key, %err, "restore payload does not serialize");
                false
            }
        }
    }

    /// Returns a copy of the entry for `key` if it exists and is younger than `max_age`
    /// ([`DEFAULT_MAX_AGE`] when `None`).
    ///
    /// Expired and malformed entries are deleted.
    pub fn get_restore_state(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<Map<String, Value>> {
        if key.is_empty() {
            return None;
        }
        let storage_key = Self::storage_key(key);
        let raw = self.storage.get(&storage_key)?;

        let entry = match decode_entry(&storage_key, &raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(key, %err, "discarding restore state");
                self.storage.remove(&storage_key);
                return None;
            }
        };

        let max_age =
            i64::try_from(max_age.unwrap_or(DEFAULT_MAX_AGE).as_millis()).unwrap_or(i64::MAX);
        let saved_at = entry.get(TIMESTAMP).and_then(Value::as_i64);
        let expired = match saved_at {
            Some(saved_at) => self.clock.now_ms().saturating_sub(saved_at) > max_age,
            None => true,
        };
        if expired {
            debug!(key, "restore state expired");
            self.storage.remove(&storage_key);
            return None;
        }

        Some(entry)
    }

    /// Like [`get_restore_state`](Self::get_restore_state), deserialized into `T`.
    ///
    /// An entry that does not deserialize into `T` is reported as absent but left in place.
    pub fn get_restore_payload<T: DeserializeOwned>(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<T> {
        let entry = self.get_restore_state(key, max_age)?;
        match serde_json::from_value(Value::Object(entry)) {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!(key, %err, "restore state does not match the requested payload type");
                None
            }
        }
    }

    /// Read the entry for `key` and delete it, whether or not it was usable.
    pub fn consume_restore_state(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<Map<String, Value>> {
        let entry = self.get_restore_state(key, max_age);
        self.clear_restore_state(key);
        entry
    }

    /// Delete the entry for `key`.
    pub fn clear_restore_state(&self, key: &str) {
        if !key.is_empty() {
            self.storage.remove(&Self::storage_key(key));
        }
    }
}

/// Parse a persisted entry, which must be a JSON object.
fn decode_entry(storage_key: &str, raw: &str) -> Result<Map<String, Value>, StorageError> {
    let malformed = |source: serde_json::Error| StorageError::Malformed {
        key: storage_key.to_owned(),
        source,
    };
    match serde_json::from_str::<Value>(raw).map_err(malformed)? {
        Value::Object(entry) => Ok(entry),
        _ => Err(malformed(serde::de::Error::custom("expected a JSON object"))),
    }
}
