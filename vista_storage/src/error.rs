// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storage errors.

use thiserror::Error;

/// Errors a [`StorageBackend`](crate::StorageBackend) may report.
///
/// Callers inside this crate never propagate these: [`SafeStorage`](crate::SafeStorage) logs
/// them and treats the entry as absent.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the entry would exceed the backend's quota.
    #[error("storage quota exceeded while writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes the write required.
        needed: usize,
        /// Bytes still available before the write.
        available: usize,
    },

    /// The backend refused access, e.g. because of browser privacy settings.
    #[error("storage access denied")]
    AccessDenied,

    /// A stored value could not be decoded or encoded.
    #[error("malformed storage entry '{key}': {source}")]
    Malformed {
        /// Key of the offending entry.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
