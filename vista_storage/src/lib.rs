// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vista Storage: key/value persistence that degrades to "absent" instead of failing.
//!
//! ## Overview
//!
//! Browser storage is a shared, external resource: writes can exceed a quota, reads can be
//! denied by privacy settings, and anything stored may have been written by an older build.
//! This crate puts a narrow port in front of it and builds two small stores on top:
//!
//! - [`RestoreStateStore`]: namespaced, TTL-bounded "restore progress" payloads
//!   (for example a paging offset), read at most once.
//! - [`ScrollPositionStore`]: the window scroll offset saved on page hide, held in memory and
//!   mirrored to a backend that survives reloads, consumed exactly once.
//!
//! ## Ports
//!
//! - [`StorageBackend`] returns `Result<_, StorageError>` from every call. [`SafeStorage`]
//!   wraps a backend so that every error is logged and treated as "entry absent".
//! - [`Clock`] provides the epoch-millisecond time used for expiry.
//!
//! [`MemoryStorage`] and [`ManualClock`] are in-process implementations for hosts without a
//! browser and for tests.
//!
//! ## Persisted layout
//!
//! - `"window.scroll.pos"` → `{"left":number,"top":number}`
//! - `"view.restore." + encodeURIComponent(key)` → `{...state,"filterKey":string,"timestamp":number}`
//!
//! ## Minimal example
//!
//! ```
//! use serde_json::json;
//! use vista_storage::{MemoryStorage, RestoreStateStore, SystemClock};
//!
//! let store = RestoreStateStore::new(MemoryStorage::new(), SystemClock);
//! assert!(store.save_restore_state("albums", &json!({ "offset": 120 })));
//!
//! let state = store.consume_restore_state("albums", None).unwrap();
//! assert_eq!(state["offset"], 120);
//! assert_eq!(state["filterKey"], "albums");
//! assert!(store.get_restore_state("albums", None).is_none());
//! ```

mod backend;
mod clock;
mod encode;
mod error;
mod restore;
mod scroll;

pub use backend::{MemoryStorage, SafeStorage, StorageBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use encode::encode_uri_component;
pub use error::StorageError;
pub use restore::{DEFAULT_MAX_AGE, RESTORE_KEY_PREFIX, RestoreStateStore};
pub use scroll::{SCROLL_POS_KEY, ScrollPosition, ScrollPositionStore};
