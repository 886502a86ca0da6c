// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-once window scroll position persistence.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::{SafeStorage, StorageBackend};
use crate::error::StorageError;

/// Backend key of the persisted window scroll position.
pub const SCROLL_POS_KEY: &str = "window.scroll.pos";

/// A window scroll offset in whole pixels.
///
/// Targets handed to a restore may lie outside the scrollable range (even negative); they are
/// clamped when applied, not when constructed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct ScrollPosition {
    /// Horizontal offset (`scrollX`).
    pub left: i32,
    /// Vertical offset (`scrollY`).
    pub top: i32,
}

impl ScrollPosition {
    /// Construct from whole-pixel offsets.
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Construct from fractional offsets, rounding to whole pixels.
    ///
    /// Returns `None` unless both offsets are finite and fit in `i32`.
    pub fn from_offsets(left: f64, top: f64) -> Option<Self> {
        Some(Self {
            left: round_px(left)?,
            top: round_px(top)?,
        })
    }

    /// Construct from a point, rounding to whole pixels.
    pub fn from_point(p: Point) -> Option<Self> {
        Self::from_offsets(p.x, p.y)
    }

    /// This position as a point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.left), f64::from(self.top))
    }

    /// Parse a persisted `{"left":..,"top":..}` value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawScrollPosition = serde_json::from_str(json)?;
        Self::from_offsets(raw.left, raw.top)
            .ok_or_else(|| serde::de::Error::custom("scroll offsets out of range"))
    }

    /// Serialize to the persisted `{"left":..,"top":..}` form.
    pub fn to_json(self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self)
    }
}

#[derive(Deserialize)]
struct RawScrollPosition {
    left: f64,
    top: f64,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked and the value already rounded"
)]
fn round_px(v: f64) -> Option<i32> {
    let v = v.round();
    if v.is_finite() && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
        Some(v as i32)
    } else {
        None
    }
}

/// The saved window scroll position, held in memory and mirrored to a backend that survives
/// reloads.
///
/// Within one document lifetime the in-memory slot wins. Reading consumes: both slots are
/// cleared before the value is returned.
#[derive(Debug)]
pub struct ScrollPositionStore<S> {
    memory: Option<ScrollPosition>,
    storage: SafeStorage<S>,
}

impl<S: StorageBackend> ScrollPositionStore<S> {
    /// Create a store over a persistent backend.
    pub fn new(backend: S) -> Self {
        Self {
            memory: None,
            storage: SafeStorage::new(backend),
        }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &S {
        self.storage.backend()
    }

    /// Save `pos` in memory and in the backend.
    pub fn save(&mut self, pos: ScrollPosition) {
        self.memory = Some(pos);
        let persisted = match pos.to_json() {
            Ok(json) => self.storage.set(SCROLL_POS_KEY, &json),
            Err(err) => {
                warn!(%err, "cannot serialize window scroll position");
                false
            }
        };
        debug!(left = pos.left, top = pos.top, persisted, "window scroll position saved");
    }

    /// Consume the saved position.
    ///
    /// A caller-supplied `pos` is returned unchanged. Otherwise the in-memory slot is used,
    /// falling back to the backend. Both slots are cleared in every case.
    pub fn take(&mut self, pos: Option<ScrollPosition>) -> Option<ScrollPosition> {
        let memory = self.memory.take();
        let found = pos.or(memory).or_else(|| self.read_persisted());
        self.clear();
        found
    }

    /// Clear both slots.
    pub fn clear(&mut self) {
        self.memory = None;
        self.storage.remove(SCROLL_POS_KEY);
    }

    fn read_persisted(&self) -> Option<ScrollPosition> {
        let raw = self.storage.get(SCROLL_POS_KEY)?;
        match decode_persisted(&raw) {
            Ok(pos) => Some(pos),
            Err(err) => {
                warn!(%err, "ignoring persisted scroll position");
                None
            }
        }
    }
}

fn decode_persisted(raw: &str) -> Result<ScrollPosition, StorageError> {
    ScrollPosition::from_json(raw).map_err(|source| StorageError::Malformed {
        key: SCROLL_POS_KEY.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStorage;

    #[test]
    fn offsets_are_rounded_and_validated() {
        assert_eq!(
            ScrollPosition::from_offsets(10.4, 19.6),
            Some(ScrollPosition::new(10, 20))
        );
        assert_eq!(
            ScrollPosition::from_offsets(-5.0, 0.0),
            Some(ScrollPosition::new(-5, 0))
        );
        assert_eq!(ScrollPosition::from_offsets(f64::NAN, 0.0), None);
        assert_eq!(ScrollPosition::from_offsets(0.0, f64::INFINITY), None);
        assert_eq!(ScrollPosition::from_offsets(0.0, 1e12), None);
    }

    #[test]
    fn json_form() {
        let pos = ScrollPosition::new(10, 20);
        let json = pos.to_json().unwrap();
        assert_eq!(json, r#"{"left":10,"top":20}"#);
        assert_eq!(ScrollPosition::from_json(&json).unwrap(), pos);
        assert_eq!(
            ScrollPosition::new(-3, i32::MAX).to_json().unwrap(),
            r#"{"left":-3,"top":2147483647}"#
        );
        assert_eq!(
            ScrollPosition::from_json(r#"{"left":1.6,"top":2}"#).unwrap(),
            ScrollPosition::new(2, 2)
        );
        assert!(ScrollPosition::from_json(r#"{"left":1}"#).is_err());
        assert!(ScrollPosition::from_json("null").is_err());
    }

    #[test]
    fn take_is_read_once() {
        let mut store = ScrollPositionStore::new(MemoryStorage::new());
        store.save(ScrollPosition::new(10, 20));
        assert_eq!(store.take(None), Some(ScrollPosition::new(10, 20)));
        assert_eq!(store.take(None), None);
        assert!(store.backend().is_empty());
    }

    #[test]
    fn persisted_value_survives_a_new_document() {
        let backend = MemoryStorage::new();
        ScrollPositionStore::new(&backend).save(ScrollPosition::new(0, 900));

        // A reload starts with an empty in-memory slot.
        let mut reloaded = ScrollPositionStore::new(&backend);
        assert_eq!(reloaded.take(None), Some(ScrollPosition::new(0, 900)));
        assert!(backend.is_empty());
    }

    #[test]
    fn memory_slot_wins_over_backend() {
        let backend = MemoryStorage::new();
        backend
            .set_item(SCROLL_POS_KEY, r#"{"left":0,"top":1}"#)
            .unwrap();
        let mut store = ScrollPositionStore::new(&backend);
        store.memory = Some(ScrollPosition::new(0, 2));
        assert_eq!(store.take(None), Some(ScrollPosition::new(0, 2)));
        assert!(backend.is_empty());
    }

    #[test]
    fn explicit_position_is_returned_and_slots_cleared() {
        let mut store = ScrollPositionStore::new(MemoryStorage::new());
        store.save(ScrollPosition::new(1, 1));
        let explicit = ScrollPosition::new(5, 6);
        assert_eq!(store.take(Some(explicit)), Some(explicit));
        assert_eq!(store.take(None), None);
    }

    #[test]
    fn malformed_backend_value_is_absent() {
        let backend = MemoryStorage::new();
        backend.set_item(SCROLL_POS_KEY, "{oops").unwrap();
        let mut store = ScrollPositionStore::new(&backend);
        assert_eq!(store.take(None), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn malformed_value_reports_its_key() {
        for raw in ["{oops", r#"{"left":0,"top":1e300}"#] {
            let err = decode_persisted(raw).unwrap_err();
            assert!(matches!(&err, StorageError::Malformed { key, .. } if key == SCROLL_POS_KEY));
        }
        assert_eq!(
            decode_persisted(r#"{"left":0,"top":7}"#).unwrap(),
            ScrollPosition::new(0, 7)
        );
    }

    #[test]
    fn denied_backend_keeps_memory_slot_working() {
        let backend = MemoryStorage::new();
        backend.set_denied(true);
        let mut store = ScrollPositionStore::new(&backend);
        store.save(ScrollPosition::new(3, 4));
        assert_eq!(store.take(None), Some(ScrollPosition::new(3, 4)));
        assert_eq!(store.take(None), None);
    }
}
