// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: the navigation direction and history-position extraction.

/// Logical direction of the most recent navigation.
///
/// Produced by [`NavigationTracker::prepare_navigation`](crate::tracker::NavigationTracker::prepare_navigation)
/// and refined by [`NavigationTracker::commit_navigation`](crate::tracker::NavigationTracker::commit_navigation).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// No numeric history position was available (e.g. a full page load).
    #[default]
    None,
    /// The new position is strictly smaller than the committed one.
    Back,
    /// The new position is strictly larger than the committed one.
    Forward,
    /// A position was observed but did not change.
    Replace,
}

impl Direction {
    /// Classify `next` relative to the previously committed position `prev`.
    pub fn between(prev: f64, next: f64) -> Self {
        if next < prev {
            Self::Back
        } else if next > prev {
            Self::Forward
        } else {
            Self::Replace
        }
    }

    /// Returns true for [`Back`](Self::Back) and [`Forward`](Self::Forward).
    pub const fn is_traversal(self) -> bool {
        matches!(self, Self::Back | Self::Forward)
    }
}

/// Extract the router-assigned history position from a raw history state.
///
/// Implementations return `None` when the state carries no usable position. Non-finite values
/// are filtered by [`position_of`], so implementations may return them as-is.
pub trait HistoryPosition {
    /// Returns the raw position value, if any.
    fn history_position(&self) -> Option<f64>;
}

/// Returns the finite history position of `state`, if any.
pub fn position_of(state: &(impl HistoryPosition + ?Sized)) -> Option<f64> {
    state.history_position().filter(|p| p.is_finite())
}

impl HistoryPosition for () {
    #[inline]
    fn history_position(&self) -> Option<f64> {
        None
    }
}

impl HistoryPosition for f64 {
    #[inline]
    fn history_position(&self) -> Option<f64> {
        Some(*self)
    }
}

impl HistoryPosition for i64 {
    #[inline]
    fn history_position(&self) -> Option<f64> {
        // Positions are small session-local counters, far below 2^53.
        Some(*self as f64)
    }
}

impl<T: HistoryPosition> HistoryPosition for Option<T> {
    #[inline]
    fn history_position(&self) -> Option<f64> {
        self.as_ref().and_then(|s| s.history_position())
    }
}

impl<T: HistoryPosition + ?Sized> HistoryPosition for &T {
    #[inline]
    fn history_position(&self) -> Option<f64> {
        (**self).history_position()
    }
}

/// Reads the numeric `position` field the browser router stores in `history.state`.
#[cfg(feature = "serde_json")]
impl HistoryPosition for serde_json::Value {
    fn history_position(&self) -> Option<f64> {
        self.get("position").and_then(serde_json::Value::as_f64)
    }
}
