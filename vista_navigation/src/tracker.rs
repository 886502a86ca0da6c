// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation tracker implementation.
//!
//! ## Overview
//!
//! Holds the last committed history position and the position observed before the current
//! navigation commits, and derives a [`Direction`] from the two.
//!
//! ## Ordering
//!
//! - Call [`NavigationTracker::prepare_navigation`] once per navigation attempt, before the route
//!   resolves.
//! - Call [`NavigationTracker::commit_navigation`] after it resolved.
//! - Between navigations, read the result with [`NavigationTracker::navigation_direction`] or the
//!   one-shot [`NavigationTracker::consume_backward_navigation`].

use tracing::debug;

use crate::types::{Direction, HistoryPosition, position_of};

/// Two-phase history position tracker.
///
/// ## Usage
///
/// - Construct one per document with [`NavigationTracker::new`].
/// - Feed it from the router's pre- and post-navigation hooks.
/// - Reset the direction with [`NavigationTracker::reset_navigation_direction`] once the new view
///   painted, so stale `Back` signals do not leak into later, unrelated reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationTracker {
    current: Option<f64>,
    pending: Option<f64>,
    direction: Direction,
    consumed: bool,
}

impl NavigationTracker {
    /// Create a tracker with no committed position and direction [`Direction::None`].
    pub const fn new() -> Self {
        Self {
            current: None,
            pending: None,
            direction: Direction::None,
            consumed: false,
        }
    }

    /// Observe the pending history state of a navigation that is about to happen.
    ///
    /// Without a finite position the tracker resets to [`Direction::None`] and forgets any
    /// pending position. Otherwise the position is compared with the last committed one, which
    /// defaults to the position itself on the first navigation (yielding `Replace`).
    pub fn prepare_navigation(&mut self, state: &impl HistoryPosition) -> Direction {
        self.consumed = false;

        let Some(next) = position_of(state) else {
            self.pending = None;
            self.direction = Direction::None;
            debug!("navigation without history position");
            return self.direction;
        };

        let prev = self.current.unwrap_or(next);
        self.direction = Direction::between(prev, next);
        self.pending = Some(next);
        debug!(prev, next, direction = ?self.direction, "navigation prepared");
        self.direction
    }

    /// Commit the navigation with the history state observed after the route resolved.
    ///
    /// Falls back to the pending position when the committed state carries none. A `Back` or
    /// `Forward` decided by [`prepare_navigation`](Self::prepare_navigation) is kept; any other
    /// direction is recomputed against the previous committed position.
    ///
    /// Returns the committed position, or `None` when neither phase saw one. In that case the
    /// direction becomes [`Direction::None`] and the previous committed position is kept.
    pub fn commit_navigation(&mut self, state: &impl HistoryPosition) -> Option<f64> {
        let next = position_of(state).or(self.pending.take());

        let Some(next) = next else {
            self.direction = Direction::None;
            debug!("navigation committed without history position");
            return None;
        };

        if !self.direction.is_traversal() {
            let prev = self.current.unwrap_or(next);
            let direction = Direction::between(prev, next);
            if direction != self.direction {
                self.consumed = false;
            }
            self.direction = direction;
        }

        self.current = Some(next);
        debug!(position = next, direction = ?self.direction, "navigation committed");
        Some(next)
    }

    /// Direction of the most recent navigation.
    pub const fn navigation_direction(&self) -> Direction {
        self.direction
    }

    /// Returns true if the most recent navigation went back in history.
    pub fn was_backward_navigation(&self) -> bool {
        self.direction == Direction::Back
    }

    /// Returns true exactly once per backward navigation.
    ///
    /// Later calls return false until the next navigation is prepared.
    pub fn consume_backward_navigation(&mut self) -> bool {
        if self.direction != Direction::Back || self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }

    /// Overwrite the current direction, typically with [`Direction::None`] after the new view
    /// painted.
    pub fn reset_navigation_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.consumed = false;
    }

    /// Last committed history position.
    pub const fn current_position(&self) -> Option<f64> {
        self.current
    }

    /// Position observed by [`prepare_navigation`](Self::prepare_navigation) and not yet
    /// committed.
    pub const fn pending_position(&self) -> Option<f64> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigate(nav: &mut NavigationTracker, pos: f64) -> Direction {
        nav.prepare_navigation(&pos);
        nav.commit_navigation(&pos);
        nav.navigation_direction()
    }

    #[test]
    fn first_navigation_is_replace() {
        let mut nav = NavigationTracker::new();
        assert_eq!(nav.prepare_navigation(&5.0), Direction::Replace);
        assert_eq!(nav.pending_position(), Some(5.0));
        assert_eq!(nav.commit_navigation(&5.0), Some(5.0));
        assert_eq!(nav.current_position(), Some(5.0));
        assert_eq!(nav.pending_position(), None);
    }

    #[test]
    fn back_forward_replace_sequence() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 1.0);
        assert_eq!(navigate(&mut nav, 2.0), Direction::Forward);
        assert_eq!(navigate(&mut nav, 3.0), Direction::Forward);
        assert_eq!(navigate(&mut nav, 2.0), Direction::Back);
        assert!(nav.was_backward_navigation());
        assert_eq!(navigate(&mut nav, 2.0), Direction::Replace);
    }

    #[test]
    fn missing_position_resets_to_none() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 4.0);
        assert_eq!(nav.prepare_navigation(&()), Direction::None);
        assert_eq!(nav.pending_position(), None);
        assert_eq!(nav.commit_navigation(&()), None);
        assert_eq!(nav.navigation_direction(), Direction::None);
        // The committed position survives a navigation without one.
        assert_eq!(nav.current_position(), Some(4.0));
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 4.0);
        assert_eq!(nav.prepare_navigation(&f64::NAN), Direction::None);
    }

    #[test]
    fn traversal_from_prepare_survives_rewritten_commit_state() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 6.0);
        assert_eq!(nav.prepare_navigation(&5.0), Direction::Back);
        // The router rewrote the state during resolution; Back stays locked in.
        assert_eq!(nav.commit_navigation(&7.0), Some(7.0));
        assert_eq!(nav.navigation_direction(), Direction::Back);
        assert_eq!(nav.current_position(), Some(7.0));
    }

    #[test]
    fn replace_is_recomputed_on_commit() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 6.0);
        assert_eq!(nav.prepare_navigation(&6.0), Direction::Replace);
        // A guard redirected to a new entry.
        nav.commit_navigation(&7.0);
        assert_eq!(nav.navigation_direction(), Direction::Forward);
    }

    #[test]
    fn commit_falls_back_to_pending_position() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 3.0);
        nav.prepare_navigation(&4.0);
        assert_eq!(nav.commit_navigation(&()), Some(4.0));
        assert_eq!(nav.current_position(), Some(4.0));
        assert_eq!(nav.navigation_direction(), Direction::Forward);
    }

    #[test]
    fn commit_without_prepare_computes_direction() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 3.0);
        nav.reset_navigation_direction(Direction::None);
        nav.commit_navigation(&1.0);
        assert_eq!(nav.navigation_direction(), Direction::Back);
    }

    #[test]
    fn backward_navigation_is_consumed_once() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 3.0);
        navigate(&mut nav, 2.0);
        assert!(nav.consume_backward_navigation());
        assert!(!nav.consume_backward_navigation());
        // Still reported as backward for plain reads.
        assert!(nav.was_backward_navigation());

        navigate(&mut nav, 1.0);
        assert!(nav.consume_backward_navigation());
    }

    #[test]
    fn forward_navigation_is_never_consumed() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 1.0);
        navigate(&mut nav, 2.0);
        assert!(!nav.consume_backward_navigation());
    }

    #[test]
    fn reset_clears_direction() {
        let mut nav = NavigationTracker::new();
        navigate(&mut nav, 3.0);
        navigate(&mut nav, 2.0);
        nav.reset_navigation_direction(Direction::None);
        assert_eq!(nav.navigation_direction(), Direction::None);
        assert!(!nav.consume_backward_navigation());
    }
}
