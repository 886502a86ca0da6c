// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vista Navigation: infer the direction of single-page-app navigation from history positions.
//!
//! ## Overview
//!
//! Browsers do not tell a single-page app whether a `popstate` came from the back or the forward
//! button, and a router's `push`/`replace` calls look the same from the outside as a history
//! traversal. What the router *does* record is a monotonically assigned integer "position" in each
//! history entry's state. This crate turns a stream of those positions into a logical
//! [`Direction`](crate::types::Direction): `Back`, `Forward`, `Replace`, or `None`.
//!
//! ## Two phases
//!
//! A navigation is observed twice:
//!
//! 1) [`NavigationTracker::prepare_navigation`](crate::tracker::NavigationTracker::prepare_navigation)
//!    runs from the router's pre-navigation hook with the pending history state.
//! 2) [`NavigationTracker::commit_navigation`](crate::tracker::NavigationTracker::commit_navigation)
//!    runs once the route resolved, with the committed history state.
//!
//! The position seen at guard time may differ from the committed one (redirects, guard-forced
//! replacements), so a direction that is still `Replace`/`None` after the first phase is
//! recomputed on commit. A `Back` or `Forward` decided during the first phase is kept.
//!
//! ## One-shot back signal
//!
//! Several components usually want to know "did the user just go back?" in order to restore
//! their own state, but only one of them should act on it.
//! [`consume_backward_navigation`](crate::tracker::NavigationTracker::consume_backward_navigation)
//! answers `true` exactly once per `Back` navigation.
//!
//! ## Minimal example
//!
//! ```
//! use vista_navigation::tracker::NavigationTracker;
//! use vista_navigation::types::Direction;
//!
//! let mut nav = NavigationTracker::new();
//! nav.prepare_navigation(&3.0);
//! nav.commit_navigation(&3.0);
//!
//! assert_eq!(nav.prepare_navigation(&2.0), Direction::Back);
//! nav.commit_navigation(&2.0);
//! assert!(nav.consume_backward_navigation());
//! assert!(!nav.consume_backward_navigation());
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

pub mod tracker;
pub mod types;
