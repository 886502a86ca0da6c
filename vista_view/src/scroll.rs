// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded scroll-position restoration.
//!
//! ## Overview
//!
//! After a reload or a back/forward-cache resume, the content below the fold may still be
//! loading in batches, so a single `scrollTo` usually lands short. [`restore_scroll`] retries:
//!
//! 1. Record the content height as a baseline.
//! 2. Per attempt, wait [`RestoreConfig::idle_delay`], then (on the first attempt, and whenever
//!    the previous one asked for it) wait for pending requests to settle.
//! 3. Clamp the target to the scrollable range and scroll after two animation frames, i.e. after
//!    the browser's own layout and paint.
//! 4. Stop once `scrollY` is within [`RestoreConfig::tolerance`] of the target. Otherwise wait for
//!    requests before the next attempt if the target is still out of range, the content height
//!    changed, or the container reports requests in flight.
//! 5. Give up quietly after [`RestoreConfig::max_attempts`].
//!
//! The future has no cancellation handle of its own; drop it to stop early.

use core::future::Future;
use core::time::Duration;

use kurbo::{Point, Size, Vec2};
use tracing::{debug, trace};
use vista_storage::ScrollPosition;

/// Pause before each restoration attempt.
pub const IDLE_DELAY: Duration = Duration::from_millis(72);

/// Attempts before restoration gives up.
pub const MAX_ATTEMPTS: u32 = 20;

/// Distance in pixels at which the target counts as reached.
pub const TOLERANCE: f64 = 2.0;

/// Scroll extents of the document's scrolling element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// `scrollWidth` × `scrollHeight`.
    pub content: Size,
    /// `clientWidth` × `clientHeight`.
    pub viewport: Size,
}

impl ScrollMetrics {
    /// Largest scroll offset on each axis, never negative.
    pub fn max_offset(&self) -> Vec2 {
        Vec2::new(
            (self.content.width - self.viewport.width).max(0.0),
            (self.content.height - self.viewport.height).max(0.0),
        )
    }

    /// Clamp `p` into `[0, max_offset]` on each axis.
    pub fn clamp(&self, p: Point) -> Point {
        let max = self.max_offset();
        Point::new(p.x.clamp(0.0, max.x), p.y.clamp(0.0, max.y))
    }
}

/// The window the restoration loop scrolls.
///
/// The awaitable hooks are plain futures so that any executor can drive the loop; in a browser
/// they wrap `setTimeout` and `requestAnimationFrame`.
pub trait ScrollHost {
    /// Current window scroll offset (`scrollX`, `scrollY`).
    fn scroll_offset(&self) -> Point;
    /// Current scroll extents.
    fn metrics(&self) -> ScrollMetrics;
    /// Scroll the window to `p`.
    fn scroll_to(&self, p: Point);
    /// Returns true while the scrolling container reports requests in flight.
    fn container_busy(&self) -> bool;
    /// Resolve after `delay`.
    fn idle(&self, delay: Duration) -> impl Future<Output = ()>;
    /// Resolve on the next animation frame.
    fn next_frame(&self) -> impl Future<Output = ()>;
}

/// Tracker of in-flight requests.
pub trait AjaxActivity {
    /// Resolve once no tracked request is in flight, after an optional settle delay.
    fn wait(&self, settle: Option<Duration>) -> impl Future<Output = ()>;
    /// Returns true while any tracked request is in flight.
    fn busy(&self) -> bool;
}

impl<H: ScrollHost + ?Sized> ScrollHost for &H {
    fn scroll_offset(&self) -> Point {
        (**self).scroll_offset()
    }

    fn metrics(&self) -> ScrollMetrics {
        (**self).metrics()
    }

    fn scroll_to(&self, p: Point) {
        (**self).scroll_to(p);
    }

    fn container_busy(&self) -> bool {
        (**self).container_busy()
    }

    fn idle(&self, delay: Duration) -> impl Future<Output = ()> {
        (**self).idle(delay)
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        (**self).next_frame()
    }
}

impl<A: AjaxActivity + ?Sized> AjaxActivity for &A {
    fn wait(&self, settle: Option<Duration>) -> impl Future<Output = ()> {
        (**self).wait(settle)
    }

    fn busy(&self) -> bool {
        (**self).busy()
    }
}

/// Tuning for [`restore_scroll`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RestoreConfig {
    /// Pause before each attempt.
    pub idle_delay: Duration,
    /// Attempts before giving up.
    pub max_attempts: u32,
    /// Distance in pixels at which the target counts as reached.
    pub tolerance: f64,
    /// Settle delay passed to [`AjaxActivity::wait`].
    pub settle: Option<Duration>,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            idle_delay: IDLE_DELAY,
            max_attempts: MAX_ATTEMPTS,
            tolerance: TOLERANCE,
            settle: None,
        }
    }
}

/// How a restoration ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RestoreOutcome {
    /// There was no position to restore.
    NoTarget,
    /// The target was reached on the given attempt.
    Restored {
        /// 1-based attempt that reached the target.
        attempts: u32,
    },
    /// The attempt budget ran out; the window stays at the closest reachable offset.
    Abandoned {
        /// Attempts made.
        attempts: u32,
    },
}

/// Scroll the window to `target`, retrying while content is still arriving.
///
/// See the module docs for the protocol.
pub async fn restore_scroll<H: ScrollHost, A: AjaxActivity>(
    host: &H,
    ajax: &A,
    target: ScrollPosition,
    config: &RestoreConfig,
) -> RestoreOutcome {
    let target = target.to_point();
    let goal_top = target.y.max(0.0);
    let mut baseline = host.metrics().content.height;
    let mut wait_for_requests = true;

    for attempt in 1..=config.max_attempts {
        host.idle(config.idle_delay).await;
        if wait_for_requests {
            ajax.wait(config.settle).await;
        }

        let clamped = host.metrics().clamp(target);
        host.next_frame().await;
        host.next_frame().await;
        host.scroll_to(clamped);

        let top = host.scroll_offset().y;
        if (top - goal_top).abs() <= config.tolerance {
            debug!(attempt, x = clamped.x, y = clamped.y, "scroll position restored");
            return RestoreOutcome::Restored { attempts: attempt };
        }

        let metrics = host.metrics();
        let needs_more_content = target.y > metrics.max_offset().y;
        let height_changed = metrics.content.height != baseline;
        baseline = metrics.content.height;
        wait_for_requests =
            needs_more_content || height_changed || host.container_busy() || ajax.busy();
        trace!(
            attempt,
            top,
            goal_top,
            needs_more_content,
            height_changed,
            wait_for_requests,
            "scroll position not reached yet"
        );
    }

    debug!(attempts = config.max_attempts, "scroll restoration abandoned");
    RestoreOutcome::Abandoned {
        attempts: config.max_attempts,
    }
}
