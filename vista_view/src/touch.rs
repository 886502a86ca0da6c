// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch filter used while navigation gestures are suppressed.
//!
//! Mobile browsers treat a horizontal swipe from the screen edge as back/forward navigation,
//! and some treat a vertical drag as pull-to-refresh. While a lightbox or editor is open those
//! gestures would tear down the view, so the host cancels the touches this predicate selects.

use kurbo::{Point, Rect};

/// Width of the left-edge strip in which `touchstart` is cancelled.
pub const EDGE_SWIPE_WIDTH: f64 = 30.0;

/// Touch event kinds the filter listens to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum TouchKind {
    /// `touchstart`
    Start,
    /// `touchmove`
    Move,
}

impl TouchKind {
    /// Both kinds, in attach order.
    pub const ALL: [Self; 2] = [Self::Start, Self::Move];

    /// DOM event type name.
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Start => "touchstart",
            Self::Move => "touchmove",
        }
    }
}

/// What the predicate needs to know about a touch event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Event kind.
    pub kind: TouchKind,
    /// First touch point in viewport coordinates.
    pub point: Point,
    /// The event target is an input element.
    pub target_is_input: bool,
    /// Viewport bounds of the media element (image or video) under the touch, if any.
    pub media_bounds: Option<Rect>,
}

/// Returns true if the host should cancel (`preventDefault`) the touch event.
///
/// - `touchstart` is cancelled within [`EDGE_SWIPE_WIDTH`] of the left edge, or over the lower
///   half of a media element.
/// - `touchmove` is cancelled unless it targets an input.
pub fn prevent_touch(sample: &TouchSample) -> bool {
    match sample.kind {
        TouchKind::Start => {
            sample.point.x <= EDGE_SWIPE_WIDTH
                || sample
                    .media_bounds
                    .is_some_and(|media| in_lower_half(media, sample.point))
        }
        TouchKind::Move => !sample.target_is_input,
    }
}

fn in_lower_half(media: Rect, pt: Point) -> bool {
    media.contains(pt) && pt.y >= media.center().y
}
