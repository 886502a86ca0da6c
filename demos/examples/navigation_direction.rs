// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inferring back/forward/replace from router history states.
//!
//! Run:
//! - `cargo run -p vista_demos --example navigation_direction`

use serde_json::json;
use vista_navigation::tracker::NavigationTracker;
use vista_navigation::types::Direction;

fn main() {
    vista_demos::init_logging();

    let mut nav = NavigationTracker::new();
    let history = [
        ("open albums", json!({ "position": 1 })),
        ("open album", json!({ "position": 2 })),
        ("open photo", json!({ "position": 3 })),
        ("back", json!({ "position": 2 })),
        ("filter (replace)", json!({ "position": 2 })),
        ("forward", json!({ "position": 3 })),
        ("external link", json!({})),
    ];

    println!("== Navigation ==");
    let mut seen = Vec::new();
    for (label, state) in &history {
        nav.prepare_navigation(state);
        nav.commit_navigation(state);
        let restore = nav.consume_backward_navigation();
        println!(
            "  {label:<18} -> {:?} (restore list state: {restore})",
            nav.navigation_direction()
        );
        seen.push(nav.navigation_direction());
        nav.reset_navigation_direction(Direction::None);
    }

    assert_eq!(
        seen,
        [
            Direction::Replace,
            Direction::Forward,
            Direction::Forward,
            Direction::Back,
            Direction::Replace,
            Direction::Forward,
            Direction::None,
        ]
    );
}
