// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use vista_navigation::tracker::NavigationTracker;
use vista_navigation::types::Direction;

/// A browsing session that drills down, goes back, and replaces along the way.
fn session(len: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(len);
    let mut pos = 0.0;
    for i in 0..len {
        pos = match i % 5 {
            0..=2 => pos + 1.0,
            3 => pos - 1.0,
            _ => pos,
        };
        out.push(pos);
    }
    out
}

fn bench_two_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation_tracker");
    for len in [64_usize, 1024] {
        let positions = session(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(format!("prepare_commit_{len}"), |b| {
            b.iter(|| {
                let mut nav = NavigationTracker::new();
                let mut backs = 0_u32;
                for p in &positions {
                    nav.prepare_navigation(p);
                    nav.commit_navigation(p);
                    if nav.consume_backward_navigation() {
                        backs += 1;
                    }
                    nav.reset_navigation_direction(Direction::None);
                }
                black_box(backs)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_two_phase);
criterion_main!(benches);
