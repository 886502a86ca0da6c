// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vista_view::ViewStack;
use vista_view::headless::{HeadlessDom, NodeRef};
use vista_view::types::ViewScope;

const NAMES: [&str; 4] = ["PPageAlbums", "PLightbox", "PAlbumEditDialog", "PUploadDialog"];

fn scopes(dom: &HeadlessDom, n: u32) -> Vec<ViewScope<NodeRef>> {
    (1..=n)
        .map(|uid| {
            let root = dom.create_element(dom.body(), "div");
            let input = dom.create_element(root, "input");
            dom.set_attribute(input, "tabindex", "1");
            ViewScope::new(uid, NAMES[uid as usize % NAMES.len()]).with_root(root)
        })
        .collect()
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

fn bench_nested_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_stack_nested");
    for depth in [4_u32, 16, 64] {
        let dom = HeadlessDom::new();
        let app = ViewScope::new(0, "App").with_root(dom.create_element(dom.body(), "div"));
        let views = scopes(&dom, depth);
        group.throughput(Throughput::Elements(u64::from(depth) * 2));
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter_batched(
                || {
                    let mut stack = ViewStack::new(&dom);
                    stack.enter(app.clone(), None, None);
                    stack
                },
                |mut stack| {
                    for scope in &views {
                        black_box(stack.enter(scope.clone(), None, None));
                    }
                    for scope in views.iter().rev() {
                        black_box(stack.leave(scope));
                    }
                    stack
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_out_of_order_leave(c: &mut Criterion) {
    let dom = HeadlessDom::new();
    let views = scopes(&dom, 32);
    c.bench_function("view_stack_random_leave_32", |b| {
        b.iter_batched(
            || {
                let mut stack = ViewStack::new(&dom);
                for scope in &views {
                    stack.enter(scope.clone(), None, None);
                }
                (stack, Rng(0x9E37_79B9_7F4A_7C15))
            },
            |(mut stack, mut rng)| {
                while !stack.is_empty() {
                    let idx = (rng.next_u64() % stack.len() as u64) as usize;
                    let victim = stack.iter().nth(idx).cloned();
                    if let Some(victim) = victim {
                        black_box(stack.leave(&victim));
                    }
                }
                stack
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_nested_open_close, bench_out_of_order_leave);
criterion_main!(benches);
