// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving the scroll position before a reload and restoring it while content trickles in.
//!
//! Run:
//! - `cargo run -p vista_demos --example scroll_restore`

use std::rc::Rc;

use kurbo::{Point, Size};
use vista_storage::{MemoryStorage, SystemClock};
use vista_view::headless::{HeadlessAjax, HeadlessDom, HeadlessWindow};
use vista_view::scroll::{RestoreOutcome, ScrollHost};
use vista_view::{PageShow, ViewConfig, ViewController};

fn main() {
    vista_demos::init_logging();

    let dom = HeadlessDom::new();
    let ajax = HeadlessAjax::new();
    let local = Rc::new(MemoryStorage::new());

    // Before the reload: the user scrolled far down a long result list.
    let before = HeadlessWindow::new(Size::new(1280.0, 800.0), Size::new(1280.0, 9000.0));
    before.set_offset(Point::new(0.0, 6400.0));
    let mut controller = ViewController::new(
        &dom,
        &before,
        &ajax,
        Rc::new(MemoryStorage::new()),
        Rc::clone(&local),
        SystemClock,
        ViewConfig::default(),
    );
    controller.on_page_hide(true);
    drop(controller);

    // After the reload: the list renders in batches of 1500px.
    let after = HeadlessWindow::new(Size::new(1280.0, 800.0), Size::new(1280.0, 1500.0));
    after.queue_content_growth([1500.0; 6]);
    let mut controller = ViewController::new(
        &dom,
        &after,
        &ajax,
        Rc::new(MemoryStorage::new()),
        Rc::clone(&local),
        SystemClock,
        ViewConfig::default(),
    );
    let outcome = pollster::block_on(controller.on_page_show(PageShow::Reloaded));

    println!("== Restore ==");
    println!("  outcome: {outcome:?}");
    println!("  scroll calls: {:?}", after.scroll_calls());
    println!("  final offset: {:?}", after.scroll_offset());
    assert!(matches!(outcome, RestoreOutcome::Restored { .. }));
    assert_eq!(after.scroll_offset(), Point::new(0.0, 6400.0));
}
