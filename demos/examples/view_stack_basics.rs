// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Views entering and leaving, and the document state that follows the top.
//!
//! Run:
//! - `cargo run -p vista_demos --example view_stack_basics`
//! - `RUST_LOG=vista_view=trace cargo run -p vista_demos --example view_stack_basics`

use vista_view::headless::HeadlessDom;
use vista_view::types::{DocumentNode, ViewScope};
use vista_view::{Dom, ViewStack};

fn main() {
    vista_demos::init_logging();

    let dom = HeadlessDom::new();
    dom.add_class(DocumentNode::Html, "is-loading");
    let app = dom.create_element(dom.body(), "div");
    let page = dom.create_element(app, "main");
    let search = dom.create_element(page, "input");
    dom.set_attribute(search, "tabindex", "1");
    let lightbox = dom.create_element(dom.body(), "div");

    let mut views = ViewStack::new(&dom);
    let app = ViewScope::new(0, "App").with_root(app);
    let page = ViewScope::new(1, "PPageAlbums").with_root(page);
    let lightbox = ViewScope::new(2, "PLightbox").with_root(lightbox);

    views.enter(app, None, None);
    views.enter(page.clone(), None, None);
    report("albums page", &views, &dom);
    assert_eq!(dom.focused(), Some(search));

    views.enter(lightbox.clone(), None, None);
    report("lightbox open", &views, &dom);
    assert!(views.prevent_navigation());

    // The page unmounts underneath the lightbox; nothing visible changes.
    views.leave(&page);
    report("page gone", &views, &dom);

    views.leave(&lightbox);
    report("lightbox closed", &views, &dom);
    assert!(views.is_app());
}

fn report(label: &str, views: &ViewStack<&HeadlessDom>, dom: &HeadlessDom) {
    let stack: Vec<&str> = views.iter().map(|s| s.name.as_str()).collect();
    println!("== {label} ==");
    println!("  stack: {stack:?}");
    println!("  flags: {:?}", views.flags());
    println!("  <html>: {:?}", dom.classes(DocumentNode::Html));
    println!("  <body>: {:?}", dom.classes(DocumentNode::Body));
}
