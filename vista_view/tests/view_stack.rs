// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View stack behaviour against the headless document.

use proptest::prelude::*;
use vista_view::headless::{HeadlessDom, NodeRef};
use vista_view::policy::ViewFlags;
use vista_view::touch::TouchKind;
use vista_view::types::{DocumentNode, ViewScope};
use vista_view::{Dom, ViewStack};

fn scope(dom: &HeadlessDom, uid: u32, name: &str) -> ViewScope<NodeRef> {
    ViewScope::new(uid, name).with_root(dom.create_element(dom.body(), "div"))
}

#[test]
fn loading_marker_cleared_once() {
    let dom = HeadlessDom::new();
    dom.add_class(DocumentNode::Html, "is-loading");
    let mut views = ViewStack::new(&dom);

    views.enter(scope(&dom, 0, "App"), None, None);
    assert!(!dom.has_class(DocumentNode::Html, "is-loading"));

    dom.add_class(DocumentNode::Html, "is-loading");
    views.enter(scope(&dom, 1, "PPageAlbums"), None, None);
    assert!(dom.has_class(DocumentNode::Html, "is-loading"));
}

#[test]
fn reentering_the_top_writes_nothing() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    views.enter(scope(&dom, 0, "App"), None, None);

    let lightbox = scope(&dom, 5, "PLightbox");
    assert_eq!(views.enter(lightbox.clone(), None, None), Some(2));
    let writes = dom.class_writes();
    assert_eq!(writes, 3);

    assert_eq!(views.enter(lightbox.clone(), None, None), Some(2));
    assert!(!views.apply(&lightbox, None, None));
    assert_eq!(dom.class_writes(), writes);
}

#[test]
fn leaving_below_the_top_keeps_document_state() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    views.enter(scope(&dom, 0, "App"), None, None);
    let page = scope(&dom, 1, "PPageAlbums");
    views.enter(page.clone(), None, None);
    views.enter(scope(&dom, 2, "PLightbox"), None, None);
    let writes = dom.class_writes();

    assert_eq!(views.leave(&page), Some(2));
    assert_eq!(views.current_name(), "PLightbox");
    assert_eq!(views.parent_name(), "App");
    assert_eq!(dom.class_writes(), writes);
    assert!(dom.has_class(DocumentNode::Body, "disable-scrolling"));
}

#[test]
fn unknown_and_invalid_scopes() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    views.enter(scope(&dom, 0, "App"), None, None);

    assert_eq!(views.leave(&scope(&dom, 9, "PNever")), None);
    assert_eq!(views.enter(ViewScope::new(3, "PRootless"), None, None), None);
    assert_eq!(views.enter(scope(&dom, 4, ""), None, None), None);
    assert_eq!(views.len(), 1);
    assert!(views.is_root());
}

#[test]
fn touch_filter_follows_the_top() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    views.enter(scope(&dom, 0, "App"), None, None);
    assert!(!views.touch_filter_attached());

    let lightbox = scope(&dom, 5, "PLightbox");
    views.enter(lightbox.clone(), None, None);
    assert!(views.touch_filter_attached());
    assert!(TouchKind::ALL.iter().all(|&k| dom.has_touch_listener(k)));
    assert!(dom.has_class(DocumentNode::Body, "disable-navigation-gestures"));

    views.leave(&lightbox);
    assert!(!views.touch_filter_attached());
    assert!(TouchKind::ALL.iter().all(|&k| !dom.has_touch_listener(k)));
    assert!(!dom.has_class(DocumentNode::Body, "disable-navigation-gestures"));
}

#[test]
fn active_and_hidden() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    assert!(views.is_app());
    assert!(views.is_active("Anything"));

    views.enter(scope(&dom, 0, "App"), None, None);
    let page = scope(&dom, 1, "PPageAlbums");
    views.enter(page.clone(), None, None);

    assert!(views.is_active(&page));
    assert!(views.is_active("PPageAlbums"));
    assert!(views.is_active(1_u32));
    assert!(views.is_hidden("App"));
    assert!(!views.is_root());

    views.leave(&page);
    assert!(views.is_app());
    assert!(views.is_active("PPageAlbums"));
}

#[test]
fn navigation_is_held_for_dialogs_only() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    views.enter(scope(&dom, 0, "App"), None, None);
    assert!(!views.prevent_navigation());

    let edit = scope(&dom, 1, "PAlbumEditDialog");
    views.enter(edit.clone(), None, None);
    assert!(views.prevent_navigation());
    views.leave(&edit);

    let upload = scope(&dom, 2, "PUploadDialog");
    views.enter(upload.clone(), None, None);
    assert!(!views.prevent_navigation());
    views.leave(&upload);

    views.enter(scope(&dom, 3, "PPageSettings"), None, None);
    assert!(!views.prevent_navigation());
}

#[test]
fn hidden_scrollbar_survives_shallow_stacks() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    views.enter(scope(&dom, 0, "App"), None, None);

    let lightbox = scope(&dom, 1, "PLightbox");
    views.enter(lightbox.clone(), None, None);
    assert!(dom.has_class(DocumentNode::Html, "hide-scrollbar"));

    // Back at depth 1 the inherited value keeps the scrollbar hidden.
    views.leave(&lightbox);
    assert!(dom.has_class(DocumentNode::Html, "hide-scrollbar"));

    views.enter(scope(&dom, 2, "PPageAlbums"), None, None);
    assert!(dom.has_class(DocumentNode::Html, "hide-scrollbar"));

    views.enter(scope(&dom, 3, "PAlbumEditDialog"), None, None);
    assert!(!dom.has_class(DocumentNode::Html, "hide-scrollbar"));
}

#[test]
fn remount_after_empty_applies_again() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    let lightbox = scope(&dom, 5, "PLightbox");

    views.enter(lightbox.clone(), None, None);
    assert_eq!(views.leave(&lightbox), Some(0));
    assert!(views.is_empty());
    assert!(views.apply(&lightbox, None, None));
}

#[test]
fn emptied_stack_releases_navigation() {
    let dom = HeadlessDom::new();
    let mut views = ViewStack::new(&dom);
    let lightbox = scope(&dom, 5, "PLightbox");

    views.enter(lightbox.clone(), None, None);
    assert!(views.prevent_navigation());
    assert!(views.touch_filter_attached());

    assert_eq!(views.leave(&lightbox), Some(0));
    assert!(!views.prevent_navigation());
    assert_eq!(views.flags(), ViewFlags::empty());
    assert!(!views.touch_filter_attached());
    assert!(TouchKind::ALL.iter().all(|&k| !dom.has_touch_listener(k)));

    // Remounting restores the view's own flags.
    views.enter(lightbox, None, None);
    assert!(views.prevent_navigation());
    assert!(views.touch_filter_attached());
}

#[derive(Clone, Debug)]
enum Op {
    Enter(u32),
    Leave(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(1_u32..6).prop_map(Op::Enter), (1_u32..6).prop_map(Op::Leave)]
}

proptest! {
    #[test]
    fn stack_matches_model(ops in prop::collection::vec(op(), 0..48)) {
        let dom = HeadlessDom::new();
        let scopes: Vec<_> = (0..6)
            .map(|uid| {
                let name = if uid % 2 == 0 { "PLightbox" } else { "PView" };
                scope(&dom, uid, name)
            })
            .collect();
        let mut views = ViewStack::new(&dom);
        let mut model: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                Op::Enter(uid) => {
                    let depth = views.enter(scopes[uid as usize].clone(), None, None);
                    if model.last() != Some(&uid) {
                        model.push(uid);
                    }
                    prop_assert_eq!(depth, Some(model.len()));
                }
                Op::Leave(uid) => {
                    let found = model.iter().rposition(|&u| u == uid);
                    let expected = found.map(|idx| {
                        model.remove(idx);
                        model.len()
                    });
                    prop_assert_eq!(views.leave(&scopes[uid as usize]), expected);
                }
            }

            let uids: Vec<u32> = views.iter().map(|s| s.uid).collect();
            prop_assert_eq!(&uids, &model);
            prop_assert_eq!(
                views.touch_filter_attached(),
                views.flags().contains(ViewFlags::DISABLE_NAVIGATION_GESTURES)
            );
            prop_assert_eq!(dom.has_touch_listener(TouchKind::Start), views.touch_filter_attached());
            if let Some(top) = views.current() {
                prop_assert_eq!(
                    views.flags().contains(ViewFlags::DISABLE_SCROLLING),
                    top.name == "PLightbox"
                );
            }
        }
    }
}
