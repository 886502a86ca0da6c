// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vista View: a stack-based view controller for single-page apps.
//!
//! ## Overview
//!
//! A single-page app shows pages, dialogs, and lightboxes on top of each other, and the document
//! has to follow whichever one is on top: whether the page scrollbar shows, whether the body
//! scrolls, whether edge swipes may navigate the browser, and where keyboard focus lands. This
//! crate keeps that state consistent.
//!
//! - [`ViewStack`] records active views in mount order and applies the topmost one.
//! - [`policy`] decides, per view name, which document flags to set.
//! - [`focus`] picks the element that should receive focus when a view becomes active.
//! - [`touch`] is the predicate behind the navigation-gesture filter.
//! - [`scroll`] restores the window scroll position after a reload or back/forward resume,
//!   retrying while content is still loading.
//! - [`ViewController`] ties these to the navigation tracker from `vista_navigation` and the
//!   stores from `vista_storage`.
//!
//! ## Ports
//!
//! Nothing here talks to a browser directly. The host implements [`Dom`],
//! [`ScrollHost`](crate::scroll::ScrollHost) and [`AjaxActivity`](crate::scroll::AjaxActivity)
//! over its toolkit and passes them in. The [`headless`] module has in-process implementations
//! for tests and tools.
//!
//! ## Minimal example
//!
//! ```
//! use vista_view::headless::HeadlessDom;
//! use vista_view::types::{DocumentNode, ViewScope};
//! use vista_view::{Dom, ViewStack};
//!
//! let dom = HeadlessDom::new();
//! let app_root = dom.create_element(dom.body(), "div");
//! let lightbox_root = dom.create_element(dom.body(), "div");
//!
//! let mut views = ViewStack::new(&dom);
//! views.enter(ViewScope::new(0, "App").with_root(app_root), None, None);
//!
//! let lightbox = ViewScope::new(7, "PLightbox").with_root(lightbox_root);
//! assert_eq!(views.enter(lightbox.clone(), None, None), Some(2));
//! assert!(dom.has_class(DocumentNode::Body, "disable-scrolling"));
//! assert!(views.prevent_navigation());
//!
//! assert_eq!(views.leave(&lightbox), Some(1));
//! assert!(!dom.has_class(DocumentNode::Body, "disable-scrolling"));
//! assert!(!views.prevent_navigation());
//! ```

pub mod controller;
pub mod dom;
pub mod focus;
pub mod headless;
pub mod policy;
pub mod scroll;
pub mod stack;
pub mod touch;
pub mod types;

pub use controller::{PageShow, ViewConfig, ViewController};
pub use dom::{Dom, DomError};
pub use stack::ViewStack;
