// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document port.

use core::fmt::Debug;

use thiserror::Error;

use crate::touch::TouchKind;
use crate::types::DocumentNode;

/// Errors a [`Dom`] reports when focusing an element.
///
/// The view stack logs these and carries on; focus is best-effort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The element is no longer attached to the document.
    #[error("element is detached from the document")]
    Detached,
    /// The node cannot receive focus (e.g. a text or comment node).
    #[error("node cannot receive focus")]
    NotFocusable,
    /// Any other host-side failure.
    #[error("host error: {0}")]
    Host(String),
}

/// The slice of the document the view stack reads and writes.
///
/// Implement this over your toolkit's document (for example `web-sys` in a browser) and hand it
/// to [`ViewStack::new`](crate::ViewStack::new). Methods take `&self`: the document is shared and
/// implementations use interior mutability or host handles.
pub trait Dom {
    /// Host element handle.
    type Element: Clone + PartialEq + Debug;

    /// Returns true if `node`'s class list contains `class`.
    fn has_class(&self, node: DocumentNode, class: &str) -> bool;
    /// Adds `class` to `node`'s class list.
    fn add_class(&self, node: DocumentNode, class: &str);
    /// Removes `class` from `node`'s class list.
    fn remove_class(&self, node: DocumentNode, class: &str);

    /// Attach a window-level, non-passive listener for `kind` that calls
    /// [`prevent_touch`](crate::touch::prevent_touch) and cancels the event when it returns true.
    fn add_touch_listener(&self, kind: TouchKind);
    /// Detach the listener added by [`add_touch_listener`](Self::add_touch_listener).
    fn remove_touch_listener(&self, kind: TouchKind);

    /// Returns true if `node` is an element (as opposed to text, comment, or fragment nodes).
    fn is_element(&self, node: &Self::Element) -> bool;
    /// Returns the parent element of `node`, if any.
    fn parent_element(&self, node: &Self::Element) -> Option<Self::Element>;
    /// Returns true if `node` carries the attribute `name`.
    fn has_attribute(&self, node: &Self::Element, name: &str) -> bool;
    /// First element matching `selector`, searching the descendants of `within` or the whole
    /// document.
    fn query_selector(&self, within: Option<&Self::Element>, selector: &str)
    -> Option<Self::Element>;
    /// Content container of the topmost open overlay (dialog), if any.
    fn active_overlay_content(&self) -> Option<Self::Element>;
    /// Returns true on mobile-sized viewports.
    fn is_mobile(&self) -> bool;

    /// Focus `node`, suppressing the browser's scroll-into-view when `prevent_scroll` is set.
    fn focus(&self, node: &Self::Element, prevent_scroll: bool) -> Result<(), DomError>;
}

impl<D: Dom + ?Sized> Dom for &D {
    type Element = D::Element;

    fn has_class(&self, node: DocumentNode, class: &str) -> bool {
        (**self).has_class(node, class)
    }

    fn add_class(&self, node: DocumentNode, class: &str) {
        (**self).add_class(node, class);
    }

    fn remove_class(&self, node: DocumentNode, class: &str) {
        (**self).remove_class(node, class);
    }

    fn add_touch_listener(&self, kind: TouchKind) {
        (**self).add_touch_listener(kind);
    }

    fn remove_touch_listener(&self, kind: TouchKind) {
        (**self).remove_touch_listener(kind);
    }

    fn is_element(&self, node: &Self::Element) -> bool {
        (**self).is_element(node)
    }

    fn parent_element(&self, node: &Self::Element) -> Option<Self::Element> {
        (**self).parent_element(node)
    }

    fn has_attribute(&self, node: &Self::Element, name: &str) -> bool {
        (**self).has_attribute(node, name)
    }

    fn query_selector(
        &self,
        within: Option<&Self::Element>,
        selector: &str,
    ) -> Option<Self::Element> {
        (**self).query_selector(within, selector)
    }

    fn active_overlay_content(&self) -> Option<Self::Element> {
        (**self).active_overlay_content()
    }

    fn is_mobile(&self) -> bool {
        (**self).is_mobile()
    }

    fn focus(&self, node: &Self::Element, prevent_scroll: bool) -> Result<(), DomError> {
        (**self).focus(node, prevent_scroll)
    }
}
