// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus resolution for view scopes.
//!
//! When a view becomes active, keyboard focus should land inside it: on the element the view
//! marked as focusable, else on its root, and on desktop preferably on its first input.

use tracing::{debug, warn};

use crate::dom::Dom;
use crate::types::ViewScope;

/// Sub-element names searched, in order, for an explicit `tabindex`.
pub const FOCUS_REFS: [&str; 5] = ["form", "content", "container", "dialog", "page"];

/// Selector for the input a view wants focused first on non-mobile viewports.
pub const FIRST_INPUT_SELECTOR: &str = r#"input[tabindex="1"]"#;

/// Something [`set_focus`] can focus.
#[derive(Debug)]
pub enum FocusTarget<'a, E> {
    /// The first element in the document matching a selector.
    Selector(&'a str),
    /// A specific element.
    Element(E),
    /// A view's root element.
    Scope(&'a ViewScope<E>),
}

/// Find the element that should receive focus when `scope` becomes active.
///
/// 1. The first of the [`FOCUS_REFS`] sub-elements that carries a `tabindex` attribute.
/// 2. Otherwise the scope root, or its parent if the root is not an element. On non-mobile
///    viewports an input matching [`FIRST_INPUT_SELECTOR`] inside it is preferred.
/// 3. Otherwise, for scopes with a `dialog` ref, the active overlay's content container.
pub fn find_focus_element<D: Dom>(dom: &D, scope: &ViewScope<D::Element>) -> Option<D::Element> {
    for name in FOCUS_REFS {
        if let Some(el) = scope.get_ref(name)
            && dom.has_attribute(el, "tabindex")
        {
            return Some(el.clone());
        }
    }

    let resolved = scope.root.as_ref().and_then(|root| {
        if dom.is_element(root) {
            Some(root.clone())
        } else {
            dom.parent_element(root)
        }
    });

    if let Some(el) = &resolved
        && !dom.is_mobile()
        && let Some(input) = dom.query_selector(Some(el), FIRST_INPUT_SELECTOR)
    {
        return Some(input);
    }

    if resolved.is_none() && scope.get_ref("dialog").is_some() {
        return dom.active_overlay_content();
    }

    resolved
}

/// Focus `target`, or the first match of `selector` inside it.
///
/// Scrolling the element into view is suppressed unless `scroll` is set. Returns false if
/// nothing could be resolved or the document refused; failures are logged, never propagated.
pub fn set_focus<D: Dom>(
    dom: &D,
    target: FocusTarget<'_, D::Element>,
    selector: Option<&str>,
    scroll: bool,
) -> bool {
    let el = match target {
        FocusTarget::Selector(sel) => dom.query_selector(None, sel),
        FocusTarget::Element(el) => Some(el),
        FocusTarget::Scope(scope) => scope.root.clone(),
    };
    let el = match (el, selector) {
        (Some(el), Some(sel)) => dom.query_selector(Some(&el), sel),
        (el, _) => el,
    };

    let Some(el) = el else {
        debug!(?selector, "no focus target");
        return false;
    };

    match dom.focus(&el, !scroll) {
        Ok(()) => true,
        Err(err) => {
            warn!(element = ?el, %err, "focus failed");
            false
        }
    }
}
