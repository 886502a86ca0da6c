// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view stack.
//!
//! ## Overview
//!
//! Tracks which views are mounted, in mount order, and keeps the document in the state the
//! topmost one asks for: scrollbar, body scrolling, navigation gestures, and focus.
//!
//! ## Ordering
//!
//! - [`ViewStack::enter`] pushes a view unless it already is the top.
//! - [`ViewStack::leave`] removes the *last* occurrence of a view, wherever it is. Views may
//!   unmount out of nesting order; only removing the top re-applies document state.
//!
//! ## Document writes
//!
//! [`ViewStack::apply`] skips views it already applied, and each class is only added when
//! missing and only removed when present.

use core::fmt;

use tracing::{debug, trace, warn};

use crate::dom::Dom;
use crate::focus::{FocusTarget, find_focus_element, set_focus};
use crate::policy::{ViewContext, ViewFlags, ViewPolicy};
use crate::touch::TouchKind;
use crate::types::{DocumentNode, DomClasses, ViewRef, ViewScope};

/// Ordered stack of active view scopes.
///
/// ## Usage
///
/// - Construct with [`ViewStack::new`] (default classes and policy) or
///   [`ViewStack::with_config`].
/// - Call [`ViewStack::enter`] when a component mounts and [`ViewStack::leave`] when it
///   unmounts.
/// - Read [`ViewStack::prevent_navigation`] from the router guard.
pub struct ViewStack<D: Dom> {
    dom: D,
    classes: DomClasses,
    policy: ViewPolicy,
    scopes: Vec<ViewScope<D::Element>>,
    initialized: bool,
    last_applied: Option<u32>,
    flags: ViewFlags,
    touch_filter: bool,
}

impl<D: Dom> fmt::Debug for ViewStack<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.scopes.iter().map(|s| s.name.as_str()).collect();
        f.debug_struct("ViewStack")
            .field("scopes", &names)
            .field("last_applied", &self.last_applied)
            .field("flags", &self.flags)
            .field("touch_filter", &self.touch_filter)
            .finish_non_exhaustive()
    }
}

impl<D: Dom> ViewStack<D> {
    /// Create an empty stack with default classes and policy.
    pub fn new(dom: D) -> Self {
        Self::with_config(dom, DomClasses::default(), ViewPolicy::default())
    }

    /// Create an empty stack with explicit classes and policy.
    pub fn with_config(dom: D, classes: DomClasses, policy: ViewPolicy) -> Self {
        Self {
            dom,
            classes,
            policy,
            scopes: Vec::new(),
            initialized: false,
            last_applied: None,
            flags: ViewFlags::empty(),
            touch_filter: false,
        }
    }

    /// Borrow the document port.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The policy table.
    pub fn policy(&self) -> &ViewPolicy {
        &self.policy
    }

    /// Replace the policy table. Takes effect on the next applied view.
    pub fn set_policy(&mut self, policy: ViewPolicy) {
        self.policy = policy;
    }

    /// Push `scope` (unless it already is the top) and apply it.
    ///
    /// The first call also clears the document's loading marker. Focus goes to `focus_element`
    /// (or the first match of `focus_selector` inside it or the scope root) when given, and to
    /// the automatically resolved element otherwise.
    ///
    /// Returns the new depth, or `None` if `scope` is invalid.
    pub fn enter(
        &mut self,
        scope: ViewScope<D::Element>,
        focus_element: Option<D::Element>,
        focus_selector: Option<&str>,
    ) -> Option<usize> {
        if !scope.is_valid() {
            warn!(uid = scope.uid, name = %scope.name, "cannot enter invalid view scope");
            return None;
        }

        if self.scopes.is_empty() && !self.initialized {
            self.init_document();
        }

        if self.current().is_none_or(|top| top.uid != scope.uid) {
            debug!(uid = scope.uid, name = %scope.name, depth = self.scopes.len() + 1, "enter view");
            self.scopes.push(scope);
        }

        self.apply_top(focus_element, focus_selector);
        Some(self.scopes.len())
    }

    /// Remove the last occurrence of `scope`.
    ///
    /// If it was the top, the new top is applied. Returns the new depth, or `None` if `scope`
    /// was never entered.
    pub fn leave(&mut self, scope: &ViewScope<D::Element>) -> Option<usize> {
        let Some(idx) = self.scopes.iter().rposition(|s| s.uid == scope.uid) else {
            warn!(uid = scope.uid, name = %scope.name, "cannot leave a view that never entered");
            return None;
        };

        let was_top = idx + 1 == self.scopes.len();
        self.scopes.remove(idx);
        debug!(uid = scope.uid, name = %scope.name, depth = self.scopes.len(), was_top, "leave view");

        if self.scopes.is_empty() {
            // A remount of the same view must apply again, and an empty stack holds nothing.
            self.last_applied = None;
            self.flags = ViewFlags::empty();
            self.set_touch_filter(false);
        } else if was_top {
            self.apply_top(None, None);
        }
        Some(self.scopes.len())
    }

    /// Make the document reflect `scope`: focus, scrollbar, scrolling, navigation gestures.
    ///
    /// Returns false without touching the document if `scope` is invalid or was the last view
    /// applied.
    pub fn apply(
        &mut self,
        scope: &ViewScope<D::Element>,
        focus_element: Option<D::Element>,
        focus_selector: Option<&str>,
    ) -> bool {
        if !scope.is_valid() {
            warn!(uid = scope.uid, name = %scope.name, "cannot apply invalid view scope");
            return false;
        }
        if self.last_applied == Some(scope.uid) {
            trace!(uid = scope.uid, "view already applied");
            return false;
        }
        self.last_applied = Some(scope.uid);

        match (focus_element, focus_selector) {
            (None, None) => {
                if let Some(el) = find_focus_element(&self.dom, scope) {
                    set_focus(&self.dom, FocusTarget::Element(el), None, false);
                }
            }
            (Some(el), selector) => {
                set_focus(&self.dom, FocusTarget::Element(el), selector, false);
            }
            (None, selector) => {
                set_focus(&self.dom, FocusTarget::Scope(scope), selector, false);
            }
        }

        let cx = ViewContext {
            depth: self.scopes.len(),
            is_app: scope.is_app(),
            scrollbar_hidden: self
                .dom
                .has_class(DocumentNode::Html, &self.classes.hide_scrollbar),
        };
        let flags = self.policy.resolve(&scope.name, cx);
        debug!(uid = scope.uid, name = %scope.name, ?flags, "apply view");

        self.reconcile(
            DocumentNode::Html,
            &self.classes.hide_scrollbar,
            flags.contains(ViewFlags::HIDE_SCROLLBAR),
        );
        self.reconcile(
            DocumentNode::Body,
            &self.classes.disable_scrolling,
            flags.contains(ViewFlags::DISABLE_SCROLLING),
        );
        self.reconcile(
            DocumentNode::Body,
            &self.classes.disable_navigation_gestures,
            flags.contains(ViewFlags::DISABLE_NAVIGATION_GESTURES),
        );
        self.set_touch_filter(flags.contains(ViewFlags::DISABLE_NAVIGATION_GESTURES));

        self.flags = flags;
        true
    }

    /// Topmost view.
    pub fn current(&self) -> Option<&ViewScope<D::Element>> {
        self.scopes.last()
    }

    /// View directly below the top.
    pub fn parent(&self) -> Option<&ViewScope<D::Element>> {
        self.scopes.iter().rev().nth(1)
    }

    /// Name of the view directly below the top, or `""`.
    pub fn parent_name(&self) -> &str {
        self.parent().map_or("", |s| s.name.as_str())
    }

    /// Name of the topmost view, or `""`.
    pub fn current_name(&self) -> &str {
        self.current().map_or("", |s| s.name.as_str())
    }

    /// Stack depth.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns true if no view entered yet (or all left).
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns true if at most one view is stacked.
    pub fn is_root(&self) -> bool {
        self.scopes.len() <= 1
    }

    /// Returns true if the stack is empty or the application root is on top.
    pub fn is_app(&self) -> bool {
        self.current().is_none_or(ViewScope::is_app)
    }

    /// Returns true if `view` is on top, or the application root is.
    pub fn is_active<'a>(&self, view: impl Into<ViewRef<'a, D::Element>>) -> bool
    where
        D::Element: 'a,
    {
        if self.is_app() {
            return true;
        }
        let view = view.into();
        self.current().is_some_and(|top| view.matches(top))
    }

    /// Negation of [`is_active`](Self::is_active).
    pub fn is_hidden<'a>(&self, view: impl Into<ViewRef<'a, D::Element>>) -> bool
    where
        D::Element: 'a,
    {
        !self.is_active(view)
    }

    /// Flags of the applied top view. Empty while the stack is empty.
    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    /// Returns true if the router guard should hold navigation.
    pub fn prevent_navigation(&self) -> bool {
        self.flags.contains(ViewFlags::PREVENT_NAVIGATION)
    }

    /// Returns true while the touch filter listeners are attached.
    pub fn touch_filter_attached(&self) -> bool {
        self.touch_filter
    }

    /// Views from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &ViewScope<D::Element>> {
        self.scopes.iter()
    }

    fn init_document(&mut self) {
        self.initialized = true;
        if self.dom.has_class(DocumentNode::Html, &self.classes.loading) {
            self.dom.remove_class(DocumentNode::Html, &self.classes.loading);
        }
        debug!("document initialized");
    }

    fn apply_top(&mut self, focus_element: Option<D::Element>, focus_selector: Option<&str>) {
        if let Some(top) = self.scopes.last().cloned() {
            self.apply(&top, focus_element, focus_selector);
        }
    }

    fn reconcile(&self, node: DocumentNode, class: &str, wanted: bool) {
        let present = self.dom.has_class(node, class);
        match (wanted, present) {
            (true, false) => self.dom.add_class(node, class),
            (false, true) => self.dom.remove_class(node, class),
            _ => trace!(?node, class, wanted, "class already in place"),
        }
    }

    fn set_touch_filter(&mut self, enabled: bool) {
        if enabled == self.touch_filter {
            return;
        }
        for kind in TouchKind::ALL {
            if enabled {
                self.dom.add_touch_listener(kind);
            } else {
                self.dom.remove_touch_listener(kind);
            }
        }
        self.touch_filter = enabled;
        debug!(enabled, "navigation gesture filter toggled");
    }
}
