// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: view scopes, scope references, and document class configuration.

use serde::Deserialize;

/// Uid the host assigns to the application root.
pub const APP_UID: u32 = 0;

/// Name of the application root view.
pub const APP_NAME: &str = "App";

/// An active UI component as seen by the view stack.
///
/// The stack does not own the component. It keeps the component's id, its logical type name,
/// and handles to the elements it needs for focus resolution.
///
/// ## Identity
///
/// Two scopes are the same view when their `uid`s match. Hosts assign a fresh `uid` per mounted
/// instance and do not reuse one while the instance is alive.
///
/// ## Validity
///
/// A scope is usable only with a root element and a non-empty name. Invalid scopes are rejected
/// by [`ViewStack::enter`](crate::ViewStack::enter) and
/// [`ViewStack::apply`](crate::ViewStack::apply).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewScope<E> {
    /// Per-instance id; `0` is reserved for the application root.
    pub uid: u32,
    /// Logical component type name, e.g. `"PPageLogin"` or `"PLightbox"`.
    pub name: String,
    /// The component's root node.
    pub root: Option<E>,
    /// Named sub-elements (`form`, `content`, `dialog`, ...).
    pub refs: Vec<(String, E)>,
}

impl<E> ViewScope<E> {
    /// Create a scope without a root or refs.
    pub fn new(uid: u32, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            root: None,
            refs: Vec::new(),
        }
    }

    /// Set the root node.
    #[must_use]
    pub fn with_root(mut self, root: E) -> Self {
        self.root = Some(root);
        self
    }

    /// Add a named sub-element.
    #[must_use]
    pub fn with_ref(mut self, name: impl Into<String>, el: E) -> Self {
        self.refs.push((name.into(), el));
        self
    }

    /// Look up a named sub-element. The first registration of a name wins.
    pub fn get_ref(&self, name: &str) -> Option<&E> {
        self.refs.iter().find(|(n, _)| n == name).map(|(_, el)| el)
    }

    /// Returns true if the scope has a root node and a name.
    pub fn is_valid(&self) -> bool {
        self.root.is_some() && !self.name.is_empty()
    }

    /// Returns true for the application root.
    pub fn is_app(&self) -> bool {
        self.uid == APP_UID || self.name == APP_NAME
    }
}

/// A way of naming a view when asking whether it is active.
#[derive(Debug)]
pub enum ViewRef<'a, E> {
    /// Compare by identity (`uid`).
    Scope(&'a ViewScope<E>),
    /// Compare by logical name.
    Name(&'a str),
    /// Compare by `uid`.
    Uid(u32),
}

impl<E> Clone for ViewRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ViewRef<'_, E> {}

impl<'a, E> From<&'a ViewScope<E>> for ViewRef<'a, E> {
    fn from(scope: &'a ViewScope<E>) -> Self {
        Self::Scope(scope)
    }
}

impl<'a, E> From<&'a str> for ViewRef<'a, E> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<E> From<u32> for ViewRef<'_, E> {
    fn from(uid: u32) -> Self {
        Self::Uid(uid)
    }
}

impl<E> ViewRef<'_, E> {
    /// Returns true if `scope` is the view this reference names.
    pub fn matches(&self, scope: &ViewScope<E>) -> bool {
        match *self {
            Self::Scope(s) => s.uid == scope.uid,
            Self::Name(name) => scope.name == name,
            Self::Uid(uid) => scope.uid == uid,
        }
    }
}

/// Document-level nodes whose class lists the view stack manages.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum DocumentNode {
    /// The `<html>` element.
    Html,
    /// The `<body>` element.
    Body,
}

/// Class names the view stack reads and writes.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomClasses {
    /// Transient marker on `<html>` removed once the application root entered.
    pub loading: String,
    /// Hides the page scrollbar; set on `<html>`.
    pub hide_scrollbar: String,
    /// Freezes body scrolling; set on `<body>`.
    pub disable_scrolling: String,
    /// Marks suppressed navigation swipe gestures; set on `<body>`.
    pub disable_navigation_gestures: String,
}

impl Default for DomClasses {
    fn default() -> Self {
        Self {
            loading: "is-loading".into(),
            hide_scrollbar: "hide-scrollbar".into(),
            disable_scrolling: "disable-scrolling".into(),
            disable_navigation_gestures: "disable-navigation-gestures".into(),
        }
    }
}
