// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view DOM-state policy.
//!
//! ## Overview
//!
//! Each view name maps to a [`PolicyRule`] with one [`Toggle`] per flag. Names without a row use
//! [`ViewPolicy::default_rule`]. [`ViewPolicy::resolve`] turns a rule plus the stack context
//! into concrete [`ViewFlags`].
//!
//! ## Inherited values
//!
//! - `hideScrollbar`: keeps the current document state while the stack is at most
//!   [`ViewPolicy::shallow_depth`] deep, so switching between pages does not flash a scrollbar;
//!   off otherwise.
//! - `disableScrolling`, `disableNavigationGestures`: off.
//! - `preventNavigation`: on for views other than the application root once something is
//!   stacked on top of it, unless the name starts with [`ViewPolicy::page_prefix`].
//!
//! ## Configuration
//!
//! The table deserializes from JSON:
//!
//! ```
//! use vista_view::policy::{ViewFlags, ViewPolicy, ViewContext};
//!
//! let policy = ViewPolicy::from_json(r#"{
//!     "rules": { "PSlideshow": { "hideScrollbar": "on", "disableScrolling": "on" } }
//! }"#).unwrap();
//!
//! let flags = policy.resolve("PSlideshow", ViewContext { depth: 3, is_app: false, scrollbar_hidden: false });
//! assert!(flags.contains(ViewFlags::HIDE_SCROLLBAR | ViewFlags::DISABLE_SCROLLING));
//! assert!(flags.contains(ViewFlags::PREVENT_NAVIGATION));
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

bitflags::bitflags! {
    /// Document state decided for the active view.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// Suppress the page scrollbar.
        const HIDE_SCROLLBAR              = 0b0000_0001;
        /// Freeze body scrolling.
        const DISABLE_SCROLLING           = 0b0000_0010;
        /// Cancel touch gestures that would navigate the browser.
        const DISABLE_NAVIGATION_GESTURES = 0b0000_0100;
        /// Ask the router guard to hold navigation (e.g. close the dialog first).
        const PREVENT_NAVIGATION          = 0b0000_1000;
    }
}

/// Policy value for one flag.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    /// Force the flag on.
    On,
    /// Force the flag off.
    Off,
    /// Use the flag's inherited value (see the module docs).
    #[default]
    Inherit,
}

impl Toggle {
    /// Resolve against the inherited value.
    pub const fn or(self, inherited: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::Inherit => inherited,
        }
    }
}

/// One row of the policy table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyRule {
    /// See [`ViewFlags::HIDE_SCROLLBAR`].
    pub hide_scrollbar: Toggle,
    /// See [`ViewFlags::DISABLE_SCROLLING`].
    pub disable_scrolling: Toggle,
    /// See [`ViewFlags::DISABLE_NAVIGATION_GESTURES`].
    pub disable_navigation_gestures: Toggle,
    /// See [`ViewFlags::PREVENT_NAVIGATION`].
    pub prevent_navigation: Toggle,
}

impl PolicyRule {
    /// A rule that inherits every flag.
    pub const INHERIT: Self = Self {
        hide_scrollbar: Toggle::Inherit,
        disable_scrolling: Toggle::Inherit,
        disable_navigation_gestures: Toggle::Inherit,
        prevent_navigation: Toggle::Inherit,
    };
}

/// Stack context a rule is resolved in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewContext {
    /// Stack depth including the view being applied.
    pub depth: usize,
    /// The view is the application root.
    pub is_app: bool,
    /// The document currently hides its scrollbar.
    pub scrollbar_hidden: bool,
}

/// Name-keyed policy table.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewPolicy {
    /// Rows keyed by view name.
    pub rules: BTreeMap<String, PolicyRule>,
    /// Row used for names without an entry.
    pub default_rule: PolicyRule,
    /// Names with this prefix are full pages and do not hold navigation by default.
    pub page_prefix: String,
    /// Deepest stack at which an inherited `hideScrollbar` keeps the current state.
    pub shallow_depth: usize,
}

impl Default for ViewPolicy {
    fn default() -> Self {
        let rules = [
            (
                "PLightbox",
                PolicyRule {
                    hide_scrollbar: Toggle::On,
                    disable_scrolling: Toggle::On,
                    disable_navigation_gestures: Toggle::On,
                    prevent_navigation: Toggle::On,
                },
            ),
            (
                "PPhotoEditDialog",
                PolicyRule {
                    disable_scrolling: Toggle::On,
                    disable_navigation_gestures: Toggle::On,
                    prevent_navigation: Toggle::On,
                    ..PolicyRule::INHERIT
                },
            ),
            (
                "PPageLogin",
                PolicyRule {
                    hide_scrollbar: Toggle::On,
                    ..PolicyRule::INHERIT
                },
            ),
            (
                "PPageAuth",
                PolicyRule {
                    hide_scrollbar: Toggle::On,
                    ..PolicyRule::INHERIT
                },
            ),
            (
                "PUploadDialog",
                PolicyRule {
                    prevent_navigation: Toggle::Off,
                    ..PolicyRule::INHERIT
                },
            ),
        ]
        .into_iter()
        .map(|(name, rule)| (name.to_owned(), rule))
        .collect();

        Self {
            rules,
            default_rule: PolicyRule::INHERIT,
            page_prefix: "PPage".into(),
            shallow_depth: 2,
        }
    }
}

impl ViewPolicy {
    /// Parse a policy table; missing fields take their [`Default`] values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The row for `name`, or the default row.
    pub fn rule(&self, name: &str) -> &PolicyRule {
        self.rules.get(name).unwrap_or(&self.default_rule)
    }

    /// Decide the document flags for view `name` in context `cx`.
    pub fn resolve(&self, name: &str, cx: ViewContext) -> ViewFlags {
        let rule = self.rule(name);

        let hide_scrollbar = rule
            .hide_scrollbar
            .or(cx.depth <= self.shallow_depth && cx.scrollbar_hidden);
        let disable_scrolling = rule.disable_scrolling.or(false);
        let disable_gestures = rule.disable_navigation_gestures.or(false);
        let prevent_navigation = rule
            .prevent_navigation
            .or(!cx.is_app && cx.depth > 1 && !name.starts_with(&self.page_prefix));

        let mut flags = ViewFlags::empty();
        flags.set(ViewFlags::HIDE_SCROLLBAR, hide_scrollbar);
        flags.set(ViewFlags::DISABLE_SCROLLING, disable_scrolling);
        flags.set(ViewFlags::DISABLE_NAVIGATION_GESTURES, disable_gestures);
        flags.set(ViewFlags::PREVENT_NAVIGATION, prevent_navigation);
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cx(depth: usize) -> ViewContext {
        ViewContext {
            depth,
            is_app: false,
            scrollbar_hidden: false,
        }
    }

    #[test]
    fn lightbox_sets_everything() {
        let flags = ViewPolicy::default().resolve("PLightbox", cx(3));
        assert_eq!(flags, ViewFlags::all());
    }

    #[test]
    fn default_row_for_dialogs() {
        let flags = ViewPolicy::default().resolve("PAlbumEditDialog", cx(3));
        assert_eq!(flags, ViewFlags::PREVENT_NAVIGATION);
    }

    #[test]
    fn pages_do_not_prevent_navigation() {
        let flags = ViewPolicy::default().resolve("PPageAlbums", cx(2));
        assert!(!flags.contains(ViewFlags::PREVENT_NAVIGATION));
    }

    #[test]
    fn app_root_never_prevents_navigation_by_default() {
        let flags = ViewPolicy::default().resolve(
            "App",
            ViewContext {
                depth: 1,
                is_app: true,
                scrollbar_hidden: false,
            },
        );
        assert_eq!(flags, ViewFlags::empty());
    }

    #[test]
    fn explicit_override_beats_default() {
        let flags = ViewPolicy::default().resolve("PUploadDialog", cx(3));
        assert!(!flags.contains(ViewFlags::PREVENT_NAVIGATION));
    }

    #[test]
    fn hidden_scrollbar_persists_only_when_shallow() {
        let policy = ViewPolicy::default();
        let hidden = |depth| ViewContext {
            depth,
            is_app: false,
            scrollbar_hidden: true,
        };
        assert!(policy
            .resolve("PPageAlbums", hidden(2))
            .contains(ViewFlags::HIDE_SCROLLBAR));
        assert!(!policy
            .resolve("PAlbumEditDialog", hidden(3))
            .contains(ViewFlags::HIDE_SCROLLBAR));
        // An explicit off wins even when shallow.
        let mut policy = policy;
        policy.rules.insert(
            "PPageBrowse".into(),
            PolicyRule {
                hide_scrollbar: Toggle::Off,
                ..PolicyRule::INHERIT
            },
        );
        assert!(!policy
            .resolve("PPageBrowse", hidden(2))
            .contains(ViewFlags::HIDE_SCROLLBAR));
    }

    #[test]
    fn json_table_with_defaults() {
        let policy = ViewPolicy::from_json(
            r#"{ "pagePrefix": "Page", "rules": { "Viewer": { "disableNavigationGestures": "on" } } }"#,
        )
        .unwrap();
        assert_eq!(policy.page_prefix, "Page");
        assert_eq!(policy.shallow_depth, 2);
        assert_eq!(policy.rules.len(), 1);
        let flags = policy.resolve("Viewer", cx(2));
        assert_eq!(
            flags,
            ViewFlags::DISABLE_NAVIGATION_GESTURES | ViewFlags::PREVENT_NAVIGATION
        );
        assert!(ViewPolicy::from_json(r#"{ "rules": { "X": { "hideScrollbar": "maybe" } } }"#).is_err());
    }
}
