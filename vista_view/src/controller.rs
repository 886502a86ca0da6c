// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The controller façade the host application owns.
//!
//! ## Overview
//!
//! [`ViewController`] bundles one of each piece and wires them to the host's hooks:
//!
//! - components call [`enter`](ViewController::enter) / [`leave`](ViewController::leave) on
//!   mount and unmount;
//! - the router calls [`before_navigation`](ViewController::before_navigation),
//!   [`after_navigation`](ViewController::after_navigation) and, once the new route painted,
//!   [`after_paint`](ViewController::after_paint);
//! - the page lifecycle calls [`on_page_hide`](ViewController::on_page_hide) and
//!   [`on_page_show`](ViewController::on_page_show).
//!
//! The controller owns its collaborators; there is no global instance. Hosts that need several
//! independent controllers (e.g. in tests) simply create several.

use core::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};
use vista_navigation::tracker::NavigationTracker;
use vista_navigation::types::{Direction, HistoryPosition};
use vista_storage::{Clock, RestoreStateStore, ScrollPosition, ScrollPositionStore, StorageBackend};

use crate::dom::Dom;
use crate::policy::ViewPolicy;
use crate::scroll::{AjaxActivity, RestoreConfig, RestoreOutcome, ScrollHost, restore_scroll};
use crate::stack::ViewStack;
use crate::types::{DomClasses, ViewScope};

/// Controller configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewConfig {
    /// Class names the view stack manages.
    pub classes: DomClasses,
    /// Per-view policy table.
    pub policy: ViewPolicy,
    /// Scroll restoration tuning.
    pub restore: RestoreConfig,
}

/// How the page was shown, as reported by `pageshow` and the navigation timing entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PageShow {
    /// Resumed from the back/forward cache.
    Resumed,
    /// Reloaded by the user.
    Reloaded,
    /// Any other fresh load.
    Fresh,
}

/// View stack, navigation tracker, restore-state store and scroll-position store, wired to the
/// host's ports.
///
/// Type parameters: `D` document, `H` scrolling window, `A` request tracker, `SS` session
/// storage backing restore state, `LS` persistent storage backing the scroll position, `C` clock.
/// The two storage types are independent, so a host may pair, say, a borrowed session store with
/// a shared `Rc` local store.
#[derive(Debug)]
pub struct ViewController<D: Dom, H, A, SS, LS, C> {
    views: ViewStack<D>,
    navigation: NavigationTracker,
    restore_states: RestoreStateStore<SS, C>,
    scroll_positions: ScrollPositionStore<LS>,
    host: H,
    ajax: A,
    restore: RestoreConfig,
}

impl<D, H, A, SS, LS, C> ViewController<D, H, A, SS, LS, C>
where
    D: Dom,
    H: ScrollHost,
    A: AjaxActivity,
    SS: StorageBackend,
    LS: StorageBackend,
    C: Clock,
{
    /// Create a controller.
    ///
    /// `session` backs restore state and `local` backs the window scroll position.
    pub fn new(
        dom: D,
        host: H,
        ajax: A,
        session: SS,
        local: LS,
        clock: C,
        config: ViewConfig,
    ) -> Self {
        let ViewConfig {
            classes,
            policy,
            restore,
        } = config;
        Self {
            views: ViewStack::with_config(dom, classes, policy),
            navigation: NavigationTracker::new(),
            restore_states: RestoreStateStore::new(session, clock),
            scroll_positions: ScrollPositionStore::new(local),
            host,
            ajax,
            restore,
        }
    }

    /// See [`ViewStack::enter`].
    pub fn enter(
        &mut self,
        scope: ViewScope<D::Element>,
        focus_element: Option<D::Element>,
        focus_selector: Option<&str>,
    ) -> Option<usize> {
        self.views.enter(scope, focus_element, focus_selector)
    }

    /// See [`ViewStack::leave`].
    pub fn leave(&mut self, scope: &ViewScope<D::Element>) -> Option<usize> {
        self.views.leave(scope)
    }

    /// The view stack.
    pub fn views(&self) -> &ViewStack<D> {
        &self.views
    }

    /// The view stack, mutably.
    pub fn views_mut(&mut self) -> &mut ViewStack<D> {
        &mut self.views
    }

    /// Router pre-navigation hook. Returns the provisional direction.
    pub fn before_navigation(&mut self, state: &impl HistoryPosition) -> Direction {
        self.navigation.prepare_navigation(state)
    }

    /// Router post-navigation hook. Returns the committed position.
    pub fn after_navigation(&mut self, state: &impl HistoryPosition) -> Option<f64> {
        self.navigation.commit_navigation(state)
    }

    /// Called once the new route painted; the direction only describes the navigation that
    /// just finished.
    pub fn after_paint(&mut self) {
        self.navigation.reset_navigation_direction(Direction::None);
    }

    /// The navigation tracker.
    pub fn navigation(&self) -> &NavigationTracker {
        &self.navigation
    }

    /// The navigation tracker, mutably.
    pub fn navigation_mut(&mut self) -> &mut NavigationTracker {
        &mut self.navigation
    }

    /// See [`RestoreStateStore::save_restore_state`].
    pub fn save_restore_state(&self, key: &str, state: &Value) -> bool {
        self.restore_states.save_restore_state(key, state)
    }

    /// See [`RestoreStateStore::save_restore_payload`].
    pub fn save_restore_payload<T: Serialize>(&self, key: &str, payload: &T) -> bool {
        self.restore_states.save_restore_payload(key, payload)
    }

    /// See [`RestoreStateStore::get_restore_state`].
    pub fn get_restore_state(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<Map<String, Value>> {
        self.restore_states.get_restore_state(key, max_age)
    }

    /// See [`RestoreStateStore::get_restore_payload`].
    pub fn get_restore_payload<T: DeserializeOwned>(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<T> {
        self.restore_states.get_restore_payload(key, max_age)
    }

    /// See [`RestoreStateStore::consume_restore_state`].
    pub fn consume_restore_state(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<Map<String, Value>> {
        self.restore_states.consume_restore_state(key, max_age)
    }

    /// See [`RestoreStateStore::clear_restore_state`].
    pub fn clear_restore_state(&self, key: &str) {
        self.restore_states.clear_restore_state(key);
    }

    /// Restore states and their backend.
    pub fn restore_states(&self) -> &RestoreStateStore<SS, C> {
        &self.restore_states
    }

    /// Save `pos`, or the window's current offset when `None`.
    ///
    /// Returns the saved position, or `None` if the offset is not representable.
    pub fn save_window_scroll_pos(&mut self, pos: Option<ScrollPosition>) -> Option<ScrollPosition> {
        let pos = pos.or_else(|| ScrollPosition::from_point(self.host.scroll_offset()))?;
        self.scroll_positions.save(pos);
        Some(pos)
    }

    /// Consume the saved position. See [`ScrollPositionStore::take`].
    pub fn get_window_scroll_pos(&mut self, pos: Option<ScrollPosition>) -> Option<ScrollPosition> {
        self.scroll_positions.take(pos)
    }

    /// Forget the saved position.
    pub fn clear_window_scroll_pos(&mut self) {
        self.scroll_positions.clear();
    }

    /// Consume the saved position (or use `pos`) and scroll the window back to it.
    pub async fn restore_window_scroll_pos(&mut self, pos: Option<ScrollPosition>) -> RestoreOutcome {
        let Some(target) = self.get_window_scroll_pos(pos) else {
            debug!("no window scroll position to restore");
            return RestoreOutcome::NoTarget;
        };
        restore_scroll(&self.host, &self.ajax, target, &self.restore).await
    }

    /// The scrolling window.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The request tracker.
    pub fn ajax(&self) -> &A {
        &self.ajax
    }

    /// Scroll positions and their backend.
    pub fn scroll_positions(&self) -> &ScrollPositionStore<LS> {
        &self.scroll_positions
    }

    /// `pagehide` handler: remember where the window was when the page enters the
    /// back/forward cache.
    pub fn on_page_hide(&mut self, persisted: bool) {
        if persisted {
            let saved = self.save_window_scroll_pos(None);
            info!(?saved, "page hidden into back/forward cache");
        }
    }

    /// `pageshow` handler: restore after a resume or reload, forget otherwise.
    pub async fn on_page_show(&mut self, how: PageShow) -> RestoreOutcome {
        match how {
            PageShow::Resumed | PageShow::Reloaded => {
                let outcome = self.restore_window_scroll_pos(None).await;
                info!(?how, ?outcome, "page shown");
                outcome
            }
            PageShow::Fresh => {
                self.clear_window_scroll_pos();
                RestoreOutcome::NoTarget
            }
        }
    }
}
