// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-process ports for tests, benchmarks, and demos.
//!
//! [`HeadlessDom`], [`HeadlessWindow`] and [`HeadlessAjax`] stand in for the browser. They keep
//! their state behind `RefCell`s, complete every future immediately, and record what the
//! controller asked of them so callers can assert on it.
//!
//! ## Selectors
//!
//! [`HeadlessDom::query_selector`](crate::Dom::query_selector) understands a single compound
//! selector: an optional tag name followed by any number of `#id`, `[attr]` and `[attr="value"]`
//! parts, e.g. `input[tabindex="1"]`. Descendants are searched in creation order, which matches
//! document order as long as children are created after their parents.

use core::cell::RefCell;
use core::future::{Future, ready};
use core::time::Duration;
use std::collections::{BTreeSet, VecDeque};

use kurbo::{Point, Size};

use crate::dom::{Dom, DomError};
use crate::scroll::{AjaxActivity, ScrollHost, ScrollMetrics};
use crate::touch::TouchKind;
use crate::types::DocumentNode;

/// Handle to a node in a [`HeadlessDom`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeRef(pub usize);

#[derive(Clone, Debug)]
struct Node {
    /// `None` for text nodes.
    tag: Option<String>,
    parent: Option<usize>,
    attrs: Vec<(String, String)>,
    detached: bool,
}

#[derive(Debug, Default)]
struct Document {
    nodes: Vec<Node>,
    html_classes: BTreeSet<String>,
    body_classes: BTreeSet<String>,
    listeners: BTreeSet<TouchKind>,
    focused: Option<NodeRef>,
    last_prevent_scroll: Option<bool>,
    class_writes: usize,
    overlay: Option<NodeRef>,
    mobile: bool,
}

impl Document {
    fn classes(&self, node: DocumentNode) -> &BTreeSet<String> {
        match node {
            DocumentNode::Html => &self.html_classes,
            DocumentNode::Body => &self.body_classes,
        }
    }

    fn classes_mut(&mut self, node: DocumentNode) -> &mut BTreeSet<String> {
        match node {
            DocumentNode::Html => &mut self.html_classes,
            DocumentNode::Body => &mut self.body_classes,
        }
    }

    fn node(&self, r: NodeRef) -> Option<&Node> {
        self.nodes.get(r.0)
    }

    fn ancestors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        core::iter::successors(self.nodes[idx].parent, |&p| self.nodes[p].parent)
    }

    fn is_attached(&self, idx: usize) -> bool {
        !self.nodes[idx].detached && self.ancestors(idx).all(|a| !self.nodes[a].detached)
    }
}

/// A tiny document tree implementing [`Dom`].
///
/// Node `0` is `<body>`; everything else is created under it with
/// [`create_element`](Self::create_element) and [`create_text`](Self::create_text).
#[derive(Debug)]
pub struct HeadlessDom {
    doc: RefCell<Document>,
}

impl Default for HeadlessDom {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDom {
    /// Create a document containing only `<body>`.
    pub fn new() -> Self {
        let body = Node {
            tag: Some("body".into()),
            parent: None,
            attrs: Vec::new(),
            detached: false,
        };
        Self {
            doc: RefCell::new(Document {
                nodes: vec![body],
                ..Document::default()
            }),
        }
    }

    /// The `<body>` element.
    pub const fn body(&self) -> NodeRef {
        NodeRef(0)
    }

    /// Append an element with `tag` under `parent`.
    pub fn create_element(&self, parent: NodeRef, tag: &str) -> NodeRef {
        self.push(Node {
            tag: Some(tag.to_ascii_lowercase()),
            parent: Some(parent.0),
            attrs: Vec::new(),
            detached: false,
        })
    }

    /// Append a text node under `parent`.
    pub fn create_text(&self, parent: NodeRef) -> NodeRef {
        self.push(Node {
            tag: None,
            parent: Some(parent.0),
            attrs: Vec::new(),
            detached: false,
        })
    }

    /// Set (or overwrite) an attribute.
    pub fn set_attribute(&self, node: NodeRef, name: &str, value: &str) {
        let mut doc = self.doc.borrow_mut();
        let Some(node) = doc.nodes.get_mut(node.0) else {
            return;
        };
        match node.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => node.attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Remove `node` and its subtree from the document. Handles stay valid.
    pub fn detach(&self, node: NodeRef) {
        if let Some(node) = self.doc.borrow_mut().nodes.get_mut(node.0) {
            node.detached = true;
        }
    }

    /// Set the content container of the topmost open overlay.
    pub fn set_overlay_content(&self, node: Option<NodeRef>) {
        self.doc.borrow_mut().overlay = node;
    }

    /// Switch between mobile and desktop viewports.
    pub fn set_mobile(&self, mobile: bool) {
        self.doc.borrow_mut().mobile = mobile;
    }

    /// The focused node.
    pub fn focused(&self) -> Option<NodeRef> {
        self.doc.borrow().focused
    }

    /// The `prevent_scroll` argument of the last successful focus call.
    pub fn last_prevent_scroll(&self) -> Option<bool> {
        self.doc.borrow().last_prevent_scroll
    }

    /// Number of class-list mutations so far.
    pub fn class_writes(&self) -> usize {
        self.doc.borrow().class_writes
    }

    /// Snapshot of a document node's class list.
    pub fn classes(&self, node: DocumentNode) -> Vec<String> {
        self.doc.borrow().classes(node).iter().cloned().collect()
    }

    /// Returns true while a listener for `kind` is attached.
    pub fn has_touch_listener(&self, kind: TouchKind) -> bool {
        self.doc.borrow().listeners.contains(&kind)
    }

    fn push(&self, node: Node) -> NodeRef {
        let mut doc = self.doc.borrow_mut();
        doc.nodes.push(node);
        NodeRef(doc.nodes.len() - 1)
    }
}

#[derive(Debug, Default)]
struct Selector<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    attrs: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> Selector<'a> {
    fn parse(sel: &'a str) -> Option<Self> {
        let sel = sel.trim();
        let tag_end = sel.find(['[', '#']).unwrap_or(sel.len());
        let mut out = Self {
            tag: Some(&sel[..tag_end]).filter(|t| !t.is_empty()),
            ..Self::default()
        };
        let mut rest = &sel[tag_end..];
        while !rest.is_empty() {
            if let Some(r) = rest.strip_prefix('#') {
                let end = r.find('[').unwrap_or(r.len());
                out.id = Some(&r[..end]);
                rest = &r[end..];
            } else if let Some(r) = rest.strip_prefix('[') {
                let end = r.find(']')?;
                let inner = &r[..end];
                let attr = match inner.split_once('=') {
                    Some((name, value)) => (name.trim(), Some(value.trim().trim_matches('"'))),
                    None => (inner.trim(), None),
                };
                out.attrs.push(attr);
                rest = &r[end + 1..];
            } else {
                return None;
            }
        }
        Some(out)
    }

    fn matches(&self, node: &Node) -> bool {
        let Some(tag) = &node.tag else {
            return false;
        };
        let attr = |name: &str| {
            node.attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };
        self.tag.is_none_or(|t| t.eq_ignore_ascii_case(tag))
            && self.id.is_none_or(|id| attr("id") == Some(id))
            && self
                .attrs
                .iter()
                .all(|&(name, value)| match (attr(name), value) {
                    (Some(_), None) => true,
                    (Some(actual), Some(wanted)) => actual == wanted,
                    (None, _) => false,
                })
    }
}

impl Dom for HeadlessDom {
    type Element = NodeRef;

    fn has_class(&self, node: DocumentNode, class: &str) -> bool {
        self.doc.borrow().classes(node).contains(class)
    }

    fn add_class(&self, node: DocumentNode, class: &str) {
        let mut doc = self.doc.borrow_mut();
        doc.class_writes += 1;
        doc.classes_mut(node).insert(class.to_owned());
    }

    fn remove_class(&self, node: DocumentNode, class: &str) {
        let mut doc = self.doc.borrow_mut();
        doc.class_writes += 1;
        doc.classes_mut(node).remove(class);
    }

    fn add_touch_listener(&self, kind: TouchKind) {
        self.doc.borrow_mut().listeners.insert(kind);
    }

    fn remove_touch_listener(&self, kind: TouchKind) {
        self.doc.borrow_mut().listeners.remove(&kind);
    }

    fn is_element(&self, node: &NodeRef) -> bool {
        self.doc
            .borrow()
            .node(*node)
            .is_some_and(|n| n.tag.is_some())
    }

    fn parent_element(&self, node: &NodeRef) -> Option<NodeRef> {
        self.doc.borrow().node(*node)?.parent.map(NodeRef)
    }

    fn has_attribute(&self, node: &NodeRef, name: &str) -> bool {
        self.doc
            .borrow()
            .node(*node)
            .is_some_and(|n| n.attrs.iter().any(|(n, _)| n == name))
    }

    fn query_selector(&self, within: Option<&NodeRef>, selector: &str) -> Option<NodeRef> {
        let selector = Selector::parse(selector)?;
        let doc = self.doc.borrow();
        (0..doc.nodes.len())
            .filter(|&idx| match within {
                Some(scope) => doc.ancestors(idx).any(|a| a == scope.0),
                None => doc.is_attached(idx),
            })
            .find(|&idx| selector.matches(&doc.nodes[idx]))
            .map(NodeRef)
    }

    fn active_overlay_content(&self) -> Option<NodeRef> {
        self.doc.borrow().overlay
    }

    fn is_mobile(&self) -> bool {
        self.doc.borrow().mobile
    }

    fn focus(&self, node: &NodeRef, prevent_scroll: bool) -> Result<(), DomError> {
        let mut doc = self.doc.borrow_mut();
        match doc.node(*node) {
            None => return Err(DomError::Host(format!("unknown node {}", node.0))),
            Some(n) if n.tag.is_none() => return Err(DomError::NotFocusable),
            Some(_) if !doc.is_attached(node.0) => return Err(DomError::Detached),
            Some(_) => {}
        }
        doc.focused = Some(*node);
        doc.last_prevent_scroll = Some(prevent_scroll);
        Ok(())
    }
}

#[derive(Debug)]
struct Window {
    metrics: ScrollMetrics,
    offset: Point,
    growth: VecDeque<f64>,
    busy: bool,
    idle_delays: Vec<Duration>,
    frame_calls: u32,
    scrolls: Vec<Point>,
    held_scrolls: u32,
}

/// A window implementing [`ScrollHost`].
///
/// Content can be made to grow over time with
/// [`queue_content_growth`](Self::queue_content_growth): each idle period appends the next
/// queued amount to the content height, like a paginated list loading another batch.
#[derive(Debug)]
pub struct HeadlessWindow {
    state: RefCell<Window>,
}

impl HeadlessWindow {
    /// Create a window scrolled to the origin.
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            state: RefCell::new(Window {
                metrics: ScrollMetrics { content, viewport },
                offset: Point::ZERO,
                growth: VecDeque::new(),
                busy: false,
                idle_delays: Vec::new(),
                frame_calls: 0,
                scrolls: Vec::new(),
                held_scrolls: 0,
            }),
        }
    }

    /// Grow the content height by each amount in turn, one per idle period.
    pub fn queue_content_growth(&self, heights: impl IntoIterator<Item = f64>) {
        self.state.borrow_mut().growth.extend(heights);
    }

    /// Mark the scrolling container as loading.
    pub fn set_busy(&self, busy: bool) {
        self.state.borrow_mut().busy = busy;
    }

    /// Scroll as the user would, without recording a call.
    pub fn set_offset(&self, offset: Point) {
        let mut state = self.state.borrow_mut();
        state.offset = state.metrics.clamp(offset);
    }

    /// Keep the offset where it is for the next `count` calls to [`ScrollHost::scroll_to`],
    /// as if the user were dragging the page. The calls are still recorded.
    pub fn hold_scrolls(&self, count: u32) {
        self.state.borrow_mut().held_scrolls = count;
    }

    /// The delay requested for each idle period awaited so far, in order.
    pub fn idle_delays(&self) -> Vec<Duration> {
        self.state.borrow().idle_delays.clone()
    }

    /// Animation frames awaited so far.
    pub fn frame_calls(&self) -> u32 {
        self.state.borrow().frame_calls
    }

    /// Every point passed to [`ScrollHost::scroll_to`], in order.
    pub fn scroll_calls(&self) -> Vec<Point> {
        self.state.borrow().scrolls.clone()
    }
}

impl ScrollHost for HeadlessWindow {
    fn scroll_offset(&self) -> Point {
        self.state.borrow().offset
    }

    fn metrics(&self) -> ScrollMetrics {
        self.state.borrow().metrics
    }

    fn scroll_to(&self, p: Point) {
        let mut state = self.state.borrow_mut();
        state.scrolls.push(p);
        if state.held_scrolls > 0 {
            state.held_scrolls -= 1;
            return;
        }
        state.offset = state.metrics.clamp(p);
    }

    fn container_busy(&self) -> bool {
        self.state.borrow().busy
    }

    fn idle(&self, delay: Duration) -> impl Future<Output = ()> {
        let mut state = self.state.borrow_mut();
        state.idle_delays.push(delay);
        if let Some(extra) = state.growth.pop_front() {
            state.metrics.content.height += extra;
        }
        ready(())
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        self.state.borrow_mut().frame_calls += 1;
        ready(())
    }
}

/// A request tracker implementing [`AjaxActivity`].
///
/// Waiting completes every in-flight request, unless
/// [`outlast_waits`](Self::outlast_waits) keeps them running.
#[derive(Debug, Default)]
pub struct HeadlessAjax {
    state: RefCell<Requests>,
}

#[derive(Debug, Default)]
struct Requests {
    busy: bool,
    waits: u32,
    last_settle: Option<Duration>,
    outlasting: u32,
}

impl HeadlessAjax {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark requests as in flight.
    pub fn set_busy(&self, busy: bool) {
        self.state.borrow_mut().busy = busy;
    }

    /// Keep requests in flight through the next `count` waits.
    pub fn outlast_waits(&self, count: u32) {
        self.state.borrow_mut().outlasting = count;
    }

    /// Number of waits so far.
    pub fn waits(&self) -> u32 {
        self.state.borrow().waits
    }

    /// Settle delay of the last wait.
    pub fn last_settle(&self) -> Option<Duration> {
        self.state.borrow().last_settle
    }
}

impl AjaxActivity for HeadlessAjax {
    fn wait(&self, settle: Option<Duration>) -> impl Future<Output = ()> {
        let mut state = self.state.borrow_mut();
        if state.outlasting > 0 {
            state.outlasting -= 1;
        } else {
            state.busy = false;
        }
        state.waits += 1;
        state.last_settle = settle;
        ready(())
    }

    fn busy(&self) -> bool {
        self.state.borrow().busy
    }
}
