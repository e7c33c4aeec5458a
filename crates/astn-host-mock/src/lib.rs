//! Mock host implementation for testing ast-notif widgets
//!
//! This provides an in-memory implementation of the `Host` trait so widget
//! controllers can be exercised without a browser: an element arena with a
//! body, inline styles and attributes, a virtual millisecond clock with a
//! timer queue, and click simulation with bubbling.

use std::cell::RefCell;
use std::collections::BTreeMap;

use astn_host::{Host, HostError, Selector, Signal, Target, Task, TimerId};

/// Height reported for elements that have no explicit layout height
pub const DEFAULT_ELEMENT_HEIGHT: f64 = 48.0;

/// Viewport height reported unless overridden
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Handle to an element in the mock arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Recorded tree and style operations, in call order
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Append { parent: NodeId, child: NodeId },
    Remove(NodeId),
    Flush(NodeId),
    SetAttribute { node: NodeId, name: String, value: String },
}

/// Simulated element
#[derive(Clone, Debug, Default)]
struct MockNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    inner_html: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    height: Option<f64>,
}

/// Timer waiting in the queue
#[derive(Clone, Debug)]
struct PendingTimer {
    id: TimerId,
    due_ms: f64,
    task: Task,
}

/// Mock host for unit and integration testing
pub struct MockHost {
    /// All elements ever created
    nodes: Vec<MockNode>,
    /// The body element (None simulates a page without a document)
    body: Option<NodeId>,
    /// Virtual clock in milliseconds
    now_ms: f64,
    /// Next timer ID to assign
    next_timer: u64,
    /// Pending timers in scheduling order
    timers: Vec<PendingTimer>,
    /// Registered click listeners
    listeners: Vec<(NodeId, Target)>,
    /// Reported viewport height
    viewport_height: f64,
    /// Operation journal
    journal: RefCell<Vec<Op>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Create a mock host with an empty body
    pub fn new() -> Self {
        let body = MockNode {
            tag: "body".to_string(),
            ..Default::default()
        };
        Self {
            nodes: vec![body],
            body: Some(NodeId(0)),
            now_ms: 0.0,
            next_timer: 1,
            timers: Vec::new(),
            listeners: Vec::new(),
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            journal: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock host with no document at all
    pub fn without_document() -> Self {
        Self {
            nodes: Vec::new(),
            body: None,
            ..Self::new()
        }
    }

    // =========================================================================
    // Clock & timers
    // =========================================================================

    /// Current virtual time in milliseconds
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to it
    ///
    /// Timers scheduled while handling a popped signal are seen by the next
    /// call, so a loop over this drains cascades (dismiss, then detach).
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Signal<NodeId>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(core::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;

        let timer = self.timers.remove(index);
        self.set_now(timer.due_ms);
        Some(Signal::Timer(timer.task))
    }

    /// Pending timers as (id, due time, task), earliest first
    pub fn pending_timers(&self) -> Vec<(TimerId, f64, Task)> {
        let mut timers: Vec<_> = self
            .timers
            .iter()
            .map(|t| (t.id, t.due_ms, t.task))
            .collect();
        timers.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(core::cmp::Ordering::Equal));
        timers
    }

    /// Due time of the pending timer carrying `task`, if any
    pub fn due_of(&self, task: Task) -> Option<f64> {
        self.timers.iter().find(|t| t.task == task).map(|t| t.due_ms)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Simulate a click on `node`
    ///
    /// Returns one signal per listener on the node or its ancestors, innermost
    /// first. Clicks on detached elements reach nobody.
    pub fn click(&self, node: NodeId) -> Vec<Signal<NodeId>> {
        if !self.is_connected(node) {
            return Vec::new();
        }
        let mut signals = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            for (listening, target) in &self.listeners {
                if *listening == id {
                    signals.push(Signal::Click {
                        listener: *target,
                        target: node,
                    });
                }
            }
            current = self.nodes[id.0].parent;
        }
        signals
    }

    // =========================================================================
    // Layout knobs
    // =========================================================================

    /// Override the reported viewport height
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Override the reported height of one element
    pub fn set_client_height(&mut self, node: NodeId, height: f64) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.height = Some(height);
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Whether the element is reachable from the body
    pub fn is_connected(&self, node: NodeId) -> bool {
        let Some(body) = self.body else {
            return false;
        };
        let mut current = Some(node);
        while let Some(id) = current {
            if id == body {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    /// Tag name of an element
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// Children of an element, in order
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// All connected elements matching `selector`, document order
    pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(body) = self.body else {
            return Vec::new();
        };
        let Some(parsed) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        self.walk(body, &mut |id| {
            if self.node_matches(id, &parsed) {
                found.push(id);
            }
        });
        found
    }

    /// Number of connected elements carrying `id`
    pub fn count_id(&self, id: &str) -> usize {
        self.find_all(&format!("#{}", id)).len()
    }

    /// Snapshot of the operation journal
    pub fn journal(&self) -> Vec<Op> {
        self.journal.borrow().clone()
    }

    /// Number of forced style recalculations so far
    pub fn style_flushes(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Flush(_)))
            .count()
    }

    /// Number of registered click listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn walk(&self, root: NodeId, visit: &mut dyn FnMut(NodeId)) {
        for &child in &self.nodes[root.0].children {
            visit(child);
            self.walk(child, visit);
        }
    }

    fn node_matches(&self, id: NodeId, selector: &Selector) -> bool {
        let node = &self.nodes[id.0];
        selector.matches(
            &node.tag,
            node.attributes.get("id").map(String::as_str),
            node.attributes.get("class").map(String::as_str),
        )
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn valid(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }
}

impl Host for MockHost {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
        if self.body.is_none() {
            return Err(HostError::NoDocument);
        }
        self.nodes.push(MockNode {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        Ok(NodeId(self.nodes.len() - 1))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let body = self.body?;
        let mut found = None;
        self.walk(body, &mut |node| {
            if found.is_none() && self.nodes[node.0].attributes.get("id").map(String::as_str) == Some(id) {
                found = Some(node);
            }
        });
        found
    }

    fn query_selector(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = Selector::parse(selector)?;
        if !self.valid(*root) {
            return None;
        }
        let mut found = None;
        self.walk(*root, &mut |node| {
            if found.is_none() && self.node_matches(node, &parsed) {
                found = Some(node);
            }
        });
        found
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        match Selector::parse(selector) {
            Some(parsed) if self.valid(*node) => self.node_matches(*node, &parsed),
            _ => false,
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HostError> {
        if !self.valid(*parent) || !self.valid(*child) || parent == child {
            return Err(HostError::InvalidNode);
        }
        self.detach(*child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
        self.journal.borrow_mut().push(Op::Append {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) {
        if !self.valid(*node) || self.nodes[node.0].parent.is_none() {
            return;
        }
        self.detach(*node);
        self.journal.borrow_mut().push(Op::Remove(*node));
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.get(node.0)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.attributes.insert(name.to_string(), value.to_string());
            self.journal.borrow_mut().push(Op::SetAttribute {
                node: *node,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) {
        if !self.valid(*node) {
            return;
        }
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].inner_html = html.to_string();
    }

    fn inner_html(&self, node: &NodeId) -> String {
        self.nodes
            .get(node.0)
            .map(|n| n.inner_html.clone())
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: Option<&str>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            match value {
                Some(v) => {
                    n.styles.insert(property.to_string(), v.to_string());
                }
                None => {
                    n.styles.remove(property);
                }
            }
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.nodes.get(node.0)?.styles.get(property).cloned()
    }

    fn flush_style(&self, node: &NodeId) {
        self.journal.borrow_mut().push(Op::Flush(*node));
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Option<String> {
        if property == "height" {
            return Some(format!("{}px", self.client_height(node)));
        }
        self.style(node, property)
    }

    fn client_height(&self, node: &NodeId) -> f64 {
        self.nodes
            .get(node.0)
            .and_then(|n| n.height)
            .unwrap_or(DEFAULT_ELEMENT_HEIGHT)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn listen_click(&mut self, node: &NodeId, listener: Target) {
        if self.valid(*node) {
            self.listeners.push((*node, listener));
        }
    }

    fn set_timeout(&mut self, delay_ms: u32, task: Task) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(PendingTimer {
            id,
            due_ms: self.now_ms + delay_ms as f64,
            task,
        });
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}
