//! Host abstraction for ast-notif widgets
//!
//! This crate defines the `Host` trait that lets the widget controllers run
//! against different document implementations by abstracting the handful of
//! DOM and timer operations they need.
//!
//! # Platform Implementations
//!
//! - **Browser**: `web-sys` elements, `setTimeout`, `getComputedStyle` (see `astn-web`)
//! - **Tests**: an in-memory element tree with a virtual clock (see `astn-host-mock`)
//!
//! Hosts never call back into the widgets directly. Timers and click
//! listeners carry routing data (`Task`, `Target`) and the host hands a
//! [`Signal`] back to whoever owns the widgets.

mod routing;
mod selector;

pub use routing::{CardId, Signal, Target, Task, TimerId, WidgetKind};
pub use selector::Selector;

/// Host trait
///
/// Implementations provide the document and scheduling primitives for:
/// - Element creation, lookup and tree mutation
/// - Attributes, inner markup and inline styles
/// - Layout reads (computed style, element height, viewport height)
/// - Click listeners and one-shot timers
///
/// # Associated Types
///
/// - `Node`: handle to an element
///   - In the browser: a `web_sys::Element`
///   - In tests: an index into the mock arena
pub trait Host {
    /// Handle to an element owned by this host
    type Node: Clone + PartialEq + core::fmt::Debug;

    // === Tree ===

    /// The document body, if there is a document at all
    fn body(&self) -> Option<Self::Node>;

    /// Create a detached element with the given tag name
    ///
    /// # Returns
    /// * `Ok(Node)` - The new element
    /// * `Err(HostError::NoDocument)` - There is no document to create it in
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, HostError>;

    /// Find a connected element by id (detached subtrees are not searched)
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First descendant of `root` (preorder) matching `selector`
    fn query_selector(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// Parent element, if any
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` itself matches `selector`
    fn matches(&self, node: &Self::Node, selector: &str) -> bool;

    /// Append `child` as the last child of `parent`
    ///
    /// # Returns
    /// * `Ok(())` - Child appended
    /// * `Err(HostError::InvalidNode)` - The operation was rejected
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), HostError>;

    /// Detach `node` from its parent (no-op when already detached)
    fn remove(&mut self, node: &Self::Node);

    // === Attributes & content ===

    /// Read an attribute
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Write an attribute
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Replace the element's content with the given markup
    fn set_inner_html(&mut self, node: &Self::Node, html: &str);

    /// Read the element's inner markup
    fn inner_html(&self, node: &Self::Node) -> String;

    // === Style & layout ===

    /// Set (`Some`) or remove (`None`) an inline style property
    fn set_style(&mut self, node: &Self::Node, property: &str, value: Option<&str>);

    /// Read an inline style property
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Force a style recalculation for `node`
    ///
    /// Called between inserting an element and toggling its visible class so
    /// the browser treats the class change as a transition.
    fn flush_style(&self, node: &Self::Node);

    /// Resolved value of a style property after layout
    fn computed_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Rendered height of the element in pixels
    fn client_height(&self, node: &Self::Node) -> f64;

    /// Height of the viewport in pixels
    fn viewport_height(&self) -> f64;

    // === Events & timers ===

    /// Route clicks on `node` (and its descendants) back as `Signal::Click`
    fn listen_click(&mut self, node: &Self::Node, listener: Target);

    /// Schedule `task` to come back as `Signal::Timer` after `delay_ms`
    fn set_timeout(&mut self, delay_ms: u32, task: Task) -> TimerId;

    /// Cancel a pending timer (no-op when it already fired)
    fn clear_timeout(&mut self, id: TimerId);
}

/// Host errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostError {
    /// No document (or no body) is available
    NoDocument,
    /// The node handle is unknown or cannot take part in the operation
    InvalidNode,
    /// Operation not supported by this host
    NotSupported,
}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HostError::NoDocument => write!(f, "no document available"),
            HostError::InvalidNode => write!(f, "invalid node"),
            HostError::NotSupported => write!(f, "operation not supported"),
        }
    }
}

impl std::error::Error for HostError {}
