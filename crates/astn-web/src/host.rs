//! Browser host
//!
//! Implements `Host` over web-sys elements. Timer and click closures do not
//! touch the widgets: they push a `Signal` into a [`SignalSink`], and
//! whoever owns the notifier connects the sink.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use astn_host::{Host, HostError, Signal, Target, Task, TimerId};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

type Handler = Rc<dyn Fn(Signal<Element>)>;

/// Destination of timer and click signals
#[derive(Clone, Default)]
pub struct SignalSink(Rc<RefCell<Option<Handler>>>);

impl SignalSink {
    /// Route every future signal to `handler`
    pub fn connect(&self, handler: impl Fn(Signal<Element>) + 'static) {
        *self.0.borrow_mut() = Some(Rc::new(handler));
    }

    fn send(&self, signal: Signal<Element>) {
        // Release the slot before running the handler so it may reconnect
        let handler = self.0.borrow().clone();
        match handler {
            Some(handler) => handler(signal),
            None => debug!("[web-host] no sink connected, dropping {:?}", signal),
        }
    }
}

#[derive(Default)]
struct Timers {
    /// Scheduled timers: id -> (browser handle, callback)
    pending: HashMap<u64, (i32, Closure<dyn FnMut()>)>,
    /// Callback of the timer that fired last; it may still be on the stack
    spent: Option<Closure<dyn FnMut()>>,
}

impl Timers {
    fn retire(&mut self, id: u64) {
        if let Some((_, closure)) = self.pending.remove(&id) {
            self.spent = Some(closure);
        }
    }
}

/// Host backed by the page's document and `window.setTimeout`
pub struct WebHost {
    window: Option<Window>,
    document: Option<Document>,
    sink: SignalSink,
    timers: Rc<RefCell<Timers>>,
    next_timer: u64,
    listeners: Vec<(Element, Closure<dyn FnMut(Event)>)>,
}

impl Default for WebHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WebHost {
    /// Host for the current page; without a window every operation is a no-op
    pub fn new() -> Self {
        let window = web_sys::window();
        let document = window.as_ref().and_then(Window::document);
        if document.is_none() {
            warn!("[web-host] no document, widgets will not be shown");
        }
        Self {
            window,
            document,
            sink: SignalSink::default(),
            timers: Rc::new(RefCell::new(Timers::default())),
            next_timer: 1,
            listeners: Vec::new(),
        }
    }

    /// Handle for connecting the signal consumer
    pub fn sink(&self) -> SignalSink {
        self.sink.clone()
    }

    /// Number of timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().pending.len()
    }

    fn html(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }

    /// Drop listeners of elements that have left the document
    fn prune_listeners(&mut self) {
        self.listeners.retain(|(element, closure)| {
            if element.is_connected() {
                return true;
            }
            let _ = element.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            false
        });
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        if let Some(window) = &self.window {
            for (handle, _) in self.timers.borrow().pending.values() {
                window.clear_timeout_with_handle(*handle);
            }
        }
        for (element, closure) in &self.listeners {
            let _ = element.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
    }
}

impl Host for WebHost {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.as_ref()?.body().map(Element::from)
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, HostError> {
        let document = self.document.as_ref().ok_or(HostError::NoDocument)?;
        document.create_element(tag).map_err(|e| {
            warn!("[web-host] create_element({}) failed: {:?}", tag, e);
            HostError::NotSupported
        })
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn query_selector(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn matches(&self, node: &Element, selector: &str) -> bool {
        node.matches(selector).unwrap_or(false)
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), HostError> {
        parent.append_child(child).map(|_| ()).map_err(|e| {
            warn!("[web-host] append_child failed: {:?}", e);
            HostError::InvalidNode
        })
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            warn!("[web-host] set_attribute({}) failed: {:?}", name, e);
        }
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_style(&mut self, node: &Element, property: &str, value: Option<&str>) {
        let Some(html) = Self::html(node) else {
            return;
        };
        let style = html.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };
        if let Err(e) = result {
            warn!("[web-host] style {} failed: {:?}", property, e);
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        Self::html(node)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn flush_style(&self, node: &Element) {
        // Reading a computed property forces the recalculation
        let _ = self.computed_style(node, "opacity");
    }

    fn computed_style(&self, node: &Element, property: &str) -> Option<String> {
        self.window
            .as_ref()?
            .get_computed_style(node)
            .ok()
            .flatten()?
            .get_property_value(property)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn client_height(&self, node: &Element) -> f64 {
        f64::from(node.client_height())
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .as_ref()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn listen_click(&mut self, node: &Element, listener: Target) {
        self.prune_listeners();

        let sink = self.sink.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            sink.send(Signal::Click { listener, target });
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) = node.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
            warn!("[web-host] add_event_listener failed: {:?}", e);
            return;
        }
        self.listeners.push((node.clone(), closure));
    }

    fn set_timeout(&mut self, delay_ms: u32, task: Task) -> TimerId {
        let id = self.next_timer;
        self.next_timer += 1;

        let Some(window) = &self.window else {
            warn!("[web-host] no window, {:?} never fires", task);
            return TimerId(id);
        };

        let timers: Weak<RefCell<Timers>> = Rc::downgrade(&self.timers);
        let sink = self.sink.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().retire(id);
            }
            sink.send(Signal::Timer(task));
        }) as Box<dyn FnMut()>);

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), delay) {
            Ok(handle) => {
                self.timers.borrow_mut().pending.insert(id, (handle, closure));
            }
            Err(e) => warn!("[web-host] setTimeout failed: {:?}", e),
        }
        TimerId(id)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        let removed = self.timers.borrow_mut().pending.remove(&id.0);
        if let (Some((handle, _closure)), Some(window)) = (removed, &self.window) {
            window.clear_timeout_with_handle(handle);
        }
    }
}
