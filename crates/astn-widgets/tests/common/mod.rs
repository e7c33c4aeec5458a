//! Shared helpers for driving a notifier over the mock host

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use astn_host_mock::{MockHost, NodeId};
use astn_widgets::Notifier;

/// Fire every timer due up to `until_ms`, including ones scheduled on the way
pub fn run_until(notifier: &mut Notifier<MockHost>, until_ms: f64) {
    while let Some(signal) = notifier.host_mut().pop_due(until_ms) {
        notifier.deliver(signal);
    }
    notifier.host_mut().set_now(until_ms);
}

/// Click `node` and deliver every listener signal it produces
pub fn click(notifier: &mut Notifier<MockHost>, node: NodeId) {
    for signal in notifier.host().click(node) {
        notifier.deliver(signal);
    }
}

/// First connected element matching `selector`
pub fn find(notifier: &Notifier<MockHost>, selector: &str) -> NodeId {
    notifier
        .host()
        .find_all(selector)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no element matches {}", selector))
}

/// Counter a callback can bump, shared with the test body
pub fn counter() -> (Rc<RefCell<u32>>, Rc<dyn Fn()>) {
    let hits = Rc::new(RefCell::new(0));
    let bump = {
        let hits = Rc::clone(&hits);
        Rc::new(move || *hits.borrow_mut() += 1) as Rc<dyn Fn()>
    };
    (hits, bump)
}
