//! Shared lifecycle state machine
//!
//! ```text
//! Absent ──show──▶ Visible ──expire / dismiss──▶ Dismissing ──detach──▶ Absent
//!                    │ ▲
//!                    └─┘ show again (update in place, re-arm)
//! ```
//!
//! Building the subtree happens inside a single call, so the transient
//! mounting step is never observable from outside.

use astn_host::{Host, Target, Task, TimerId};
use serde::Serialize;

/// Observable lifecycle phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Absent,
    Visible,
    Dismissing,
}

/// Lifecycle of one mounted subtree and its two timers
#[derive(Debug)]
pub struct Lifecycle<N> {
    target: Target,
    phase: Phase,
    root: Option<N>,
    dwell_timer: Option<TimerId>,
    exit_timer: Option<TimerId>,
}

impl<N: Clone> Lifecycle<N> {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            phase: Phase::Absent,
            root: None,
            dwell_timer: None,
            exit_timer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn root(&self) -> Option<&N> {
        self.root.as_ref()
    }

    /// Record a freshly mounted subtree: Absent → Visible
    pub fn enter(&mut self, root: N) {
        self.root = Some(root);
        self.phase = Phase::Visible;
    }

    /// Arm the dwell timer, cancelling any pending one
    ///
    /// `None` leaves the widget up until it is dismissed explicitly.
    pub fn arm<H: Host<Node = N>>(&mut self, host: &mut H, dwell_ms: Option<u32>) {
        if let Some(id) = self.dwell_timer.take() {
            host.clear_timeout(id);
        }
        if let Some(ms) = dwell_ms {
            self.dwell_timer = Some(host.set_timeout(ms, Task::Expire(self.target)));
        }
    }

    /// Visible → Dismissing
    ///
    /// Returns the root so the caller can play the exit animation, or `None`
    /// when the widget was not visible.
    pub fn begin_exit<H: Host<Node = N>>(&mut self, host: &mut H) -> Option<N> {
        if self.phase != Phase::Visible {
            return None;
        }
        if let Some(id) = self.dwell_timer.take() {
            host.clear_timeout(id);
        }
        self.phase = Phase::Dismissing;
        self.root.clone()
    }

    /// Schedule the detach that ends the exit animation
    pub fn schedule_detach<H: Host<Node = N>>(&mut self, host: &mut H, delay_ms: u32) {
        if let Some(id) = self.exit_timer.take() {
            host.clear_timeout(id);
        }
        self.exit_timer = Some(host.set_timeout(delay_ms, Task::Detach(self.target)));
    }

    /// Tear down from any phase: cancel timers, detach the root → Absent
    ///
    /// Returns the detached root, `None` when nothing was mounted.
    pub fn finish<H: Host<Node = N>>(&mut self, host: &mut H) -> Option<N> {
        for id in [self.dwell_timer.take(), self.exit_timer.take()].into_iter().flatten() {
            host.clear_timeout(id);
        }
        self.phase = Phase::Absent;
        let root = self.root.take()?;
        host.remove(&root);
        Some(root)
    }
}
