//! Widget controllers
//!
//! Every kind runs through the same [`Lifecycle`]; what differs per kind
//! (markup, colors, re-entry, exit delay, click handling) is described by
//! the [`Widget`] trait. Dialog, poster, toast and snackbar are singletons
//! driven by a [`Controller`]. Notification cards share one container and
//! are driven by [`NotifyStack`].

mod dialog;
mod icon;
mod lifecycle;
mod notify;
mod poster;
mod snackbar;
mod toast;

use core::fmt;
use std::rc::Rc;

use astn_host::{Host, Target, WidgetKind};
use log::{debug, warn};

use crate::error::MountError;
use crate::settings::Settings;

pub use dialog::{Dialog, DialogOptions, DialogPatch};
pub use lifecycle::{Lifecycle, Phase};
pub use notify::{Edge, Notify, NotifyOptions, NotifyPatch, NotifyStack};
pub use poster::{Poster, PosterOptions, PosterPatch};
pub use snackbar::{Snackbar, SnackbarOptions, SnackbarPatch, VerticalEdge};
pub use toast::{place, Compass, Placement, Toast, ToastOptions, ToastPatch};

/// Caller-supplied callback
pub type Callback = Rc<dyn Fn()>;

/// Outcome of a click on a widget
#[derive(Clone, Default)]
pub struct Press {
    /// Callback to run before anything is torn down
    pub callback: Option<Callback>,
    /// Whether the widget should start dismissing
    pub dismiss: bool,
}

impl Press {
    pub fn dismiss() -> Self {
        Self {
            callback: None,
            dismiss: true,
        }
    }
}

impl fmt::Debug for Press {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Press")
            .field("callback", &self.callback.is_some())
            .field("dismiss", &self.dismiss)
            .finish()
    }
}

/// What `show` does while an instance is already live
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reentry {
    /// Leave the live instance alone
    Ignore,
    /// Update its text in place and re-arm the dwell timer
    Update,
}

/// Per-kind behavior plugged into the shared lifecycle
pub trait Widget {
    const KIND: WidgetKind;
    /// Id of the subtree root, unique in the document
    const ROOT_ID: &'static str;
    const REENTRY: Reentry;
    /// Delay between the exit animation starting and the detach (0 = at once)
    const EXIT_DELAY_MS: u32;

    /// Build the subtree, attach it to the body and play the entry animation
    fn mount<H: Host>(&mut self, host: &mut H, settings: &Settings) -> Result<H::Node, MountError>;

    /// Refresh the live subtree after a repeated `show`
    fn update<H: Host>(&mut self, _host: &mut H, _root: &H::Node) {}

    /// Dwell time before the widget dismisses itself, `None` to persist
    fn dwell(&self) -> Option<u32> {
        None
    }

    /// Play the exit animation
    fn leave<H: Host>(&mut self, host: &mut H, root: &H::Node);

    /// The subtree has been removed from the document
    fn detached<H: Host>(&mut self, _host: &mut H) {}

    /// Interpret a click inside the subtree
    fn press<H: Host>(&self, _host: &H, _root: &H::Node, _target: &H::Node) -> Option<Press> {
        None
    }

    /// Theme the widget resolves its colors from
    fn theme(&self) -> &str;
}

/// Single-instance controller for one widget kind
pub struct Controller<W, N> {
    widget: W,
    life: Lifecycle<N>,
}

impl<W: Widget, N: Clone + PartialEq + fmt::Debug> Controller<W, N> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            life: Lifecycle::new(Target::Widget(W::KIND)),
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn phase(&self) -> Phase {
        self.life.phase()
    }

    pub fn root(&self) -> Option<&N> {
        self.life.root()
    }

    /// Mount the widget, or apply the kind's re-entry rule when it is live
    pub fn show<H: Host<Node = N>>(&mut self, host: &mut H, settings: &Settings) {
        self.reconcile(host);

        match (self.life.phase(), W::REENTRY) {
            (Phase::Absent, _) => {}
            (_, Reentry::Ignore) => {
                debug!("[{}] already live, ignoring show", W::KIND);
                return;
            }
            (Phase::Visible, Reentry::Update) => {
                if let Some(root) = self.life.root().cloned() {
                    self.widget.update(host, &root);
                }
                self.life.arm(host, self.widget.dwell());
                debug!("[{}] updated in place", W::KIND);
                return;
            }
            (Phase::Dismissing, Reentry::Update) => {
                debug!("[{}] shown during exit, remounting", W::KIND);
                self.teardown(host);
            }
        }

        match self.widget.mount(host, settings) {
            Ok(root) => {
                self.life.enter(root);
                self.life.arm(host, self.widget.dwell());
                debug!("[{}] mounted", W::KIND);
            }
            Err(e) => warn!("[{}] mount failed: {}", W::KIND, e),
        }
    }

    /// Dwell time elapsed
    pub fn expire<H: Host<Node = N>>(&mut self, host: &mut H) {
        debug!("[{}] dwell elapsed", W::KIND);
        self.dismiss(host);
    }

    /// Start the exit animation; widgets without one are detached at once
    pub fn dismiss<H: Host<Node = N>>(&mut self, host: &mut H) {
        let Some(root) = self.life.begin_exit(host) else {
            return;
        };
        self.widget.leave(host, &root);
        debug!("[{}] dismissing", W::KIND);

        if W::EXIT_DELAY_MS == 0 {
            self.teardown(host);
        } else {
            self.life.schedule_detach(host, W::EXIT_DELAY_MS);
        }
    }

    /// Exit animation elapsed
    pub fn detach<H: Host<Node = N>>(&mut self, host: &mut H) {
        if self.life.phase() == Phase::Dismissing {
            self.teardown(host);
        }
    }

    /// Interpret a click routed to this widget
    pub fn press<H: Host<Node = N>>(&self, host: &H, target: &N) -> Option<Press> {
        if self.life.phase() != Phase::Visible {
            return None;
        }
        let root = self.life.root()?;
        self.widget.press(host, root, target)
    }

    /// Forget a live instance whose subtree was removed behind our back
    fn reconcile<H: Host<Node = N>>(&mut self, host: &mut H) {
        if self.life.phase() == Phase::Absent {
            return;
        }
        if host.element_by_id(W::ROOT_ID).as_ref() != self.life.root() {
            debug!("[{}] subtree removed externally", W::KIND);
            self.teardown(host);
        }
    }

    fn teardown<H: Host<Node = N>>(&mut self, host: &mut H) {
        if self.life.finish(host).is_some() {
            self.widget.detached(host);
            debug!("[{}] detached", W::KIND);
        }
    }
}
