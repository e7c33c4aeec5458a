//! Notifier facade
//!
//! A `Notifier` owns a host, the settings and one controller per widget
//! kind. Several notifiers can coexist; they share nothing but the document.
//!
//! Hosts hand timers and clicks back as [`Signal`]s. [`Notifier::deliver`]
//! handles one end to end; owners that must run callbacks outside a borrow
//! of the notifier split it into [`Notifier::react`] and [`Notifier::apply`].

use core::fmt;

use astn_host::{CardId, Host, Signal, Target, Task, WidgetKind};
use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::settings::Settings;
use crate::widget::{
    Callback, Controller, Dialog, DialogPatch, NotifyPatch, NotifyStack, Phase, Poster,
    PosterPatch, Snackbar, SnackbarPatch, Toast, ToastPatch, Widget,
};
use crate::VERSION;

/// Work left over once a signal has been interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run a scheduled task
    Run(Task),
    /// Start dismissing a widget or card after a click
    Dismiss(Target),
}

/// Interpretation of a signal: a callback to run first, then an effect
#[derive(Clone, Default)]
pub struct Reaction {
    pub callback: Option<Callback>,
    pub effect: Option<Effect>,
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("callback", &self.callback.is_some())
            .field("effect", &self.effect)
            .finish()
    }
}

/// Snapshot of one widget kind
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WidgetStatus {
    pub kind: &'static str,
    pub phase: Phase,
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<usize>,
}

/// Snapshot of a notifier
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub version: &'static str,
    pub theme: String,
    pub z_index: i32,
    pub widgets: Vec<WidgetStatus>,
}

#[derive(Clone, Copy)]
enum Step {
    Expire,
    Detach,
    Dismiss,
}

/// Widget owner and public API
pub struct Notifier<H: Host> {
    host: H,
    settings: Settings,
    dialog: Controller<Dialog, H::Node>,
    poster: Controller<Poster, H::Node>,
    toast: Controller<Toast, H::Node>,
    snackbar: Controller<Snackbar, H::Node>,
    notify: NotifyStack<H::Node>,
}

impl<H: Host> Notifier<H> {
    pub fn new(host: H) -> Self {
        Self::with_settings(host, Settings::default())
    }

    pub fn with_settings(host: H, settings: Settings) -> Self {
        Self {
            host,
            settings,
            dialog: Controller::new(Dialog::default()),
            poster: Controller::new(Poster::default()),
            toast: Controller::new(Toast::default()),
            snackbar: Controller::new(Snackbar::default()),
            notify: NotifyStack::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// Show a modal dialog; ignored while one is live
    pub fn dialog(
        &mut self,
        title: &str,
        message: &str,
        patch: DialogPatch,
        on_positive: Option<Callback>,
        on_negative: Option<Callback>,
    ) -> &mut Self {
        let widget = self.dialog.widget_mut();
        widget.set_callbacks(on_positive, on_negative);
        widget.set_content(title, message);
        widget.configure(self.settings.theme(), patch);
        self.dialog.show(&mut self.host, &self.settings);
        self
    }

    /// Show a full-screen poster; ignored while one is live
    pub fn poster(
        &mut self,
        message: &str,
        patch: PosterPatch,
        on_positive: Option<Callback>,
        on_negative: Option<Callback>,
    ) -> &mut Self {
        let widget = self.poster.widget_mut();
        widget.set_callbacks(on_positive, on_negative);
        widget.set_content(message);
        widget.configure(self.settings.theme(), patch);
        self.poster.show(&mut self.host, &self.settings);
        self
    }

    /// Show a toast, or update the live one and restart its timer
    pub fn toast(&mut self, text: &str, patch: ToastPatch) -> &mut Self {
        let widget = self.toast.widget_mut();
        widget.set_content(text);
        widget.configure(self.settings.theme(), patch);
        self.toast.show(&mut self.host, &self.settings);
        self
    }

    /// Show a snackbar, or update the live one and restart its timer
    pub fn snackbar(&mut self, text: &str, patch: SnackbarPatch, action: Option<Callback>) -> &mut Self {
        let widget = self.snackbar.widget_mut();
        widget.set_action(action);
        widget.set_content(text);
        widget.configure(self.settings.theme(), patch);
        self.snackbar.show(&mut self.host, &self.settings);
        self
    }

    /// Add a notification card to the stack
    pub fn notify(
        &mut self,
        title: &str,
        message: &str,
        footer: &str,
        patch: NotifyPatch,
        on_interact: Option<Callback>,
    ) -> &mut Self {
        let widget = self.notify.notify_mut();
        widget.set_callback(on_interact);
        widget.set_content(title, message, footer);
        widget.configure(self.settings.theme(), patch);
        self.notify.show(&mut self.host, &self.settings);
        self
    }

    /// Close a live dialog or poster without invoking any callback
    pub fn close(&mut self, kind: WidgetKind) -> &mut Self {
        match kind {
            WidgetKind::Dialog => self.dialog.dismiss(&mut self.host),
            WidgetKind::Poster => self.poster.dismiss(&mut self.host),
            other => debug!("[{}] has no explicit close", other),
        }
        self
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Switch the theme used by subsequent shows; unknown names are ignored
    pub fn set_theme(&mut self, name: &str) -> &mut Self {
        if let Err(e) = self.settings.set_theme(name) {
            debug!("[settings] {}", e);
        }
        self
    }

    pub fn theme(&self) -> &str {
        self.settings.theme()
    }

    /// Set the stacking order; non-numeric values are ignored
    pub fn set_z_index(&mut self, value: impl Into<Value>) -> &mut Self {
        if let Err(e) = self.settings.set_z_index(&value.into()) {
            debug!("[settings] {}", e);
        }
        self
    }

    pub fn z_index(&self) -> i32 {
        self.settings.z_index()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn phase(&self, kind: WidgetKind) -> Phase {
        match kind {
            WidgetKind::Dialog => self.dialog.phase(),
            WidgetKind::Poster => self.poster.phase(),
            WidgetKind::Toast => self.toast.phase(),
            WidgetKind::Snackbar => self.snackbar.phase(),
            WidgetKind::Notify => self.notify.phase(),
        }
    }

    /// Root element of a live singleton widget
    pub fn root(&self, kind: WidgetKind) -> Option<&H::Node> {
        match kind {
            WidgetKind::Dialog => self.dialog.root(),
            WidgetKind::Poster => self.poster.root(),
            WidgetKind::Toast => self.toast.root(),
            WidgetKind::Snackbar => self.snackbar.root(),
            WidgetKind::Notify => self.notify.container(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.notify.card_count()
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.notify.card_ids()
    }

    /// Wrapper element of a notification card
    pub fn card_root(&self, id: CardId) -> Option<&H::Node> {
        self.notify.card_root(id)
    }

    pub fn card_phase(&self, id: CardId) -> Phase {
        self.notify.card_phase(id)
    }

    pub fn status(&self) -> Status {
        let widget = |kind: WidgetKind, theme: &str| WidgetStatus {
            kind: kind.as_str(),
            phase: self.phase(kind),
            theme: theme.to_string(),
            cards: None,
        };
        let mut notify = widget(WidgetKind::Notify, self.notify.notify().options().theme.as_str());
        notify.cards = Some(self.notify.card_count());

        Status {
            version: VERSION,
            theme: self.settings.theme().to_string(),
            z_index: self.settings.z_index(),
            widgets: vec![
                widget(WidgetKind::Dialog, self.dialog.widget().theme()),
                widget(WidgetKind::Poster, self.poster.widget().theme()),
                widget(WidgetKind::Toast, self.toast.widget().theme()),
                widget(WidgetKind::Snackbar, self.snackbar.widget().theme()),
                notify,
            ],
        }
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Interpret a signal without changing any state
    pub fn react(&self, signal: Signal<H::Node>) -> Reaction {
        let (listener, target) = match signal {
            Signal::Timer(task) => {
                return Reaction {
                    callback: None,
                    effect: Some(Effect::Run(task)),
                }
            }
            Signal::Click { listener, target } => (listener, target),
        };

        let press = match listener {
            Target::Widget(WidgetKind::Dialog) => self.dialog.press(&self.host, &target),
            Target::Widget(WidgetKind::Poster) => self.poster.press(&self.host, &target),
            Target::Widget(WidgetKind::Toast) => self.toast.press(&self.host, &target),
            Target::Widget(WidgetKind::Snackbar) => self.snackbar.press(&self.host, &target),
            Target::Widget(WidgetKind::Notify) => None,
            Target::Card(id) => self.notify.press(&self.host, id, &target),
        };

        match press {
            Some(press) => Reaction {
                callback: press.callback,
                effect: press.dismiss.then_some(Effect::Dismiss(listener)),
            },
            None => Reaction::default(),
        }
    }

    /// Carry out the effect of a reaction
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Run(Task::Expire(Target::Widget(kind))) => self.step(kind, Step::Expire),
            Effect::Run(Task::Expire(Target::Card(id))) => self.notify.expire(&mut self.host, id),
            Effect::Run(Task::Detach(Target::Widget(kind))) => self.step(kind, Step::Detach),
            Effect::Run(Task::Detach(Target::Card(id))) => self.notify.detach(&mut self.host, id),
            Effect::Run(Task::Measure(id)) => self.notify.measure(&mut self.host, id),
            Effect::Dismiss(Target::Widget(kind)) => self.step(kind, Step::Dismiss),
            Effect::Dismiss(Target::Card(id)) => self.notify.dismiss(&mut self.host, id, true),
        }
    }

    /// Handle a signal: run its callback, then apply its effect
    pub fn deliver(&mut self, signal: Signal<H::Node>) {
        let reaction = self.react(signal);
        if let Some(callback) = reaction.callback {
            callback();
        }
        if let Some(effect) = reaction.effect {
            self.apply(effect);
        }
    }

    fn step(&mut self, kind: WidgetKind, step: Step) {
        let host = &mut self.host;
        match kind {
            WidgetKind::Dialog => run_step(&mut self.dialog, host, step),
            WidgetKind::Poster => run_step(&mut self.poster, host, step),
            WidgetKind::Toast => run_step(&mut self.toast, host, step),
            WidgetKind::Snackbar => run_step(&mut self.snackbar, host, step),
            WidgetKind::Notify => {}
        }
    }
}

fn run_step<W: Widget, H: Host>(controller: &mut Controller<W, H::Node>, host: &mut H, step: Step) {
    match step {
        Step::Expire => controller.expire(host),
        Step::Detach => controller.detach(host),
        Step::Dismiss => controller.dismiss(host),
    }
}

impl<H: Host> fmt::Debug for Notifier<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("settings", &self.settings)
            .field("notify", &self.notify)
            .finish_non_exhaustive()
    }
}
