//! Routing data carried by timers and click listeners

/// One of the five widget kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetKind {
    Dialog,
    Poster,
    Toast,
    Snackbar,
    Notify,
}

impl WidgetKind {
    /// All kinds, in facade order
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Dialog,
        WidgetKind::Poster,
        WidgetKind::Toast,
        WidgetKind::Snackbar,
        WidgetKind::Notify,
    ];

    /// Lowercase name, used in logs and status output
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Dialog => "dialog",
            WidgetKind::Poster => "poster",
            WidgetKind::Toast => "toast",
            WidgetKind::Snackbar => "snackbar",
            WidgetKind::Notify => "notify",
        }
    }

    /// Kind from its lowercase name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl core::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a single notification card
pub type CardId = u64;

/// Who a timer or click belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// A singleton widget
    Widget(WidgetKind),
    /// One card of the notification stack
    Card(CardId),
}

/// Deferred work scheduled through `Host::set_timeout`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Dwell time elapsed: start the exit animation
    Expire(Target),
    /// Exit animation elapsed: detach the subtree
    Detach(Target),
    /// Read the rendered height of a card and pin its wrapper to it
    Measure(CardId),
}

/// Host-assigned timer handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Something the host hands back to the widget owner
#[derive(Clone, Debug, PartialEq)]
pub enum Signal<N> {
    /// A scheduled task is due
    Timer(Task),
    /// A click reached a listening element
    Click {
        /// Routing data given to `Host::listen_click`
        listener: Target,
        /// Element the click originated on
        target: N,
    },
}
