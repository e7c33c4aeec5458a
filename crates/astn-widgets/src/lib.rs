//! Notification widgets for ast-notif
//!
//! This crate provides the widget logic, independent of any browser:
//! - Modal dialogs and full-screen posters with up to two buttons
//! - Toasts at one of eight compass points
//! - Snackbars on the top or bottom edge with an optional action
//! - Stacked notification cards, each with its own timer
//!
//! ## Architecture
//!
//! - [`themes`]: Named color triples
//! - [`dom`]: Class tokens, ancestor lookup, sanitizing and opacity clamping
//! - [`coerce`]: Lenient parsing of loosely typed option values
//! - [`settings`]: Theme, stacking order and icon base path
//! - [`widget`]: The shared lifecycle and the five widget kinds
//! - [`notifier`]: The facade owning a host and all controllers
//!
//! Everything document-related goes through the `astn_host::Host` trait, so
//! the whole crate runs against `astn-host-mock` in tests.
//!
//! ## Example
//!
//! ```rust
//! use astn_host_mock::MockHost;
//! use astn_widgets::{Notifier, Phase, ToastPatch, WidgetKind};
//!
//! let mut notifier = Notifier::new(MockHost::new());
//! notifier.set_theme("dark").toast("Saved", ToastPatch::default());
//! assert_eq!(notifier.phase(WidgetKind::Toast), Phase::Visible);
//! ```

pub mod coerce;
pub mod color;
pub mod dom;
pub mod error;
pub mod notifier;
pub mod settings;
pub mod themes;
pub mod widget;

pub use astn_host::{CardId, Host, Signal, Target, Task, WidgetKind};
pub use error::{ConfigError, MountError, SettingsError};
pub use notifier::{Effect, Notifier, Reaction, Status, WidgetStatus};
pub use settings::Settings;
pub use widget::{
    Callback, Compass, DialogPatch, Edge, NotifyPatch, Phase, PosterPatch, SnackbarPatch,
    ToastPatch, VerticalEdge,
};

/// Library version
pub const VERSION: &str = "0.1.2";
