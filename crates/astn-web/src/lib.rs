//! Browser bindings for ast-notif
//!
//! This crate exposes the widgets to JavaScript:
//! - [`WebHost`]: the `Host` implementation over the page's document
//! - [`AstNotif`]: the `#[wasm_bindgen]` facade pages call into
//! - A console logger for the `log` records the widgets emit
//!
//! ## Example
//!
//! ```js
//! import init, { AstNotif } from "./astn_web.js";
//!
//! await init();
//! const notif = new AstNotif({ iconBase: "/static/ast-notif/img/" });
//! notif.set_theme("dark");
//! notif.toast("Saved", { length: "short", position: "ne" });
//! notif.dialog("Delete file?", "This cannot be undone.", { negative: "Cancel" },
//!              () => remove(), () => {});
//! ```
//!
//! The constructor takes an optional settings object (`theme`, `zIndex`,
//! `iconBase`). Option objects use the same keys as the JavaScript library.
//! Anything the widgets cannot use is ignored; no method throws.

mod host;
mod logger;

pub use host::{SignalSink, WebHost};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use astn_host::{Signal, WidgetKind};
use astn_widgets::coerce::patch_from_value;
use astn_widgets::{Callback, Notifier, Settings, VERSION};
use log::{debug, warn};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Notifier handle for JavaScript
///
/// Every widget method returns a handle to the same notifier so calls can be
/// chained.
#[wasm_bindgen]
#[derive(Clone)]
pub struct AstNotif {
    inner: Rc<RefCell<Notifier<WebHost>>>,
}

impl Default for AstNotif {
    fn default() -> Self {
        Self::new(JsValue::UNDEFINED)
    }
}

#[wasm_bindgen]
impl AstNotif {
    /// Create a notifier for the current page
    ///
    /// `settings` may be omitted; a malformed object is reported on the
    /// console and the defaults are used.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Self {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        logger::init();

        let settings = settings_arg(&settings);
        let host = WebHost::new();
        let sink = host.sink();
        let inner = Rc::new(RefCell::new(Notifier::with_settings(host, settings)));
        let weak = Rc::downgrade(&inner);
        sink.connect(move |signal| dispatch(&weak, signal));

        Self { inner }
    }

    /// Library version
    #[wasm_bindgen]
    pub fn version() -> String {
        VERSION.to_string()
    }

    /// Set console verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    #[wasm_bindgen]
    pub fn set_log_level(level: &str) {
        match logger::parse_level(level) {
            Some(level) => logger::set_level(level),
            None => warn!("[astn] unknown log level {}", level),
        }
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// Show a modal dialog
    #[wasm_bindgen]
    pub fn dialog(
        &self,
        title: JsValue,
        message: JsValue,
        options: JsValue,
        on_positive: JsValue,
        on_negative: JsValue,
    ) -> AstNotif {
        let patch = patch_from_value(json_value(&options));
        self.with(|n| {
            n.dialog(
                &text_arg(&title),
                &text_arg(&message),
                patch,
                callback(on_positive),
                callback(on_negative),
            );
        });
        self.clone()
    }

    /// Show a full-screen poster
    #[wasm_bindgen]
    pub fn poster(
        &self,
        message: JsValue,
        options: JsValue,
        on_positive: JsValue,
        on_negative: JsValue,
    ) -> AstNotif {
        let patch = patch_from_value(json_value(&options));
        self.with(|n| {
            n.poster(&text_arg(&message), patch, callback(on_positive), callback(on_negative));
        });
        self.clone()
    }

    /// Show (or update) the toast
    #[wasm_bindgen]
    pub fn toast(&self, text: JsValue, options: JsValue) -> AstNotif {
        let patch = patch_from_value(json_value(&options));
        self.with(|n| {
            n.toast(&text_arg(&text), patch);
        });
        self.clone()
    }

    /// Show (or update) the snackbar
    #[wasm_bindgen]
    pub fn snackbar(&self, text: JsValue, options: JsValue, on_action: JsValue) -> AstNotif {
        let patch = patch_from_value(json_value(&options));
        self.with(|n| {
            n.snackbar(&text_arg(&text), patch, callback(on_action));
        });
        self.clone()
    }

    /// Add a notification card
    #[wasm_bindgen]
    pub fn notify(
        &self,
        title: JsValue,
        message: JsValue,
        footer: JsValue,
        options: JsValue,
        on_interact: JsValue,
    ) -> AstNotif {
        let patch = patch_from_value(json_value(&options));
        self.with(|n| {
            n.notify(
                &text_arg(&title),
                &text_arg(&message),
                &text_arg(&footer),
                patch,
                callback(on_interact),
            );
        });
        self.clone()
    }

    /// Close the live dialog or poster without running its callbacks
    #[wasm_bindgen]
    pub fn close(&self, kind: JsValue) -> AstNotif {
        match WidgetKind::parse(&text_arg(&kind)) {
            Some(kind) => self.with(|n| {
                n.close(kind);
            }),
            None => debug!("[astn] close: unknown widget kind"),
        }
        self.clone()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_theme(&self, name: JsValue) {
        self.with(|n| {
            n.set_theme(&text_arg(&name));
        });
    }

    #[wasm_bindgen]
    pub fn get_theme(&self) -> String {
        self.inner
            .try_borrow()
            .map(|n| n.theme().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn set_z_index(&self, value: JsValue) {
        let value = json_value(&value);
        self.with(|n| {
            n.set_z_index(value);
        });
    }

    #[wasm_bindgen]
    pub fn get_z_index(&self) -> i32 {
        self.inner.try_borrow().map(|n| n.z_index()).unwrap_or_default()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Snapshot of settings and widget phases as JSON
    #[wasm_bindgen]
    pub fn get_status_json(&self) -> String {
        match self.inner.try_borrow() {
            Ok(n) => serde_json::to_string(&n.status()).unwrap_or_else(|_| "{}".to_string()),
            Err(_) => "{}".to_string(),
        }
    }
}

impl AstNotif {
    fn with(&self, f: impl FnOnce(&mut Notifier<WebHost>)) {
        match self.inner.try_borrow_mut() {
            Ok(mut notifier) => f(&mut notifier),
            Err(_) => warn!("[astn] notifier busy, call ignored"),
        }
    }
}

/// Route a host signal to the notifier
///
/// The callback runs with no borrow held, so it may call back into the
/// notifier; the effect is applied afterwards.
fn dispatch(notifier: &Weak<RefCell<Notifier<WebHost>>>, signal: Signal<Element>) {
    let Some(notifier) = notifier.upgrade() else {
        return;
    };
    let reaction = match notifier.try_borrow() {
        Ok(n) => n.react(signal),
        Err(_) => {
            warn!("[astn] signal arrived while busy, dropped");
            return;
        }
    };

    if let Some(callback) = reaction.callback {
        callback();
    }
    if let Some(effect) = reaction.effect {
        match notifier.try_borrow_mut() {
            Ok(mut n) => n.apply(effect),
            Err(_) => warn!("[astn] {:?} dropped, notifier busy", effect),
        }
    }
}

/// JS callback argument; anything that is not a function is ignored
fn callback(value: JsValue) -> Option<Callback> {
    let function = value.dyn_into::<js_sys::Function>().ok()?;
    Some(Rc::new(move || {
        if let Err(e) = function.call0(&JsValue::NULL) {
            warn!("[astn] callback threw: {:?}", e);
        }
    }))
}

/// Text argument: strings as-is, numbers formatted, anything else empty
fn text_arg(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
        .unwrap_or_default()
}

/// Settings object passed to the constructor
fn settings_arg(value: &JsValue) -> Settings {
    if value.is_undefined() || value.is_null() {
        return Settings::default();
    }
    let json = js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_default();
    Settings::from_json(&json).unwrap_or_else(|e| {
        warn!("[astn] settings ignored: {}", e);
        Settings::default()
    })
}

/// Plain JS value as JSON; functions and cyclic objects become `null`
fn json_value(value: &JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(Value::Null)
}
