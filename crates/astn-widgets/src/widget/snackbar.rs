//! Snackbar: a bar sliding in from the top or bottom edge, with an optional
//! action button

use astn_host::{Host, Target, WidgetKind};
use serde::{Deserialize, Deserializer};

use super::{Callback, Press, Reentry, Widget};
use crate::coerce::{self, lenient, DEFAULT_LENGTH_MS};
use crate::dom::{child_with_class, child_with_id, closest, element_with_id, sanitize, set_class};
use crate::error::MountError;
use crate::settings::Settings;
use crate::themes::{self, Theme, BASE, DEFAULT_THEME};

pub const ROOT_ID: &str = "ast-snack-el";
pub const MESSAGE_ID: &str = "ast-snack-message";
pub const BUTTON_ID: &str = "ast-snack-button";

/// Off-screen offset the bar slides in from
const HIDDEN_OFFSET: &str = "-100px";

/// Screen edge the snackbar is attached to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    #[default]
    Bottom,
}

impl VerticalEdge {
    /// `"top"` (any case) is the top edge; everything else is the bottom
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("top") {
            VerticalEdge::Top
        } else {
            VerticalEdge::Bottom
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerticalEdge::Top => "top",
            VerticalEdge::Bottom => "bottom",
        }
    }

    fn show_class(self) -> &'static str {
        match self {
            VerticalEdge::Top => "show-top",
            VerticalEdge::Bottom => "show-bottom",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnackbarOptions {
    pub position: VerticalEdge,
    /// Dwell time in milliseconds, `-1` to persist
    pub length: i64,
    pub background: String,
    pub color: String,
    /// Action label color for the default theme
    pub button_color: String,
    pub reverse: bool,
    pub fa: String,
    pub theme: String,
    /// Action label; empty means no action button
    pub button: String,
}

impl Default for SnackbarOptions {
    fn default() -> Self {
        Self {
            position: VerticalEdge::Bottom,
            length: DEFAULT_LENGTH_MS,
            background: BASE.foreground.to_string(),
            color: BASE.background.to_string(),
            button_color: BASE.accent.to_string(),
            reverse: false,
            fa: String::new(),
            theme: DEFAULT_THEME.to_string(),
            button: String::new(),
        }
    }
}

/// Partial snackbar options, keyed by their JavaScript names
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnackbarPatch {
    #[serde(deserialize_with = "edge")]
    pub position: Option<VerticalEdge>,
    #[serde(deserialize_with = "lenient::length")]
    pub length: Option<i64>,
    #[serde(rename = "bgcolor", deserialize_with = "lenient::text")]
    pub background: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(rename = "btncolor", deserialize_with = "lenient::text")]
    pub button_color: Option<String>,
    #[serde(rename = "reverseColor", deserialize_with = "lenient::flag")]
    pub reverse: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub fa: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub button: Option<String>,
}

fn edge<'de, D: Deserializer<'de>>(d: D) -> Result<Option<VerticalEdge>, D::Error> {
    Ok(lenient::keyword(d)?.map(|s| VerticalEdge::parse(&s)))
}

#[derive(Default)]
pub struct Snackbar {
    text: String,
    options: SnackbarOptions,
    action: Option<Callback>,
    /// Edge the live instance was mounted on
    mounted_edge: VerticalEdge,
}

impl Snackbar {
    pub fn options(&self) -> &SnackbarOptions {
        &self.options
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_content(&mut self, text: &str) {
        self.text = sanitize(text);
    }

    pub fn set_action(&mut self, action: Option<Callback>) {
        if action.is_some() {
            self.action = action;
        }
    }

    pub fn configure(&mut self, theme: &str, patch: SnackbarPatch) {
        let o = &mut self.options;
        o.theme = theme.to_string();

        let text = |value: Option<String>| value.map(|v| sanitize(&v));
        if let Some(v) = patch.position {
            o.position = v;
        }
        if let Some(v) = patch.length {
            o.length = v;
        }
        if let Some(v) = text(patch.background) {
            o.background = v;
        }
        if let Some(v) = text(patch.color) {
            o.color = v;
        }
        if let Some(v) = text(patch.button_color) {
            o.button_color = v;
        }
        if let Some(v) = patch.reverse {
            o.reverse = v;
        }
        if let Some(v) = text(patch.fa) {
            o.fa = v;
        }
        if let Some(v) = text(patch.theme) {
            o.theme = v;
        }
        if let Some(v) = text(patch.button) {
            o.button = v;
        }
    }

    /// Color the action label and slide the bar in
    fn enter<H: Host>(&self, host: &mut H, root: &H::Node, theme: &Theme) {
        if let Some(button) = host.query_selector(root, &format!("#{}", BUTTON_ID)) {
            let color = if theme.is_default() {
                self.options.button_color.as_str()
            } else {
                theme.accent
            };
            host.set_style(&button, "color", Some(color));
        }
        host.flush_style(root);
        set_class(host, root, self.mounted_edge.show_class(), true);
    }
}

impl Widget for Snackbar {
    const KIND: WidgetKind = WidgetKind::Snackbar;
    const ROOT_ID: &'static str = ROOT_ID;
    const REENTRY: Reentry = Reentry::Update;
    const EXIT_DELAY_MS: u32 = 200;

    fn mount<H: Host>(&mut self, host: &mut H, settings: &Settings) -> Result<H::Node, MountError> {
        let body = host.body().ok_or(MountError::NoBody)?;
        let theme = themes::resolve(&self.options.theme);
        let o = &self.options;

        let root = element_with_id(host, "div", ROOT_ID)?;
        host.set_style(&root, "z-index", Some(&settings.z_index().to_string()));

        let line = child_with_id(host, &root, "p", "ast-snack-text")?;
        if !o.fa.is_empty() {
            child_with_class(host, &line, "i", &format!("fa fa-{}", o.fa))?;
        }
        let message = child_with_id(host, &line, "span", MESSAGE_ID)?;
        host.set_inner_html(&message, &self.text);
        if !o.button.is_empty() {
            let button = child_with_id(host, &line, "span", BUTTON_ID)?;
            host.set_inner_html(&button, &o.button);
        }

        let edge = o.position;
        host.set_style(&root, edge.as_str(), Some(HIDDEN_OFFSET));

        // Snackbar colors are the inverse of the toast's for named themes
        let (mut background, mut color) = if theme.is_default() {
            (o.background.clone(), o.color.clone())
        } else {
            (theme.foreground.to_string(), theme.background.to_string())
        };
        if o.reverse {
            core::mem::swap(&mut background, &mut color);
        }
        host.set_style(&root, "background-color", Some(&background));
        host.set_style(&root, "color", Some(&color));

        host.append_child(&body, &root)?;
        host.listen_click(&root, Target::Widget(WidgetKind::Snackbar));

        self.mounted_edge = edge;
        self.enter(host, &root, theme);
        Ok(root)
    }

    fn update<H: Host>(&mut self, host: &mut H, root: &H::Node) {
        if let Some(message) = host.query_selector(root, &format!("#{}", MESSAGE_ID)) {
            host.set_inner_html(&message, &self.text);
        }
        let theme = themes::resolve(&self.options.theme);
        self.enter(host, root, theme);
    }

    fn dwell(&self) -> Option<u32> {
        coerce::dwell_ms(self.options.length)
    }

    fn leave<H: Host>(&mut self, host: &mut H, root: &H::Node) {
        set_class(host, root, self.mounted_edge.show_class(), false);
        set_class(host, root, "close", true);
    }

    fn press<H: Host>(&self, host: &H, _root: &H::Node, target: &H::Node) -> Option<Press> {
        closest(host, target, &format!("#{}", BUTTON_ID))?;
        let callback = self.action.clone()?;
        Some(Press {
            callback: Some(callback),
            dismiss: false,
        })
    }

    fn theme(&self) -> &str {
        &self.options.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astn_host_mock::MockHost;
    use std::rc::Rc;

    #[test]
    fn test_edge_parse() {
        assert_eq!(VerticalEdge::parse("TOP"), VerticalEdge::Top);
        assert_eq!(VerticalEdge::parse("bottom"), VerticalEdge::Bottom);
        assert_eq!(VerticalEdge::parse("left"), VerticalEdge::Bottom);
    }

    #[test]
    fn test_mount_top_with_button() {
        let mut host = MockHost::new();
        let mut snackbar = Snackbar::default();
        snackbar.set_content("Saved");
        snackbar.configure(
            "default",
            SnackbarPatch {
                position: Some(VerticalEdge::Top),
                button: Some("Undo".into()),
                fa: Some("check".into()),
                ..Default::default()
            },
        );
        let root = snackbar.mount(&mut host, &Settings::default()).unwrap();

        assert_eq!(host.style(&root, "top").as_deref(), Some("-100px"));
        assert_eq!(host.style(&root, "bottom"), None);
        assert!(crate::dom::has_class(&host, &root, "show-top"));
        assert!(host.query_selector(&root, "i.fa-check").is_some());

        let button = host.element_by_id(BUTTON_ID).unwrap();
        assert_eq!(host.inner_html(&button), "Undo");
        assert_eq!(host.style(&button, "color").as_deref(), Some("#c5c5c5"));
    }

    #[test]
    fn test_theme_inverts_colors() {
        let mut host = MockHost::new();
        let mut snackbar = Snackbar::default();
        snackbar.configure(
            "info",
            SnackbarPatch {
                button: Some("Go".into()),
                ..Default::default()
            },
        );
        let root = snackbar.mount(&mut host, &Settings::default()).unwrap();

        assert_eq!(host.style(&root, "background-color").as_deref(), Some("#0c5460"));
        assert_eq!(host.style(&root, "color").as_deref(), Some("#bee5eb"));
        let button = host.element_by_id(BUTTON_ID).unwrap();
        assert_eq!(host.style(&button, "color").as_deref(), Some("#02BAF2"));
    }

    #[test]
    fn test_press_only_on_button_with_action() {
        let mut host = MockHost::new();
        let mut snackbar = Snackbar::default();
        snackbar.configure(
            "default",
            SnackbarPatch {
                button: Some("Undo".into()),
                ..Default::default()
            },
        );
        let root = snackbar.mount(&mut host, &Settings::default()).unwrap();
        let button = host.element_by_id(BUTTON_ID).unwrap();
        let message = host.element_by_id(MESSAGE_ID).unwrap();

        assert!(snackbar.press(&host, &root, &button).is_none());

        snackbar.set_action(Some(Rc::new(|| {})));
        let press = snackbar.press(&host, &root, &button).unwrap();
        assert!(press.callback.is_some());
        assert!(!press.dismiss);
        assert!(snackbar.press(&host, &root, &message).is_none());
    }

    #[test]
    fn test_leave_uses_mounted_edge() {
        let mut host = MockHost::new();
        let mut snackbar = Snackbar::default();
        let root = snackbar.mount(&mut host, &Settings::default()).unwrap();

        snackbar.configure(
            "default",
            SnackbarPatch {
                position: Some(VerticalEdge::Top),
                ..Default::default()
            },
        );
        snackbar.leave(&mut host, &root);

        assert!(!crate::dom::has_class(&host, &root, "show-bottom"));
        assert!(crate::dom::has_class(&host, &root, "close"));
    }
}
