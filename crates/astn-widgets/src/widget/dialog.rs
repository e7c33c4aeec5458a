//! Modal dialog: header, body with icon and message, footer with buttons

use astn_host::{Host, Target, WidgetKind};
use serde::Deserialize;

use super::icon::Icon;
use super::{Callback, Press, Reentry, Widget};
use crate::coerce::lenient;
use crate::dom::{child_with_id, closest, element_with_id, sanitize, set_class};
use crate::error::MountError;
use crate::settings::Settings;
use crate::themes::{self, BASE, DEFAULT_THEME};

pub const ROOT_ID: &str = "ast-dialog-bg";
pub const POSITIVE_ID: &str = "ast-positive-dialog-button";
pub const NEGATIVE_ID: &str = "ast-negative-dialog-button";
/// Class carried by the body while a dialog is live
pub const BODY_CLASS: &str = "ast-dialog";

const ICON_FILE: &str = "error_hitam_garis.png";

/// Dialog configuration, merged key by key across calls
#[derive(Clone, Debug, PartialEq)]
pub struct DialogOptions {
    pub head_background: String,
    pub body_background: String,
    pub foot_background: String,
    pub color: String,
    pub icon: bool,
    /// Icon image URL; `None` uses the bundled image under the icon base
    pub icon_image: Option<String>,
    pub icon_size: String,
    pub positive: String,
    pub negative: String,
    pub theme: String,
    /// Whether a click on the backdrop closes the dialog
    pub dismissible: bool,
    pub fa: String,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            head_background: BASE.background.to_string(),
            body_background: "white".to_string(),
            foot_background: "white".to_string(),
            color: BASE.foreground.to_string(),
            icon: true,
            icon_image: None,
            icon_size: "48px".to_string(),
            positive: "OK".to_string(),
            negative: "Cancel".to_string(),
            theme: DEFAULT_THEME.to_string(),
            dismissible: true,
            fa: String::new(),
        }
    }
}

/// Partial dialog options, keyed by their JavaScript names
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DialogPatch {
    #[serde(rename = "bgheadcolor", deserialize_with = "lenient::text")]
    pub head_background: Option<String>,
    #[serde(rename = "bgbodycolor", deserialize_with = "lenient::text")]
    pub body_background: Option<String>,
    #[serde(rename = "bgfootcolor", deserialize_with = "lenient::text")]
    pub foot_background: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub icon: Option<bool>,
    #[serde(rename = "imgIcon", deserialize_with = "lenient::text")]
    pub icon_image: Option<String>,
    #[serde(rename = "iconSize", deserialize_with = "lenient::css_size")]
    pub icon_size: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub positive: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub negative: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub dismissible: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub fa: Option<String>,
}

/// Dialog widget state
#[derive(Default)]
pub struct Dialog {
    title: String,
    message: String,
    options: DialogOptions,
    on_positive: Option<Callback>,
    on_negative: Option<Callback>,
}

impl Dialog {
    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace title and message
    pub fn set_content(&mut self, title: &str, message: &str) {
        self.title = sanitize(title);
        self.message = sanitize(message);
    }

    /// Replace the callbacks that were supplied; `None` keeps the old one
    pub fn set_callbacks(&mut self, positive: Option<Callback>, negative: Option<Callback>) {
        if positive.is_some() {
            self.on_positive = positive;
        }
        if negative.is_some() {
            self.on_negative = negative;
        }
    }

    /// Reset the theme to `theme`, then overwrite every key present in `patch`
    pub fn configure(&mut self, theme: &str, patch: DialogPatch) {
        let o = &mut self.options;
        o.theme = theme.to_string();

        let text = |value: Option<String>| value.map(|v| sanitize(&v));
        if let Some(v) = text(patch.head_background) {
            o.head_background = v;
        }
        if let Some(v) = text(patch.body_background) {
            o.body_background = v;
        }
        if let Some(v) = text(patch.foot_background) {
            o.foot_background = v;
        }
        if let Some(v) = text(patch.color) {
            o.color = v;
        }
        if let Some(v) = patch.icon {
            o.icon = v;
        }
        if let Some(v) = text(patch.icon_image) {
            o.icon_image = Some(v);
        }
        if let Some(v) = text(patch.icon_size) {
            o.icon_size = v;
        }
        if let Some(v) = text(patch.positive) {
            o.positive = v;
        }
        if let Some(v) = text(patch.negative) {
            o.negative = v;
        }
        if let Some(v) = text(patch.theme) {
            o.theme = v;
        }
        if let Some(v) = patch.dismissible {
            o.dismissible = v;
        }
        if let Some(v) = text(patch.fa) {
            o.fa = v;
        }
    }
}

impl Widget for Dialog {
    const KIND: WidgetKind = WidgetKind::Dialog;
    const ROOT_ID: &'static str = ROOT_ID;
    const REENTRY: Reentry = Reentry::Ignore;
    const EXIT_DELAY_MS: u32 = 0;

    fn mount<H: Host>(&mut self, host: &mut H, settings: &Settings) -> Result<H::Node, MountError> {
        let body = host.body().ok_or(MountError::NoBody)?;
        let theme = themes::resolve(&self.options.theme);
        let o = &self.options;

        let backdrop = element_with_id(host, "div", ROOT_ID)?;
        let dialog = child_with_id(host, &backdrop, "div", "ast-dialog-el")?;
        host.set_style(&dialog, "z-index", Some(&settings.z_index().to_string()));
        host.set_style(&dialog, "color", Some(&o.color));

        // Header
        let head = child_with_id(host, &dialog, "div", "ast-dialog-header")?;
        let head_background = if theme.is_default() {
            o.head_background.as_str()
        } else {
            theme.background
        };
        host.set_style(&head, "background", Some(head_background));
        host.set_style(&head, "color", Some(theme.foreground));
        let title = host.create_element("h3")?;
        host.set_inner_html(&title, &self.title);
        host.append_child(&head, &title)?;

        // Body
        let content = child_with_id(host, &dialog, "div", "ast-dialog-body")?;
        host.set_style(&content, "color", Some(theme.foreground));
        let body_background = if theme.is_dark() {
            theme.secondary_background()
        } else {
            o.body_background.as_str()
        };
        host.set_style(&content, "background-color", Some(body_background));

        let image = o
            .icon_image
            .clone()
            .unwrap_or_else(|| settings.icon_path(ICON_FILE));
        let icon = Icon::choose(&o.fa, o.icon, &image);
        if !icon.is_none() {
            let holder = child_with_id(host, &content, "div", "ast-dialog-icon")?;
            icon.render(host, &holder, Some(&o.icon_size))?;
        }
        let message = child_with_id(host, &content, "p", "ast-dialog-message")?;
        host.set_inner_html(&message, &self.message);
        if icon.is_none() {
            host.set_style(&message, "margin-top", Some("30px"));
        }

        // Footer
        let footer = child_with_id(host, &dialog, "div", "ast-dialog-footer")?;
        let (foot_background, divider) = if theme.is_dark() {
            (theme.background, "transparent")
        } else {
            (o.foot_background.as_str(), "#CCC")
        };
        host.set_style(&footer, "background-color", Some(foot_background));
        host.set_style(&footer, "border-top-color", Some(divider));

        if !o.negative.is_empty() {
            let negative = child_with_id(host, &footer, "button", NEGATIVE_ID)?;
            host.set_inner_html(&negative, &o.negative);
            let border = if theme.is_dark() {
                theme.secondary_background()
            } else {
                theme.foreground
            };
            host.set_style(&negative, "border-color", Some(border));
            host.set_style(&negative, "background-color", Some("transparent"));
            host.set_style(&negative, "color", Some(theme.foreground));
        }

        let positive = child_with_id(host, &footer, "button", POSITIVE_ID)?;
        let label = if o.positive.is_empty() { "OK" } else { o.positive.as_str() };
        host.set_inner_html(&positive, label);
        host.set_style(&positive, "border-color", Some(theme.foreground));
        let positive_background = if theme.is_dark() {
            theme.background
        } else {
            theme.foreground
        };
        host.set_style(&positive, "background-color", Some(positive_background));
        host.set_style(&positive, "color", Some("white"));

        host.append_child(&body, &backdrop)?;
        set_class(host, &body, BODY_CLASS, true);

        host.flush_style(&backdrop);
        set_class(host, &backdrop, "show", true);
        host.flush_style(&dialog);
        set_class(host, &dialog, "show", true);

        host.listen_click(&backdrop, Target::Widget(WidgetKind::Dialog));
        Ok(backdrop)
    }

    fn leave<H: Host>(&mut self, host: &mut H, root: &H::Node) {
        set_class(host, root, "show", false);
    }

    fn detached<H: Host>(&mut self, host: &mut H) {
        if let Some(body) = host.body() {
            set_class(host, &body, BODY_CLASS, false);
        }
    }

    fn press<H: Host>(&self, host: &H, root: &H::Node, target: &H::Node) -> Option<Press> {
        if target == root {
            return self.options.dismissible.then(Press::dismiss);
        }
        // Labels are markup, so the click may land inside a button
        let callback = if closest(host, target, &format!("#{}", POSITIVE_ID)).is_some() {
            self.on_positive.clone()
        } else if closest(host, target, &format!("#{}", NEGATIVE_ID)).is_some() {
            self.on_negative.clone()
        } else {
            return None;
        };
        Some(Press {
            callback,
            dismiss: true,
        })
    }

    fn theme(&self) -> &str {
        &self.options.theme
    }
}
