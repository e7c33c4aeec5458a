//! Full-screen poster: icon header over a message with buttons

use astn_host::{Host, Target, WidgetKind};
use serde::Deserialize;

use super::icon::Icon;
use super::{Callback, Press, Reentry, Widget};
use crate::coerce::lenient;
use crate::dom::{child_with_id, closest, element_with_id, sanitize, set_class};
use crate::error::MountError;
use crate::settings::Settings;
use crate::themes::{self, BASE, DEFAULT_THEME};

pub const ROOT_ID: &str = "ast-poster-bg";
pub const POSITIVE_ID: &str = "ast-positive-poster-button";
pub const NEGATIVE_ID: &str = "ast-negative-poster-button";
/// Class carried by the body while a poster is live
pub const BODY_CLASS: &str = "ast-poster";

const ICON_FILE: &str = "error_putih_garis.png";

#[derive(Clone, Debug, PartialEq)]
pub struct PosterOptions {
    /// Header background for the default theme; other themes use their accent
    pub head_background: String,
    pub body_background: String,
    pub color: String,
    pub icon: bool,
    pub icon_image: Option<String>,
    pub icon_size: String,
    pub positive: String,
    pub negative: String,
    pub theme: String,
    pub dismissible: bool,
    pub fa: String,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            head_background: BASE.accent.to_string(),
            body_background: "white".to_string(),
            color: BASE.foreground.to_string(),
            icon: true,
            icon_image: None,
            icon_size: "64px".to_string(),
            positive: "OK".to_string(),
            negative: "Cancel".to_string(),
            theme: DEFAULT_THEME.to_string(),
            dismissible: true,
            fa: String::new(),
        }
    }
}

/// Partial poster options, keyed by their JavaScript names
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PosterPatch {
    #[serde(rename = "bgheadcolor", deserialize_with = "lenient::text")]
    pub head_background: Option<String>,
    #[serde(rename = "bgbodycolor", deserialize_with = "lenient::text")]
    pub body_background: Option<String>,
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

#[derive(Default)]
pub struct Poster {
    message: String,
    options: PosterOptions,
    on_positive: Option<Callback>,
    on_negative: Option<Callback>,
}

impl Poster {
    pub fn options(&self) -> &PosterOptions {
        &self.options
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_content(&mut self, message: &str) {
        self.message = sanitize(message);
    }

    pub fn set_callbacks(&mut self, positive: Option<Callback>, negative: Option<Callback>) {
        if positive.is_some() {
            self.on_positive = positive;
        }
        if negative.is_some() {
            self.on_negative = negative;
        }
    }

    pub fn configure(&mut self, theme: &str, patch: PosterPatch) {
        let o = &mut self.options;
        o.theme = theme.to_string();

        let text = |value: Option<String>| value.map(|v| sanitize(&v));
        if let Some(v) = text(patch.head_background) {
            o.head_background = v;
        }
        if let Some(v) = text(patch.body_background) {
            o.body_background = v;
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

impl Widget for Poster {
    const KIND: WidgetKind = WidgetKind::Poster;
    const ROOT_ID: &'static str = ROOT_ID;
    const REENTRY: Reentry = Reentry::Ignore;
    const EXIT_DELAY_MS: u32 = 0;

    fn mount<H: Host>(&mut self, host: &mut H, settings: &Settings) -> Result<H::Node, MountError> {
        let body = host.body().ok_or(MountError::NoBody)?;
        let theme = themes::resolve(&self.options.theme);
        let o = &self.options;

        let backdrop = element_with_id(host, "div", ROOT_ID)?;
        let poster = child_with_id(host, &backdrop, "div", "ast-poster-el")?;
        host.set_style(&poster, "z-index", Some(&settings.z_index().to_string()));
        host.set_style(&poster, "color", Some(&o.color));

        // Header carries the icon
        let head = child_with_id(host, &poster, "div", "ast-poster-header")?;
        let head_background = if theme.is_default() {
            o.head_background.as_str()
        } else {
            theme.accent
        };
        host.set_style(&head, "background", Some(head_background));
        host.set_style(&head, "color", Some("white"));

        let image = o
            .icon_image
            .clone()
            .unwrap_or_else(|| settings.icon_path(ICON_FILE));
        let icon = Icon::choose(&o.fa, o.icon, &image);
        if !icon.is_none() {
            let holder = child_with_id(host, &head, "div", "ast-poster-icon")?;
            icon.render(host, &holder, Some(&o.icon_size))?;
        }

        // Body: message, then buttons
        let content = child_with_id(host, &poster, "div", "ast-poster-body")?;
        // The body follows the notifier's theme, not the per-call one
        let page_theme = themes::resolve(settings.theme());
        let body_background = if page_theme.is_dark() {
            page_theme.secondary_background()
        } else {
            o.body_background.as_str()
        };
        host.set_style(&content, "background-color", Some(body_background));

        let message = child_with_id(host, &content, "div", "ast-poster-message")?;
        host.set_inner_html(&message, &self.message);
        if icon.is_none() {
            host.set_style(&message, "margin-top", Some("30px"));
        }

        let positive = child_with_id(host, &content, "button", POSITIVE_ID)?;
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

        if !o.negative.is_empty() {
            let negative = child_with_id(host, &content, "button", NEGATIVE_ID)?;
            host.set_inner_html(&negative, &o.negative);
            let border = if theme.is_dark() {
                theme.secondary_background()
            } else {
                theme.foreground
            };
            host.set_style(&negative, "border-color", Some(border));
            host.set_style(&negative, "background-color", Some("transparent"));
            host.set_style(&negative, "color", Some(&o.color));
        }

        host.append_child(&body, &backdrop)?;
        set_class(host, &body, BODY_CLASS, true);

        host.flush_style(&backdrop);
        set_class(host, &backdrop, "show", true);
        host.flush_style(&poster);
        set_class(host, &poster, "show", true);

        host.listen_click(&backdrop, Target::Widget(WidgetKind::Poster));
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

#[cfg(test)]
mod tests {
    use super::*;
    use astn_host_mock::MockHost;

    #[test]
    fn test_head_uses_accent_outside_default_theme() {
        let mut host = MockHost::new();
        let mut poster = Poster::default();
        poster.configure("success", PosterPatch::default());
        poster.mount(&mut host, &Settings::default()).unwrap();

        let head = host.element_by_id("ast-poster-header").unwrap();
        assert_eq!(host.style(&head, "background").as_deref(), Some("#00AB6B"));
        assert_eq!(host.style(&head, "color").as_deref(), Some("white"));
    }

    #[test]
    fn test_default_head_and_icon() {
        let mut host = MockHost::new();
        let mut poster = Poster::default();
        poster.configure("default", PosterPatch::default());
        let settings = Settings::from_json(r#"{"iconBase":"/assets/"}"#).unwrap();
        poster.mount(&mut host, &settings).unwrap();

        let head = host.element_by_id("ast-poster-header").unwrap();
        assert_eq!(host.style(&head, "background").as_deref(), Some("#c5c5c5"));

        let icon = host.element_by_id("ast-poster-icon").unwrap();
        let img = host.query_selector(&icon, "img").unwrap();
        assert_eq!(
            host.attribute(&img, "src").as_deref(),
            Some("/assets/error_putih_garis.png")
        );
        assert_eq!(host.style(&img, "max-width").as_deref(), Some("64px"));
    }

    #[test]
    fn test_font_icon_wins() {
        let mut host = MockHost::new();
        let mut poster = Poster::default();
        poster.configure(
            "default",
            PosterPatch {
                fa: Some("bell".into()),
                icon_size: Some("80px".into()),
                ..Default::default()
            },
        );
        poster.mount(&mut host, &Settings::default()).unwrap();

        let icon = host.element_by_id("ast-poster-icon").unwrap();
        assert!(host.query_selector(&icon, "i.fa-bell").is_some());
        assert!(host.query_selector(&icon, "img").is_none());
        assert_eq!(host.style(&icon, "font-size").as_deref(), Some("80px"));
    }

    #[test]
    fn test_dark_body() {
        let mut host = MockHost::new();
        let mut poster = Poster::default();
        poster.configure("dark", PosterPatch::default());
        let settings = Settings::from_json(r#"{"theme":"dark"}"#).unwrap();
        poster.mount(&mut host, &settings).unwrap();

        let content = host.element_by_id("ast-poster-body").unwrap();
        assert_eq!(host.style(&content, "background-color").as_deref(), Some("#5f6163"));
        let negative = host.element_by_id(NEGATIVE_ID).unwrap();
        assert_eq!(host.style(&negative, "border-color").as_deref(), Some("#5f6163"));
    }

    #[test]
    fn test_body_follows_page_theme() {
        let mut host = MockHost::new();
        let mut poster = Poster::default();
        poster.configure("dark", PosterPatch::default());
        poster.mount(&mut host, &Settings::default()).unwrap();

        let content = host.element_by_id("ast-poster-body").unwrap();
        assert_eq!(host.style(&content, "background-color").as_deref(), Some("white"));
    }

    #[test]
    fn test_press_inside_label_markup() {
        let mut host = MockHost::new();
        let mut poster = Poster::default();
        poster.set_callbacks(Some(std::rc::Rc::new(|| {})), None);
        let root = poster.mount(&mut host, &Settings::default()).unwrap();

        let positive = host.element_by_id(POSITIVE_ID).unwrap();
        let bold = host.create_element("b").unwrap();
        host.append_child(&positive, &bold).unwrap();

        let press = poster.press(&host, &root, &bold).unwrap();
        assert!(press.dismiss);
        assert!(press.callback.is_some());
        let message = host.element_by_id("ast-poster-message").unwrap();
        assert!(poster.press(&host, &root, &message).is_none());
    }
}
