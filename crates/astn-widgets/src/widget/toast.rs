//! Toast: a short message placed at one of eight compass points

use astn_host::{Host, WidgetKind};
use serde::{Deserialize, Deserializer};

use super::{Reentry, Widget};
use crate::coerce::{self, lenient, DEFAULT_LENGTH_MS};
use crate::color::translucent;
use crate::dom::{child_with_id, clamp_opacity, element_with_id, px, sanitize, set_class};
use crate::error::MountError;
use crate::settings::Settings;
use crate::themes::{self, BASE, DEFAULT_THEME};

pub const ROOT_ID: &str = "ast-toast-el";
pub const TEXT_ID: &str = "ast-toast-text";

/// Where the toast sits on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    #[default]
    S,
    SW,
    W,
    NW,
    /// Vertically and horizontally centered
    Center,
}

impl Compass {
    /// Case-insensitive compass point; anything else centers the toast
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" => Compass::N,
            "ne" => Compass::NE,
            "e" => Compass::E,
            "se" => Compass::SE,
            "s" => Compass::S,
            "sw" => Compass::SW,
            "w" => Compass::W,
            "nw" => Compass::NW,
            _ => Compass::Center,
        }
    }
}

/// Inline offsets for the toast root; `None` clears the property
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

/// Compute toast offsets
///
/// The toast starts centered (vertically from the element height, stretched
/// horizontally) and each compass component pins one side at
/// `margin + vdist` or `margin + hdist`.
pub fn place(
    compass: Compass,
    margin: f64,
    vdist: f64,
    hdist: f64,
    viewport_height: f64,
    element_height: f64,
) -> Placement {
    let vertical = Some(px(margin + vdist));
    let horizontal = Some(px(margin + hdist));
    let mut p = Placement {
        top: Some(px(viewport_height / 2.0 - element_height / 2.0)),
        bottom: None,
        left: Some(px(0.0)),
        right: Some(px(0.0)),
    };

    let (north, south) = match compass {
        Compass::N | Compass::NE | Compass::NW => (true, false),
        Compass::S | Compass::SE | Compass::SW => (false, true),
        _ => (false, false),
    };
    let (east, west) = match compass {
        Compass::E | Compass::NE | Compass::SE => (true, false),
        Compass::W | Compass::NW | Compass::SW => (false, true),
        _ => (false, false),
    };

    if north {
        p.top = vertical.clone();
        p.bottom = None;
    }
    if south {
        p.bottom = vertical;
        p.top = None;
    }
    if east {
        p.right = horizontal.clone();
        p.left = None;
    }
    if west {
        p.left = horizontal;
        p.right = None;
    }
    p
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastOptions {
    /// Dwell time in milliseconds, `-1` to persist
    pub length: i64,
    pub background: String,
    pub color: String,
    /// Swap background and text colors
    pub reverse: bool,
    /// Opacity, clamped when shown
    pub alpha: f64,
    pub border_radius: String,
    pub vdist: f64,
    pub hdist: f64,
    pub margin: f64,
    pub theme: String,
    pub position: Compass,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH_MS,
            background: BASE.foreground.to_string(),
            color: BASE.background.to_string(),
            reverse: false,
            alpha: 1.0,
            border_radius: "10px".to_string(),
            vdist: 10.0,
            hdist: 10.0,
            margin: 10.0,
            theme: DEFAULT_THEME.to_string(),
            position: Compass::S,
        }
    }
}

/// Partial toast options, keyed by their JavaScript names
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastPatch {
    #[serde(deserialize_with = "lenient::length")]
    pub length: Option<i64>,
    #[serde(rename = "bgcolor", deserialize_with = "lenient::text")]
    pub background: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(rename = "reverseColor", deserialize_with = "lenient::flag")]
    pub reverse: Option<bool>,
    #[serde(deserialize_with = "lenient::opacity")]
    pub alpha: Option<f64>,
    #[serde(rename = "borderRadius", deserialize_with = "lenient::css_size")]
    pub border_radius: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub vdist: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub hdist: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub margin: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "compass")]
    pub position: Option<Compass>,
}

fn compass<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Compass>, D::Error> {
    Ok(lenient::keyword(d)?.map(|s| Compass::parse(&s)))
}

#[derive(Default)]
pub struct Toast {
    text: String,
    options: ToastOptions,
    /// Opaque background chosen at mount, re-tinted on every show
    background: String,
}

impl Toast {
    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_content(&mut self, text: &str) {
        self.text = sanitize(text);
    }

    pub fn configure(&mut self, theme: &str, patch: ToastPatch) {
        let o = &mut self.options;
        o.theme = theme.to_string();

        let text = |value: Option<String>| value.map(|v| sanitize(&v));
        if let Some(v) = patch.length {
            o.length = v;
        }
        if let Some(v) = text(patch.background) {
            o.background = v;
        }
        if let Some(v) = text(patch.color) {
            o.color = v;
        }
        if let Some(v) = patch.reverse {
            o.reverse = v;
        }
        if let Some(v) = patch.alpha {
            o.alpha = v;
        }
        if let Some(v) = text(patch.border_radius) {
            o.border_radius = v;
        }
        if let Some(v) = patch.vdist {
            o.vdist = v;
        }
        if let Some(v) = patch.hdist {
            o.hdist = v;
        }
        if let Some(v) = patch.margin {
            o.margin = v;
        }
        if let Some(v) = text(patch.theme) {
            o.theme = v;
        }
        if let Some(v) = patch.position {
            o.position = v;
        }
    }

    /// Fade in at the configured opacity
    fn enter<H: Host>(&self, host: &mut H, root: &H::Node) {
        host.flush_style(root);
        let alpha = clamp_opacity(self.options.alpha);
        host.set_style(root, "opacity", Some(&alpha.to_string()));
        let tinted = translucent(host, root, &self.background, alpha);
        host.set_style(root, "background-color", Some(&tinted));
        set_class(host, root, "show-toast", true);
    }
}

impl Widget for Toast {
    const KIND: WidgetKind = WidgetKind::Toast;
    const ROOT_ID: &'static str = ROOT_ID;
    const REENTRY: Reentry = Reentry::Update;
    const EXIT_DELAY_MS: u32 = 2000;

    fn mount<H: Host>(&mut self, host: &mut H, settings: &Settings) -> Result<H::Node, MountError> {
        let body = host.body().ok_or(MountError::NoBody)?;
        let theme = themes::resolve(&self.options.theme);
        let o = &self.options;

        let root = element_with_id(host, "div", ROOT_ID)?;
        let text = child_with_id(host, &root, "p", TEXT_ID)?;
        host.set_inner_html(&text, &self.text);
        host.set_style(&root, "z-index", Some(&settings.z_index().to_string()));

        let (mut background, mut color) = if theme.is_default() {
            (o.background.clone(), o.color.clone())
        } else {
            (theme.background.to_string(), theme.foreground.to_string())
        };
        if o.reverse {
            core::mem::swap(&mut background, &mut color);
        }
        host.set_style(&root, "background-color", Some(&background));
        host.set_style(&root, "color", Some(&color));
        host.set_style(&root, "border-radius", Some(&o.border_radius));

        // Measure with the toast in the document but not yet visible
        host.set_style(&root, "visibility", Some("hidden"));
        host.append_child(&body, &root)?;
        host.set_style(&root, "visibility", None);

        let placement = place(
            o.position,
            o.margin,
            o.vdist,
            o.hdist,
            host.viewport_height(),
            host.client_height(&root),
        );
        host.set_style(&root, "top", placement.top.as_deref());
        host.set_style(&root, "bottom", placement.bottom.as_deref());
        host.set_style(&root, "left", placement.left.as_deref());
        host.set_style(&root, "right", placement.right.as_deref());

        self.background = background;
        self.enter(host, &root);
        Ok(root)
    }

    fn update<H: Host>(&mut self, host: &mut H, root: &H::Node) {
        if let Some(text) = host.query_selector(root, &format!("#{}", TEXT_ID)) {
            host.set_inner_html(&text, &self.text);
        }
        self.enter(host, root);
    }

    fn dwell(&self) -> Option<u32> {
        coerce::dwell_ms(self.options.length)
    }

    fn leave<H: Host>(&mut self, host: &mut H, root: &H::Node) {
        set_class(host, root, "show-toast", false);
        set_class(host, root, "close-toast", true);
        host.set_style(root, "opacity", Some("0"));
    }

    fn theme(&self) -> &str {
        &self.options.theme
    }
}
