//! CSS color parsing for translucent backgrounds

use astn_host::Host;

use crate::dom::clamp_opacity;

/// An sRGB color with alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(...)`, `rgba(...)` or a few named colors
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = input.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_functional(args);
        }

        match lower.as_str() {
            "white" => Some(Self::rgb(255, 255, 255)),
            "black" => Some(Self::rgb(0, 0, 0)),
            "transparent" => Some(Self { a: 0.0, ..Self::rgb(0, 0, 0) }),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }

    fn parse_functional(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let value: f64 = s.parse().ok()?;
            Some(value.round().clamp(0.0, 255.0) as u8)
        };
        let a = match parts.get(3) {
            Some(alpha) => alpha.parse::<f64>().ok()?,
            None => 1.0,
        };
        Some(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: clamp_opacity(a),
        })
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: clamp_opacity(alpha),
            ..self
        }
    }

    /// `rgba(r, g, b, a)` notation
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Background value for `color` at `alpha` opacity
///
/// Colors that cannot be parsed here are read back from the element's
/// computed style; if that fails too the color is used as given.
pub fn translucent<H: Host>(host: &H, node: &H::Node, color: &str, alpha: f64) -> String {
    let parsed = Rgba::parse(color).or_else(|| {
        host.computed_style(node, "background-color")
            .and_then(|computed| Rgba::parse(&computed))
    });
    match parsed {
        Some(rgba) => rgba.with_alpha(alpha).to_css(),
        None => {
            log::debug!("[color] cannot parse {:?}, keeping it opaque", color);
            color.to_string()
        }
    }
}
