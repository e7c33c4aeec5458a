//! Theme registry
//!
//! Fixed color triples keyed by name. `lookup` never falls back; widgets go
//! through `resolve`, which fails closed to the default theme.

/// Name of the fallback theme
pub const DEFAULT_THEME: &str = "default";

/// A named color triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub accent: &'static str,
    /// Second background shade, only the dark theme has one
    pub secondary: Option<&'static str>,
}

impl Theme {
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_THEME
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Secondary shade, or the main background when the theme has none
    pub fn secondary_background(&self) -> &'static str {
        self.secondary.unwrap_or(self.background)
    }
}

/// Palette the widget option defaults are derived from
pub const BASE: Theme = Theme {
    name: DEFAULT_THEME,
    background: "#f2f3f5",
    foreground: "#383d41",
    accent: "#c5c5c5",
    secondary: None,
};

static THEMES: [Theme; 7] = [
    Theme {
        name: "dark",
        background: "#1b1e21",
        foreground: "#f6f8f9",
        accent: "#5f6163",
        secondary: Some("#5f6163"),
    },
    Theme {
        name: "success",
        background: "#9DEFC3",
        foreground: "#2e8957",
        accent: "#00AB6B",
        secondary: None,
    },
    Theme {
        name: "danger",
        background: "#f8d7da",
        foreground: "#d93025",
        accent: "#821c16",
        secondary: None,
    },
    Theme {
        name: "warning",
        background: "#ffeeba",
        foreground: "#856404",
        accent: "#fbc02d",
        secondary: None,
    },
    Theme {
        name: "primary",
        background: "#b8daff",
        foreground: "#004085",
        accent: "#99b2ce",
        secondary: None,
    },
    Theme {
        name: "info",
        background: "#bee5eb",
        foreground: "#0c5460",
        accent: "#02BAF2",
        secondary: None,
    },
    Theme {
        name: DEFAULT_THEME,
        background: "#f2f3f5",
        foreground: "#383d41",
        accent: "#c4c4c4",
        secondary: None,
    },
];

/// Find a theme by exact name
pub fn lookup(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name == name)
}

/// Find a theme by name, falling back to the default theme
pub fn resolve(name: &str) -> &'static Theme {
    match lookup(name) {
        Some(theme) => theme,
        None => {
            log::debug!("[themes] unknown theme {:?}, using {}", name, DEFAULT_THEME);
            default_theme()
        }
    }
}

fn default_theme() -> &'static Theme {
    &THEMES[THEMES.len() - 1]
}
