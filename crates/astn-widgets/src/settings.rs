//! Notifier-wide settings
//!
//! Current theme, stacking order and icon base path. Widgets read these when
//! they are shown, never at construction time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::int_prefix;
use crate::error::{ConfigError, SettingsError};
use crate::themes::{self, DEFAULT_THEME};

/// Default stacking order for every widget
pub const DEFAULT_Z_INDEX: i32 = 10000;

/// Default directory the bundled icon images are served from
pub const DEFAULT_ICON_BASE: &str = "img/";

/// Settings shared by all widgets of one `Notifier`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    theme: String,
    z_index: i32,
    icon_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            z_index: DEFAULT_Z_INDEX,
            icon_base: DEFAULT_ICON_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON object; missing keys keep their defaults
    ///
    /// # Errors
    /// * `ConfigError::Json` - The input is not a settings object
    /// * `ConfigError::Settings` - The theme is not registered
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        if themes::lookup(&settings.theme).is_none() {
            return Err(SettingsError::UnknownTheme(settings.theme).into());
        }
        Ok(settings)
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Switch the current theme; unknown names are rejected
    pub fn set_theme(&mut self, name: &str) -> Result<(), SettingsError> {
        if themes::lookup(name).is_none() {
            return Err(SettingsError::UnknownTheme(name.to_string()));
        }
        self.theme = name.to_string();
        Ok(())
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Set the stacking order from anything integer-coercible
    ///
    /// Numbers are truncated; strings use their leading integer (`"20px"`
    /// gives 20).
    pub fn set_z_index(&mut self, value: &Value) -> Result<(), SettingsError> {
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(s) => int_prefix(s),
            _ => None,
        };
        match parsed.and_then(|z| i32::try_from(z).ok()) {
            Some(z) => {
                self.z_index = z;
                Ok(())
            }
            None => Err(SettingsError::NotNumeric(value.to_string())),
        }
    }

    pub fn icon_base(&self) -> &str {
        &self.icon_base
    }

    /// Full path of a bundled icon image
    pub fn icon_path(&self, file: &str) -> String {
        format!("{}{}", self.icon_base, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme(), "default");
        assert_eq!(settings.z_index(), 10000);
        assert_eq!(settings.icon_path("a.png"), "img/a.png");
    }

    #[test]
    fn test_set_theme() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set_theme("not-a-real-theme"),
            Err(SettingsError::UnknownTheme("not-a-real-theme".into()))
        );
        assert_eq!(settings.theme(), "default");

        settings.set_theme("dark").unwrap();
        assert_eq!(settings.theme(), "dark");
        assert!(settings.set_theme("").is_err());
        assert_eq!(settings.theme(), "dark");
    }

    #[test]
    fn test_set_z_index() {
        let mut settings = Settings::default();
        settings.set_z_index(&json!(20000)).unwrap();
        assert_eq!(settings.z_index(), 20000);

        settings.set_z_index(&json!("123abc")).unwrap();
        assert_eq!(settings.z_index(), 123);

        settings.set_z_index(&json!(5.7)).unwrap();
        assert_eq!(settings.z_index(), 5);

        assert!(settings.set_z_index(&json!("abc")).is_err());
        assert!(settings.set_z_index(&json!(null)).is_err());
        assert!(settings.set_z_index(&json!(1e12)).is_err());
        assert_eq!(settings.z_index(), 5);
    }

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(r#"{"theme":"info","zIndex":500}"#).unwrap();
        assert_eq!(settings.theme(), "info");
        assert_eq!(settings.z_index(), 500);
        assert_eq!(settings.icon_base(), "img/");

        assert!(matches!(
            Settings::from_json(r#"{"theme":"nope"}"#),
            Err(ConfigError::Settings(SettingsError::UnknownTheme(_)))
        ));
        assert!(matches!(Settings::from_json("[1,2]"), Err(ConfigError::Json(_))));
    }
}
