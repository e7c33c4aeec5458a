//! Error Types for ast-notif widgets
//!
//! None of these reach callers of the `Notifier` facade: the facade logs
//! them and carries on.

use astn_host::HostError;

/// Rejected settings changes
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Theme name is not in the registry
    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    /// Stacking order value has no integer prefix
    #[error("z-index is not numeric: {0}")]
    NotNumeric(String),
}

/// Failures while building a widget subtree
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// The host rejected an element operation
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// There is no body to attach to
    #[error("document has no body")]
    NoBody,
}

/// Failures while loading settings from JSON
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input is not valid settings JSON
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings name a theme that does not exist
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
