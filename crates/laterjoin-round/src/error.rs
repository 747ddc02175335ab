//! Error types for the round layer.

use laterjoin_window::WindowError;

/// Errors found while loading or interpreting configuration.
///
/// Role-entry errors ([`UnknownRolePrefix`](Self::UnknownRolePrefix),
/// [`UnknownKey`](Self::UnknownKey), [`InvalidValue`](Self::InvalidValue))
/// are reported and skipped; they never stop the engine from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for [`EngineConfig`](crate::EngineConfig).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A `<prefix>_disable` / `<prefix>_amount` key whose prefix names no
    /// SCP role.
    #[error("unknown role prefix in configuration key {0}")]
    UnknownRolePrefix(String),

    /// A key that is neither a known setting nor a role entry.
    #[error("unknown configuration key {0}")]
    UnknownKey(String),

    /// A role entry holding the wrong kind of value.
    #[error("configuration key {key} must be {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

/// Errors that can occur while driving a round.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The spawn window timer could not be armed.
    #[error(transparent)]
    Window(#[from] WindowError),
}
