//! Unified error type for Later Join.

use laterjoin_round::{ConfigError, RoundError};
use laterjoin_types::TypeError;
use laterjoin_window::WindowError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum LaterJoinError {
    /// A team or role could not be parsed.
    #[error(transparent)]
    Types(#[from] TypeError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Round(#[from] RoundError),

    /// The spawn window timer could not be armed.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// A console command could not be parsed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The driver task has stopped and no longer accepts commands.
    #[error("round driver is not running")]
    DriverUnavailable,
}

/// Errors from parsing console commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0:?}")]
    Unknown(String),

    #[error("empty command")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_type_error() {
        let err = TypeError::UnknownTeam(9);
        let err: LaterJoinError = err.into();
        assert!(matches!(err, LaterJoinError::Types(_)));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_from_config_error() {
        let err = ConfigError::UnknownRolePrefix("scp999".into());
        let err: LaterJoinError = err.into();
        assert!(matches!(err, LaterJoinError::Config(_)));
        assert!(err.to_string().contains("scp999"));
    }

    #[test]
    fn test_from_window_error() {
        let err: LaterJoinError = WindowError::NoRuntime.into();
        assert!(matches!(err, LaterJoinError::Window(_)));
    }

    #[test]
    fn test_from_command_error() {
        let err: LaterJoinError = CommandError::Unknown("sf_lj_dance".into()).into();
        assert!(matches!(err, LaterJoinError::Command(_)));
        assert!(err.to_string().contains("sf_lj_dance"));
    }
}
