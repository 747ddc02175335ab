//! Operator console commands.
//!
//! ```text
//! disable-now          (sf_lj_disable)  off immediately
//! enable-next-round    (sf_lj_enable)   on from the next round
//! reload-from-config   (sf_lj_reload)   re-read the configuration
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use laterjoin_round::{ConfigError, EngineConfig, Host, ReloadState};
use tracing::info;

use crate::{CommandError, DriverHandle, LaterJoinError};

pub const DISABLED_REPLY: &str = "Later join is disabled.";
pub const ENABLED_NEXT_ROUND_REPLY: &str = "Later join will be enabled from next round.";

/// An operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    DisableNow,
    EnableNextRound,
    ReloadFromConfig,
}

impl Command {
    pub const ALL: [Command; 3] = [Self::DisableNow, Self::EnableNextRound, Self::ReloadFromConfig];

    pub fn name(self) -> &'static str {
        match self {
            Self::DisableNow => "disable-now",
            Self::EnableNextRound => "enable-next-round",
            Self::ReloadFromConfig => "reload-from-config",
        }
    }

    /// The legacy console alias.
    pub fn alias(self) -> &'static str {
        match self {
            Self::DisableNow => "sf_lj_disable",
            Self::EnableNextRound => "sf_lj_enable",
            Self::ReloadFromConfig => "sf_lj_reload",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parses the first word of `s`, case-insensitively. Trailing
    /// arguments are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.split_whitespace().next().ok_or(CommandError::Empty)?;
        Self::ALL
            .into_iter()
            .find(|cmd| word.eq_ignore_ascii_case(cmd.name()) || word.eq_ignore_ascii_case(cmd.alias()))
            .ok_or_else(|| CommandError::Unknown(word.to_string()))
    }
}

/// Where `reload-from-config` reads its configuration from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Inline(EngineConfig),
}

impl ConfigSource {
    /// Loads the configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        match self {
            Self::File(path) => EngineConfig::from_json_file(path),
            Self::Inline(config) => Ok(config.clone()),
        }
    }
}

/// Executes console commands against a running driver.
pub struct Console<H: Host> {
    driver: DriverHandle<H>,
    source: ConfigSource,
}

impl<H: Host> Console<H> {
    pub fn new(driver: DriverHandle<H>, source: ConfigSource) -> Self {
        Self { driver, source }
    }

    /// Parses and executes one console line, returning the reply text.
    pub async fn execute_line(&self, line: &str) -> Result<String, LaterJoinError> {
        let command = line.parse::<Command>()?;
        self.execute(command).await
    }

    /// Executes `command`, returning the reply text.
    pub async fn execute(&self, command: Command) -> Result<String, LaterJoinError> {
        info!(%command, "console command");
        match command {
            Command::DisableNow => {
                self.driver.disable_now().await?;
                Ok(DISABLED_REPLY.to_string())
            }
            Command::EnableNextRound => {
                self.driver.enable_next_round().await?;
                Ok(ENABLED_NEXT_ROUND_REPLY.to_string())
            }
            Command::ReloadFromConfig => {
                let config = self.source.load()?;
                let state = match self.driver.reload(config).await? {
                    ReloadState::DisabledNow => "disabled immediately",
                    ReloadState::EnabledNextRound => "enabled after this round ends",
                };
                Ok(format!("Later join state has been reloaded. It is now: {state}."))
            }
        }
    }
}
