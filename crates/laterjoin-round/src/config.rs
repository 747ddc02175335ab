//! Engine configuration.

use std::collections::BTreeMap;
use std::path::Path;

use laterjoin_types::{Role, Team};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::ConfigError;

const DISABLE_SUFFIX: &str = "_disable";
const AMOUNT_SUFFIX: &str = "_amount";

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for the later-join engine.
///
/// Loaded from a flat JSON object. Every field has a default, so an empty
/// object `{}` is a valid configuration. Keys that are not named fields
/// land in [`roles`](Self::roles) and are read as per-role entries:
///
/// ```json
/// { "spawn_window_seconds": 90, "scp096_disable": true, "scp173_amount": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds after round start during which late joiners still spawn.
    /// Negative means the window never closes on its own.
    pub spawn_window_seconds: i64,

    /// Resolve roles for participants the host parks as spectators
    /// before the round starts.
    pub explore_before_round: bool,

    /// Use the randomised "smart" rotation instead of the fixed queue.
    pub smart_team_picker: bool,

    /// Team id handed out once the respawn queue is exhausted.
    pub filler_team_id: i64,

    /// One team id per character, consumed in order.
    pub team_respawn_queue: String,

    /// Master kill switch.
    pub disabled: bool,

    /// Door locked through the host while the round has not started.
    pub exploit_door: String,

    /// Fixed RNG seed. `None` seeds from the OS.
    pub rng_seed: Option<u64>,

    /// `<prefix>_disable` and `<prefix>_amount` role entries.
    #[serde(flatten)]
    pub roles: BTreeMap<String, Value>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn_window_seconds: 120,
            explore_before_round: false,
            smart_team_picker: false,
            filler_team_id: i64::from(Team::ClassD.id()),
            team_respawn_queue: "4014314031441404134040143".to_string(),
            disabled: false,
            exploit_door: "106_PRIMARY".to_string(),
            rng_seed: None,
            roles: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the document is malformed or a
    /// named field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Sets a role entry, e.g. `with_role_entry("scp096_disable", true)`.
    pub fn with_role_entry(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.roles.insert(key.to_string(), value.into());
        self
    }

    /// The filler team, or `None` if the configured id names no team.
    pub fn filler_team(&self) -> Option<Team> {
        Team::from_id(self.filler_team_id)
    }

    /// Checks every role entry and returns the problems found.
    ///
    /// Entries listed here are ignored by [`scp_roster`](Self::scp_roster).
    pub fn role_entry_errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (key, value) in &self.roles {
            let (prefix, expected) = if let Some(prefix) = key.strip_suffix(DISABLE_SUFFIX) {
                (prefix, value.is_boolean().then_some(()).ok_or("a boolean"))
            } else if let Some(prefix) = key.strip_suffix(AMOUNT_SUFFIX) {
                (prefix, value.is_i64().then_some(()).ok_or("an integer"))
            } else {
                errors.push(ConfigError::UnknownKey(key.clone()));
                continue;
            };

            if Role::from_config_prefix(prefix).is_err() {
                errors.push(ConfigError::UnknownRolePrefix(key.clone()));
            } else if let Err(expected) = expected {
                errors.push(ConfigError::InvalidValue {
                    key: key.clone(),
                    expected,
                });
            }
        }
        errors
    }

    /// The SCP roles enabled for a round, each repeated by its amount.
    ///
    /// Roles appear in [`Role::SCPS`] order. A role is skipped when its
    /// `_disable` entry is `true`; its `_amount` defaults to 1 and
    /// negative amounts count as 0.
    pub fn scp_roster(&self) -> Vec<Role> {
        let mut roster = Vec::new();
        for role in Role::SCPS {
            let Some(prefix) = role.config_prefix() else {
                continue;
            };
            let disabled = self
                .roles
                .get(&format!("{prefix}{DISABLE_SUFFIX}"))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if disabled {
                continue;
            }

            let amount = self
                .roles
                .get(&format!("{prefix}{AMOUNT_SUFFIX}"))
                .and_then(Value::as_i64)
                .unwrap_or(1);
            if amount < 0 {
                warn!(prefix, amount, "negative role amount, treating as 0");
            }
            let amount = usize::try_from(amount).unwrap_or(0);
            roster.extend(std::iter::repeat_n(role, amount));
        }
        roster
    }
}
