//! Round lifecycle and role assignment for Later Join.
//!
//! Decides, within one round, whether a late or respawning participant
//! receives a playable role, which one, and until when.
//!
//! # Key types
//!
//! - [`RoundEngine`]: owns all per-round state and implements
//!   [`RoundEventHandler`]
//! - [`RoundEvent`]: the events a host raises, routed with
//!   [`RoundEvent::dispatch`]
//! - [`Host`]: the side effects the engine asks the host to perform
//! - [`EngineConfig`]: settings, loaded from JSON
//! - [`TeamPicker`], [`RolePool`], [`SpawnLedger`], [`HazardState`]:
//!   the pieces [`RoleAssigner`] composes to resolve a role
//!
//! # Flow
//!
//! ```text
//! host event ──→ RoundEvent::dispatch ──→ RoundEngine
//!                                           │  lifecycle: reset / arm / close
//!                                           │  join:  window? ledger? RoleAssigner
//!                                           ▼
//!                                   Host::change_role
//! ```

mod assigner;
mod config;
mod engine;
mod error;
mod events;
mod hazard;
mod host;
mod ledger;
mod lifecycle;
mod pool;
mod rotation;

pub use assigner::{MAX_ATTEMPTS, Resolution, RoleAssigner, role_for_team};
pub use config::EngineConfig;
pub use engine::{ReloadState, RoundEngine, RoundSnapshot};
pub use error::{ConfigError, RoundError};
pub use events::{EventReply, PickupVerdict, RoundEvent, RoundEventHandler, SpawnOutcome};
pub use hazard::{HazardState, adjust_role};
pub use host::{Host, HostEffect, RecordingHost};
pub use ledger::SpawnLedger;
pub use lifecycle::{ROUND_GRACE, RoundLifecycle, RoundPhase};
pub use pool::RolePool;
pub use rotation::{RespawnQueue, SMART_BIAS, TeamPicker};
