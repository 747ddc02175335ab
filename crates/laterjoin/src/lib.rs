//! # Later Join
//!
//! Late-join and respawn role assignment for round-based game servers.
//!
//! A participant who connects after the round has started, or who is
//! left as a spectator by the host, is given a playable role for a
//! limited time after round start. The role follows a configured team
//! rotation, honours the SCP pool, and adapts to facility hazards.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use laterjoin::prelude::*;
//!
//! # async fn run() -> Result<(), LaterJoinError> {
//! laterjoin::init_tracing();
//! let engine = RoundEngine::new(EngineConfig::from_json_file("laterjoin.json")?);
//! let driver = spawn_driver(engine, RecordingHost::new(), 64);
//!
//! driver.send_event(RoundEvent::WaitingForPlayers).await?;
//! driver.send_event(RoundEvent::RoundStart).await?;
//! let reply = driver
//!     .send_event(RoundEvent::ParticipantJoin { participant: ParticipantId(7) })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod commands;
mod driver;
mod error;

pub use commands::{Command, ConfigSource, Console, DISABLED_REPLY, ENABLED_NEXT_ROUND_REPLY};
pub use driver::{DriverHandle, spawn_driver};
pub use error::{CommandError, LaterJoinError};

pub use laterjoin_round as round;
pub use laterjoin_types as types;
pub use laterjoin_window as window;

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber that writes to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Does nothing
/// if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub mod prelude {
    pub use crate::{
        Command, ConfigSource, Console, DriverHandle, LaterJoinError, spawn_driver,
    };
    pub use laterjoin_round::{
        EngineConfig, EventReply, Host, HostEffect, PickupVerdict, RecordingHost, ReloadState,
        RoundEngine, RoundEvent, RoundEventHandler, RoundPhase, RoundSnapshot, SpawnOutcome,
    };
    pub use laterjoin_types::{ParticipantId, Role, Team};
}
