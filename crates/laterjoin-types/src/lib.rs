//! Shared domain types for Later Join.
//!
//! - **Identity** ([`ParticipantId`]): who is joining.
//! - **Factions** ([`Team`]) and concrete roles ([`Role`]), with the
//!   numeric team ids used by configuration.
//! - **Errors** ([`TypeError`]): unknown ids, names and prefixes.
//!
//! Every other crate in the workspace builds on these; this crate knows
//! nothing about rounds, timers or the host environment.

mod error;
mod types;

pub use error::TypeError;
pub use types::{ParticipantId, Role, Team};
