//! Spawn window and round clock for Later Join.
//!
//! - [`SpawnWindow`] is the one-shot gate deciding whether late joiners
//!   still receive a role. It closes on its own after a configured delay,
//!   or when told to.
//! - [`RoundClock`] measures how long the current round has been running.
//!
//! # Threading
//!
//! Everything here is driven from the engine's single event thread except
//! the window's expiry timer, which runs as a separate Tokio task. The
//! timer and the event thread only ever meet on one atomic word, see
//! [`SpawnWindow`].

mod clock;
mod error;
mod window;

pub use clock::RoundClock;
pub use error::WindowError;
pub use window::{SpawnWindow, WindowLength};
