//! The one-shot spawn window.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::WindowError;

/// Low bit of the state word: spawns are allowed.
const ALLOWED_BIT: u64 = 1;
/// The remaining bits count generations. Every reopen or disarm bumps
/// the generation so that a timer armed for an older one can no longer
/// match the word it expects.
const GENERATION_STEP: u64 = 2;

// ---------------------------------------------------------------------------
// WindowLength
// ---------------------------------------------------------------------------

/// How long the window stays open after the round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLength {
    /// Close automatically after this long.
    Timed(Duration),
    /// Never close automatically.
    Unbounded,
}

impl WindowLength {
    /// Converts the configured seconds value. Negative means unbounded.
    pub fn from_seconds(seconds: i64) -> Self {
        match u64::try_from(seconds) {
            Ok(secs) => Self::Timed(Duration::from_secs(secs)),
            Err(_) => Self::Unbounded,
        }
    }
}

// ---------------------------------------------------------------------------
// SpawnWindow
// ---------------------------------------------------------------------------

/// Gate deciding whether new spawns are permitted.
///
/// The whole state lives in one `AtomicU64`: bit 0 is the allowed flag,
/// the rest is a generation counter. The expiry timer captures the word
/// it was armed against and clears the allowed bit with a single
/// compare-and-swap, so it only succeeds if nothing (reopen, disarm,
/// explicit close) touched the window since arming. Whatever the
/// interleaving, the last successful write wins and a stale timer can
/// never close a fresh round's window.
///
/// ```text
///   open() ──→ [allowed] ──(timer CAS / close())──→ [closed]
///                  ↑                                    │
///                  └────────────── open() ──────────────┘   (next round only)
/// ```
#[derive(Debug)]
pub struct SpawnWindow {
    length: WindowLength,
    state: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
}

impl SpawnWindow {
    /// Creates a closed window with the given length.
    pub fn new(length: WindowLength) -> Self {
        Self {
            length,
            state: Arc::new(AtomicU64::new(0)),
            timer: None,
        }
    }

    /// The configured length.
    pub fn length(&self) -> WindowLength {
        self.length
    }

    /// Changes the length used by the next [`arm`](Self::arm). A timer
    /// that is already running keeps its original deadline.
    pub fn set_length(&mut self, length: WindowLength) {
        self.length = length;
    }

    /// Whether spawns are currently permitted.
    pub fn is_allowed(&self) -> bool {
        self.state.load(Ordering::SeqCst) & ALLOWED_BIT != 0
    }

    /// Whether an expiry timer is pending.
    pub fn is_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Opens the window for a new round. Cancels any pending timer.
    pub fn open(&mut self) {
        self.cancel_timer();
        // Generation first: a stale timer must never see its expected word
        // again once the bit is set.
        self.state.fetch_add(GENERATION_STEP, Ordering::SeqCst);
        self.state.fetch_or(ALLOWED_BIT, Ordering::SeqCst);
        debug!("spawn window opened");
    }

    /// Starts the expiry countdown.
    ///
    /// Returns `Ok(true)` if a timer was armed, `Ok(false)` if the window
    /// is unbounded or already closed.
    ///
    /// # Errors
    /// Returns [`WindowError::NoRuntime`] when called outside a Tokio
    /// runtime. The window then stays open until closed explicitly.
    pub fn arm(&mut self) -> Result<bool, WindowError> {
        self.disarm();

        let WindowLength::Timed(delay) = self.length else {
            debug!("spawn window is unbounded, no timer armed");
            return Ok(false);
        };
        let handle = Handle::try_current().map_err(|_| WindowError::NoRuntime)?;

        let expected = self.state.load(Ordering::SeqCst);
        if expected & ALLOWED_BIT == 0 {
            debug!("spawn window already closed, not arming");
            return Ok(false);
        }

        let state = Arc::clone(&self.state);
        self.timer = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let closed = expected & !ALLOWED_BIT;
            if state
                .compare_exchange(expected, closed, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                info!(after_secs = delay.as_secs(), "spawn window elapsed");
            }
        }));
        debug!(secs = delay.as_secs(), "spawn window timer armed");
        Ok(true)
    }

    /// Cancels a pending timer without firing it. The allowed flag keeps
    /// its current value.
    pub fn disarm(&mut self) {
        self.cancel_timer();
        self.state.fetch_add(GENERATION_STEP, Ordering::SeqCst);
    }

    /// Closes the window now. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        self.cancel_timer();
        let previous = self.state.fetch_and(!ALLOWED_BIT, Ordering::SeqCst);
        let was_open = previous & ALLOWED_BIT != 0;
        if was_open {
            debug!("spawn window closed");
        }
        was_open
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for SpawnWindow {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
