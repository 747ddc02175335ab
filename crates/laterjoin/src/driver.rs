//! Round driver: a Tokio task that owns the engine and the host.
//!
//! Host events and console commands reach the engine through an mpsc
//! channel, one at a time, so the engine is never touched from two places
//! at once. Callers that need an answer pass a oneshot reply channel.

use laterjoin_round::{
    EngineConfig, EventReply, Host, ReloadState, RoundEngine, RoundEvent, RoundSnapshot,
};
use tokio::sync::{mpsc, oneshot};

use crate::LaterJoinError;

/// Commands sent to the driver through its channel.
pub(crate) enum DriverCommand<H: Host> {
    /// Deliver a host event to the engine.
    Event {
        event: RoundEvent,
        reply: oneshot::Sender<EventReply>,
    },

    DisableNow {
        reply: oneshot::Sender<()>,
    },

    EnableNextRound {
        reply: oneshot::Sender<()>,
    },

    /// Replace the engine's configuration.
    Reload {
        config: Box<EngineConfig>,
        reply: oneshot::Sender<ReloadState>,
    },

    Snapshot {
        reply: oneshot::Sender<RoundSnapshot>,
    },

    /// Stop the driver and hand the host back.
    Shutdown {
        reply: oneshot::Sender<H>,
    },
}

/// Handle to a running driver. Used to send events and commands to it.
///
/// Cheap to clone; it only wraps an `mpsc::Sender`.
pub struct DriverHandle<H: Host> {
    sender: mpsc::Sender<DriverCommand<H>>,
}

impl<H: Host> Clone for DriverHandle<H> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<H: Host> DriverHandle<H> {
    /// Delivers a host event and waits for the engine's reply.
    pub async fn send_event(&self, event: RoundEvent) -> Result<EventReply, LaterJoinError> {
        self.request(|reply| DriverCommand::Event { event, reply }).await
    }

    pub async fn disable_now(&self) -> Result<(), LaterJoinError> {
        self.request(|reply| DriverCommand::DisableNow { reply }).await
    }

    pub async fn enable_next_round(&self) -> Result<(), LaterJoinError> {
        self.request(|reply| DriverCommand::EnableNextRound { reply }).await
    }

    /// Replaces the engine's configuration and reports whether the engine
    /// is now disabled.
    pub async fn reload(&self, config: EngineConfig) -> Result<ReloadState, LaterJoinError> {
        let config = Box::new(config);
        self.request(|reply| DriverCommand::Reload { config, reply }).await
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot, LaterJoinError> {
        self.request(|reply| DriverCommand::Snapshot { reply }).await
    }

    /// Stops the driver and returns the host it owned.
    ///
    /// Commands queued before the shutdown are processed first.
    pub async fn shutdown(&self) -> Result<H, LaterJoinError> {
        self.request(|reply| DriverCommand::Shutdown { reply }).await
    }

    /// Returns `true` while the driver task is accepting commands.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> DriverCommand<H>,
    ) -> Result<T, LaterJoinError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| LaterJoinError::DriverUnavailable)?;
        reply_rx.await.map_err(|_| LaterJoinError::DriverUnavailable)
    }
}

/// The internal driver state. Runs inside a Tokio task.
struct Driver<H: Host> {
    engine: RoundEngine,
    host: H,
    receiver: mpsc::Receiver<DriverCommand<H>>,
}

impl<H: Host> Driver<H> {
    async fn run(mut self) {
        tracing::info!("round driver started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                DriverCommand::Event { event, reply } => {
                    tracing::trace!(?event, "dispatching event");
                    let result = event.dispatch(&mut self.engine, &mut self.host);
                    let _ = reply.send(result);
                }
                DriverCommand::DisableNow { reply } => {
                    self.engine.disable_now();
                    let _ = reply.send(());
                }
                DriverCommand::EnableNextRound { reply } => {
                    self.engine.enable_next_round();
                    let _ = reply.send(());
                }
                DriverCommand::Reload { config, reply } => {
                    let _ = reply.send(self.engine.reload(*config));
                }
                DriverCommand::Snapshot { reply } => {
                    let _ = reply.send(self.engine.snapshot());
                }
                DriverCommand::Shutdown { reply } => {
                    tracing::info!("round driver shutting down");
                    let _ = reply.send(self.host);
                    return;
                }
            }
        }

        tracing::info!("round driver stopped");
    }
}

/// Spawns a driver task that owns `engine` and `host`, returning a handle
/// to it.
///
/// `channel_size` bounds the command queue; senders wait when it is full.
///
/// # Panics
/// Panics if called outside a Tokio runtime.
pub fn spawn_driver<H: Host>(engine: RoundEngine, host: H, channel_size: usize) -> DriverHandle<H> {
    let (tx, rx) = mpsc::channel(channel_size);

    let driver = Driver {
        engine,
        host,
        receiver: rx,
    };

    tokio::spawn(driver.run());

    DriverHandle { sender: tx }
}
