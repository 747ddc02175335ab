//! Error types for the window layer.

/// Errors that can occur while arming the spawn window.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// The expiry timer needs a Tokio runtime to run on and none was
    /// available on the calling thread.
    #[error("cannot arm spawn window timer outside a Tokio runtime")]
    NoRuntime,
}
