//! Error types shared across the TrailPass crates.

/// Top-level error type for TrailPass.
#[derive(Debug, thiserror::Error)]
pub enum TrailPassError {
    /// Configuration load/save error.
    #[error("config error: {0}")]
    Config(String),

    /// Event store error (e.g. transaction id generation exhausted).
    #[error("store error: {0}")]
    Store(String),

    /// Scheduler error.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TrailPassError>;
