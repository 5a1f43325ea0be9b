//! Error types for gestured
//!
//! Gesture recognition itself never fails: malformed or sub-threshold
//! gestures are discarded and logged. The errors here belong to the
//! surrounding daemon (configuration, input backends, replay files).

use std::fmt;

/// Main error type for gestured operations
#[derive(Debug, thiserror::Error)]
pub enum GesturedError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No device able to produce gesture or touch events
    #[error("No gesture or touch capable input device found")]
    DeviceNotFound,

    /// A replay line could not be decoded
    #[error("Replay parse error at line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type alias for gestured operations
pub type GesturedResult<T> = Result<T, GesturedError>;

/// Helper for operations that should log errors but not propagate them
pub fn log_error<T, E: fmt::Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(val) => Some(val),
        Err(err) => {
            tracing::error!("Operation failed: {err}");
            None
        }
    }
}
