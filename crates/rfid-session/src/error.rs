//! Error types for the serial session

use thiserror::Error;

/// Errors that can occur while establishing a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The port is missing, already claimed, or access was denied
    #[error("port {port} is unavailable: {reason}")]
    PortUnavailable { port: String, reason: String },
}

impl SessionError {
    pub(crate) fn unavailable(port: &str, e: impl std::fmt::Display) -> Self {
        Self::PortUnavailable {
            port: port.to_string(),
            reason: e.to_string(),
        }
    }
}
