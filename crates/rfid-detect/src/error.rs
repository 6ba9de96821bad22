//! Error types for RFID reader detection

use thiserror::Error;

/// Errors that can occur during detection
#[derive(Debug, Error)]
pub enum DetectError {
    /// The device registry could not be queried
    #[error("failed to enumerate devices: {0}")]
    EnumerationFailed(String),
}

impl From<serialport::Error> for DetectError {
    fn from(e: serialport::Error) -> Self {
        Self::EnumerationFailed(e.to_string())
    }
}
