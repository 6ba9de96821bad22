//! RFID Serial Session Library
//!
//! This crate owns the serial link to an RFID reader and turns the bytes it
//! delivers into tag identifiers.
//!
//! # Architecture
//!
//! - [`SerialSession`] opens the port and spawns a reader task that owns the
//!   stream. The task pushes [`SessionEvent`]s onto a channel; the owner of
//!   the session pulls them with [`SerialSession::next_event`].
//! - [`NullFilter`] drops `0x00` bytes from every read before an event is
//!   produced.
//! - [`decode_bytes`] strips the reader's line terminator and pipe delimiter
//!   from a chunk, yielding the tag identifier.
//!
//! # Example
//!
//! ```rust,no_run
//! use rfid_session::{decode_bytes, SerialSession, SessionConfig, SessionEvent};
//!
//! # async fn run() -> Result<(), rfid_session::SessionError> {
//! let mut session = SerialSession::open("COM3", &SessionConfig::default())?;
//!
//! while let Some(event) = session.next_event().await {
//!     if let SessionEvent::Data(chunk) = event {
//!         if let Some(tag) = decode_bytes(&chunk) {
//!             println!("Serial: {tag}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod error;
pub mod events;
pub mod framing;
pub mod session;

pub use decoder::{decode_bytes, decode_chunk};
pub use error::SessionError;
pub use events::SessionEvent;
pub use framing::NullFilter;
pub use session::{SerialSession, SessionConfig};
