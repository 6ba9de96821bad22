//! Events delivered by a serial session
//!
//! The reader task reports everything that happens on the port through a
//! single event channel, in arrival order.

/// Activity on an open serial session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Bytes arrived on the wire (null bytes already discarded)
    Data(Vec<u8>),

    /// A read failed; the session stays open
    Error(String),

    /// The port went away or reached end of stream; no more events follow
    Closed,
}
