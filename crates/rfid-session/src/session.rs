//! Serial session
//!
//! A session owns one open serial port. Opening it spawns a reader task that
//! holds the stream for the rest of the session and reports what arrives as
//! [`SessionEvent`]s. Nothing is shared with the task apart from the event
//! channel.

use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::framing::NullFilter;

/// Events buffered between the reader task and the session owner
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Pause after a failed read before trying again
const ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Serial session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Baud rate of the reader
    pub baud_rate: u32,
    /// Drop null bytes before they reach the decoder
    pub discard_null: bool,
    /// Size of the read buffer (largest chunk delivered in one event)
    pub read_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            discard_null: true,
            read_buffer_size: 1024,
        }
    }
}

/// An open serial connection to the reader
pub struct SerialSession {
    port_name: String,
    events: mpsc::Receiver<SessionEvent>,
    reader: JoinHandle<()>,
}

impl SerialSession {
    /// Open the named port and start delivering events
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(port_name: &str, config: &SessionConfig) -> Result<Self, SessionError> {
        info!("Opening {} @ {} baud", port_name, config.baud_rate);

        let stream = tokio_serial::new(port_name, config.baud_rate)
            .timeout(Duration::from_millis(100))
            .open_native_async()
            .map_err(|e| SessionError::unavailable(port_name, e))?;

        info!("Session open on {}", port_name);
        Ok(Self::from_stream(port_name, stream, config))
    }

    /// Run a session over an already open stream
    pub fn from_stream<S>(port_name: &str, stream: S, config: &SessionConfig) -> Self
    where
        S: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, events) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let reader = tokio::spawn(run_reader(
            port_name.to_string(),
            stream,
            NullFilter::new(config.discard_null),
            config.read_buffer_size.max(1),
            tx,
        ));

        Self {
            port_name: port_name.to_string(),
            events,
            reader,
        }
    }

    /// Port this session was opened on
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Whether the reader task is still attached to the port
    pub fn is_open(&self) -> bool {
        !self.reader.is_finished()
    }

    /// Wait for the next event
    ///
    /// Returns `None` once the reader task has finished and every event has
    /// been consumed.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Stop the reader task and release the port
    pub fn close(self) {
        info!("Closing session on {}", self.port_name);
        self.reader.abort();
    }
}

impl Drop for SerialSession {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Reader task: read whatever is buffered, filter it, and forward it
async fn run_reader<S>(
    port_name: String,
    mut stream: S,
    filter: NullFilter,
    buffer_size: usize,
    tx: mpsc::Sender<SessionEvent>,
) where
    S: AsyncRead + Unpin,
{
    debug!("Reader task started on {}", port_name);
    let mut buffer = vec![0u8; buffer_size];

    loop {
        match stream.read(&mut buffer).await {
            Ok(0) => {
                info!("{} reached end of stream", port_name);
                break;
            }
            Ok(n) => {
                let data = filter.apply(&buffer[..n]);
                if data.is_empty() {
                    continue;
                }
                debug!("Read {} bytes from {}: {:02X?}", data.len(), port_name, data);
                if tx.send(SessionEvent::Data(data)).await.is_err() {
                    return;
                }
            }
            Err(e) if is_transient(&e) => {}
            Err(e) => {
                warn!("Read error on {}: {}", port_name, e);
                if tx.send(SessionEvent::Error(e.to_string())).await.is_err() {
                    return;
                }
                if is_disconnect(&e) {
                    break;
                }
                tokio::time::sleep(ERROR_BACKOFF).await;
            }
        }
    }

    let _ = tx.send(SessionEvent::Closed).await;
    debug!("Reader task ended on {}", port_name);
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

fn is_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}
