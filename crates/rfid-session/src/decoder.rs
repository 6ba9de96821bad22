//! Tag decoder
//!
//! Readers print each tag as text followed by `\r\n` or `|`. Every chunk is
//! decoded on its own: a chunk holding either delimiter yields the chunk with
//! all delimiters removed, anything else is dropped. Partial reads are not
//! carried over to the next chunk, so a tag split across two reads is lost
//! or reported in pieces.

use tracing::trace;

/// Line terminator sent after a tag
pub const LINE_TERMINATOR: &str = "\r\n";

/// Alternative tag delimiter
pub const PIPE_DELIMITER: &str = "|";

/// Decode a text chunk into a tag identifier
///
/// Returns `None` when the chunk carries neither delimiter.
pub fn decode_chunk(chunk: &str) -> Option<String> {
    if !chunk.contains(LINE_TERMINATOR) && !chunk.contains(PIPE_DELIMITER) {
        trace!("Dropping undelimited chunk {:?}", chunk);
        return None;
    }

    Some(chunk.replace(LINE_TERMINATOR, "").replace(PIPE_DELIMITER, ""))
}

/// Decode a raw chunk of bytes into a tag identifier
pub fn decode_bytes(data: &[u8]) -> Option<String> {
    decode_chunk(&String::from_utf8_lossy(data))
}
