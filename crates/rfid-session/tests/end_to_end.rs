//! End-to-end tests for the reader pipeline
//!
//! These tests drive the whole path a tag takes through the utility:
//! - device records are matched to a reader port
//! - a session over an in-memory stream delivers the reader's output
//! - the decoder turns each chunk into a tag identifier

use rfid_detect::{DeviceRecord, HardwareInfo, HardwareMatcher};
use rfid_session::{decode_bytes, SerialSession, SessionConfig, SessionEvent};
use tokio::io::AsyncWriteExt;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    pub fn record(name: &str, description: Option<&str>, host: &str) -> DeviceRecord {
        DeviceRecord {
            name: name.to_string(),
            description: description.map(str::to_string),
            system_host: host.to_string(),
        }
    }

    /// Pull events until the next decoded tag (or the session ends)
    pub async fn next_tag(session: &mut SerialSession) -> Option<String> {
        while let Some(event) = session.next_event().await {
            match event {
                SessionEvent::Data(chunk) => {
                    if let Some(tag) = decode_bytes(&chunk) {
                        return Some(tag);
                    }
                }
                SessionEvent::Error(_) => {}
                SessionEvent::Closed => return None,
            }
        }
        None
    }
}

#[tokio::test]
async fn ch340_reader_delivers_tag() {
    let records = vec![helpers::record(
        "USB Serial (COM3)",
        Some("USB-SERIAL CH340"),
        "HOST1",
    )];

    let info = HardwareMatcher::default().find_hardware(records).unwrap();
    assert_eq!(
        info,
        HardwareInfo {
            port_name: "COM3".to_string(),
            description: "USB-SERIAL CH340".to_string(),
            system_host: "HOST1".to_string(),
        }
    );

    let (mut wire, port) = tokio::io::duplex(256);
    let mut session = SerialSession::from_stream(&info.port_name, port, &SessionConfig::default());
    assert_eq!(session.port_name(), "COM3");

    wire.write_all(b"TAG123|").await.unwrap();

    assert_eq!(helpers::next_tag(&mut session).await.as_deref(), Some("TAG123"));
}

#[tokio::test]
async fn null_padding_never_reaches_tag() {
    let (mut wire, port) = tokio::io::duplex(256);
    let mut session = SerialSession::from_stream("COM3", port, &SessionConfig::default());

    wire.write_all(b"\x00\x00A1B2\x00C3\r\n").await.unwrap();

    let tag = helpers::next_tag(&mut session).await.unwrap();
    assert_eq!(tag, "A1B2C3");
    assert!(!tag.contains('\0'));
}

#[tokio::test]
async fn undelimited_chunk_is_dropped() {
    let (mut wire, port) = tokio::io::duplex(256);
    let mut session = SerialSession::from_stream("COM3", port, &SessionConfig::default());

    wire.write_all(b"A1B2C3").await.unwrap();
    // Make sure the first chunk is read on its own before the next write
    match session.next_event().await {
        Some(SessionEvent::Data(chunk)) => assert_eq!(decode_bytes(&chunk), None),
        other => panic!("unexpected event {other:?}"),
    }

    wire.write_all(b"D4E5|").await.unwrap();
    drop(wire);

    assert_eq!(helpers::next_tag(&mut session).await.as_deref(), Some("D4E5"));
    assert_eq!(helpers::next_tag(&mut session).await, None);
}

#[test]
fn no_reader_attached() {
    let records = vec![
        helpers::record("Communications Port (COM1)", Some("Communications Port"), "HOST1"),
        helpers::record("Arduino Uno", Some("Arduino Uno"), "HOST1"),
        helpers::record("USB-SERIAL CH340 (COM3)", None, "HOST1"),
    ];

    assert_eq!(HardwareMatcher::default().find_hardware(records), None);
}
