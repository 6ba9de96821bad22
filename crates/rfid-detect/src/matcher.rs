//! Port matcher
//!
//! Picks the RFID reader out of a device scan. A device qualifies when its
//! name embeds a parenthesized port (e.g. `(COM3)`) and its description
//! contains one of the configured hardware identifiers. The first qualifying
//! device in scan order wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scanner::DeviceRecord;

/// Matching rules for reader hardware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Substrings marking the start of an embedded port identifier
    pub port_markers: Vec<String>,
    /// Substrings of a device description that identify reader hardware
    pub hardware_ids: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            port_markers: vec![
                // Windows COM ports, e.g. "USB-SERIAL CH340 (COM3)"
                "(COM".to_string(),
                // Unix device paths, e.g. "Arduino Uno (/dev/ttyACM0)"
                "(/dev/".to_string(),
            ],
            hardware_ids: vec!["CH340".to_string(), "Arduino".to_string()],
        }
    }
}

/// The reader that was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareInfo {
    /// Port identifier to open, e.g. "COM3"
    pub port_name: String,
    /// Device description
    pub description: String,
    /// Host the reader is attached to
    pub system_host: String,
}

impl fmt::Display for HardwareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " SystemName: {}", self.system_host)?;
        writeln!(f, " Description: {}", self.description)?;
        write!(f, " PortName: {}", self.port_name)
    }
}

/// A matched reader together with the device name it was found under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReader {
    /// Full device name, e.g. "USB-SERIAL CH340 (COM3)"
    pub device_name: String,
    /// Details extracted from the matching record
    pub info: HardwareInfo,
}

/// Matches scanned devices against the configured reader hardware
#[derive(Debug, Clone, Default)]
pub struct HardwareMatcher {
    config: MatchConfig,
}

impl HardwareMatcher {
    /// Create a matcher with custom configuration
    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Find the first device that looks like an RFID reader
    ///
    /// Records are consumed in order and inspection stops at the first match.
    pub fn find_hardware<I>(&self, records: I) -> Option<HardwareInfo>
    where
        I: IntoIterator<Item = DeviceRecord>,
    {
        self.find_reader(records).map(|found| found.info)
    }

    /// Like [`find_hardware`](Self::find_hardware), keeping the device name
    pub fn find_reader<I>(&self, records: I) -> Option<FoundReader>
    where
        I: IntoIterator<Item = DeviceRecord>,
    {
        let found = records.into_iter().find_map(|record| self.match_record(record));

        if found.is_none() {
            info!("No device matched {:?}", self.config.hardware_ids);
        }

        found
    }

    /// Check a single record, returning the hardware info if it qualifies
    fn match_record(&self, record: DeviceRecord) -> Option<FoundReader> {
        let description = record.description?;

        if !self
            .config
            .hardware_ids
            .iter()
            .any(|id| description.contains(id.as_str()))
        {
            return None;
        }

        let port_name = self
            .config
            .port_markers
            .iter()
            .find_map(|marker| extract_port_name(&record.name, marker))?;

        info!("Found RFID reader at {}", record.name);

        Some(FoundReader {
            device_name: record.name,
            info: HardwareInfo {
                port_name,
                description,
                system_host: record.system_host,
            },
        })
    }
}

/// Extract the port identifier embedded in a device name
///
/// Takes the text from `marker` through the next `)` and strips the
/// parentheses: `"Arduino Uno (COM5)"` with marker `"(COM"` gives `"COM5"`.
pub fn extract_port_name(name: &str, marker: &str) -> Option<String> {
    let start = name.find(marker)?;
    let tail = &name[start..];
    let end = tail.find(')').map_or(tail.len(), |i| i + 1);

    let port: String = tail[..end].chars().filter(|&c| c != '(' && c != ')').collect();
    (!port.is_empty()).then_some(port)
}
