//! RFID Reader Detection Library
//!
//! This crate locates a serial-attached RFID reader among the host's
//! plug-and-play serial devices. Detection is a two step process:
//!
//! - [`DeviceScanner`] takes a point-in-time snapshot of the attached devices
//! - [`HardwareMatcher`] picks the first device whose name carries a port
//!   marker and whose description names a known reader adapter
//!
//! # Example
//!
//! ```rust,no_run
//! use rfid_detect::{DeviceScanner, HardwareMatcher};
//!
//! let scanner = DeviceScanner::new();
//! let records = scanner.scan().unwrap();
//!
//! match HardwareMatcher::default().find_hardware(records) {
//!     Some(info) => println!("Found reader on {}", info.port_name),
//!     None => println!("No reader attached"),
//! }
//! ```

pub mod error;
pub mod matcher;
pub mod scanner;
pub mod usb_ids;

pub use error::DetectError;
pub use matcher::{FoundReader, HardwareInfo, HardwareMatcher, MatchConfig};
pub use scanner::{DeviceRecord, DeviceScanner};
