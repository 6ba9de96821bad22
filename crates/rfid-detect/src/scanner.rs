//! Device scanner
//!
//! This module takes a snapshot of the serial devices attached to the host
//! and renders each one the way the plug-and-play registry describes it.

use serialport::{available_ports, SerialPortType};
use tracing::{debug, info};

use crate::error::DetectError;
use crate::usb_ids;

/// Descriptive record for one attached device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Friendly name with the embedded port, e.g. "USB-SERIAL CH340 (COM3)"
    pub name: String,
    /// Device description (absent for devices that do not report one)
    pub description: Option<String>,
    /// Name of the host the device is attached to
    pub system_host: String,
}

impl DeviceRecord {
    /// Create from serialport crate's port info
    fn from_serialport(port_name: &str, port_type: &SerialPortType, system_host: &str) -> Self {
        let (label, description) = match port_type {
            SerialPortType::UsbPort(usb) => {
                let description = usb
                    .product
                    .clone()
                    .or_else(|| usb_ids::adapter_name(usb.vid).map(str::to_string))
                    .or_else(|| usb.manufacturer.clone());
                let label = usb.product.as_deref().unwrap_or("USB Serial Device");
                (label.to_string(), description)
            }
            SerialPortType::BluetoothPort => ("Bluetooth Serial Port".to_string(), None),
            SerialPortType::PciPort => ("PCI Serial Port".to_string(), None),
            SerialPortType::Unknown => ("Serial Port".to_string(), None),
        };

        Self {
            name: format!("{label} ({port_name})"),
            description,
            system_host: system_host.to_string(),
        }
    }
}

/// Plug-and-play device scanner
#[derive(Debug, Default)]
pub struct DeviceScanner;

impl DeviceScanner {
    /// Create a new scanner
    pub fn new() -> Self {
        Self
    }

    /// Take a snapshot of the attached serial devices
    ///
    /// No filtering happens here. Each call queries the OS again, so the
    /// result reflects the devices attached at call time.
    pub fn scan(&self) -> Result<Vec<DeviceRecord>, DetectError> {
        info!("Enumerating serial devices...");
        let ports = available_ports()?;
        let host = system_host();

        let records: Vec<_> = ports
            .iter()
            .map(|p| DeviceRecord::from_serialport(&p.port_name, &p.port_type, &host))
            .collect();

        info!("Found {} serial device(s) on {}", records.len(), host);
        for record in &records {
            debug!(
                "  {} - {}",
                record.name,
                record.description.as_deref().unwrap_or("<no description>")
            );
        }

        Ok(records)
    }
}

/// Resolve the name of this host
fn system_host() -> String {
    let from_env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    let host = if cfg!(windows) {
        from_env("COMPUTERNAME")
    } else {
        std::fs::read_to_string("/etc/hostname")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| from_env("HOSTNAME"))
    };

    host.unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn usb(vid: u16, manufacturer: Option<&str>, product: Option<&str>) -> SerialPortType {
        SerialPortType::UsbPort(UsbPortInfo {
            vid,
            pid: 0x7523,
            serial_number: None,
            manufacturer: manufacturer.map(str::to_string),
            product: product.map(str::to_string),
        })
    }

    #[test]
    fn test_record_from_usb_with_product() {
        let port_type = usb(0x1A86, Some("wch.cn"), Some("USB-SERIAL CH340"));

        let record = DeviceRecord::from_serialport("COM3", &port_type, "HOST1");

        assert_eq!(record.name, "USB-SERIAL CH340 (COM3)");
        assert_eq!(record.description.as_deref(), Some("USB-SERIAL CH340"));
        assert_eq!(record.system_host, "HOST1");
    }

    #[test]
    fn test_record_from_usb_without_product_uses_vendor() {
        let port_type = usb(0x2341, None, None);

        let record = DeviceRecord::from_serialport("/dev/ttyACM0", &port_type, "bench");

        assert_eq!(record.name, "USB Serial Device (/dev/ttyACM0)");
        assert_eq!(record.description.as_deref(), Some("Arduino"));
    }

    #[test]
    fn test_record_from_usb_unknown_vendor_uses_manufacturer() {
        let port_type = usb(0xBEEF, Some("Acme"), None);

        let record = DeviceRecord::from_serialport("COM9", &port_type, "HOST1");

        assert_eq!(record.description.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_record_from_non_usb_has_no_description() {
        let record = DeviceRecord::from_serialport("COM1", &SerialPortType::PciPort, "HOST1");

        assert_eq!(record.name, "PCI Serial Port (COM1)");
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_system_host_is_never_empty() {
        assert!(!system_host().is_empty());
    }
}
