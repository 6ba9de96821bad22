//! USB Vendor ID database for serial adapters found on RFID readers
//!
//! Reader boards are usually an Arduino (native USB or a WCH CH340 bridge).
//! When the OS does not report a product string for a port, the vendor ID is
//! the only hint left, so it is mapped back to an adapter family name here.

/// WCH CH340/CH341
pub mod ch340 {
    pub const VID: u16 = 0x1A86;
}

/// Arduino boards with native USB (Uno R3, Mega 2560, Leonardo, ...)
pub mod arduino {
    /// Arduino LLC
    pub const VID: u16 = 0x2341;
    /// Arduino SRL (arduino.org boards)
    pub const VID_SRL: u16 = 0x2A03;
}

/// FTDI (Future Technology Devices International)
pub mod ftdi {
    pub const VID: u16 = 0x0403;
}

/// Silicon Labs CP210x
pub mod cp210x {
    pub const VID: u16 = 0x10C4;
}

/// Prolific PL2303
pub mod prolific {
    pub const VID: u16 = 0x067B;
}

/// Get adapter family name from VID
pub fn adapter_name(vid: u16) -> Option<&'static str> {
    match vid {
        ch340::VID => Some("CH340"),
        arduino::VID | arduino::VID_SRL => Some("Arduino"),
        ftdi::VID => Some("FTDI"),
        cp210x::VID => Some("CP210x"),
        prolific::VID => Some("PL2303"),
        _ => None,
    }
}
