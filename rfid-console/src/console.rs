//! Console status lines
//!
//! Everything the operator reads goes to stdout through these functions.
//! Diagnostic logging goes to stderr through `tracing`.

use rfid_detect::{DetectError, FoundReader};

pub fn banner() {
    println!("Starting RFID identification service");
}

pub fn query_failed(error: &DetectError) {
    println!("Could not query the attached devices: {error}");
}

pub fn not_found() {
    println!("Could not identify the RFID device.");
    println!(
        "Verify that the drivers are installed and the device is correctly connected to the computer."
    );
}

pub fn found(reader: &FoundReader) {
    println!("{}", found_message(reader));
}

fn found_message(reader: &FoundReader) -> String {
    format!("Found RFID reader at {}\n{}", reader.device_name, reader.info)
}

pub fn status(open: bool) {
    println!("Status: {}", if open { "open" } else { "closed" });
}

pub fn open_failed(reason: &str) {
    println!("Status: closed ({reason})");
}

pub fn tag(id: &str) {
    println!("Serial: {id}");
}

pub fn press_enter() {
    println!("Press Enter to exit");
}

pub fn serial_error(message: &str) {
    println!("Serial error: {message}");
}
