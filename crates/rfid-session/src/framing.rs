//! Transport framing applied before data reaches the decoder

/// Drops null bytes from raw reads
///
/// Some reader firmware pads its output with `0x00`. With the filter
/// enabled those bytes never reach a [`SessionEvent::Data`](crate::SessionEvent::Data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullFilter {
    enabled: bool,
}

impl NullFilter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Apply the filter to one raw read
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        if self.enabled {
            data.iter().copied().filter(|&b| b != 0).collect()
        } else {
            data.to_vec()
        }
    }
}

impl Default for NullFilter {
    fn default() -> Self {
        Self::new(true)
    }
}
