//! 128-bit property-set and effect identifiers
//!
//! The legacy surface names property sets and effect types by GUID. Every
//! GUID the engine understands is a compile-time constant; dispatch is a
//! `match` over those constants, never a runtime-built lookup table.

use serde::{Deserialize, Serialize};

/// A 128-bit identifier in Windows GUID layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    /// All-zero GUID, used by the legacy surface to mean "no effect".
    pub const NULL: Guid = Guid::new(0, 0, 0, [0; 8]);

    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self { data1, data2, data3, data4 }
    }

    /// Wire size of a GUID in the legacy byte protocol.
    pub const SIZE: usize = 16;

    /// Serialize in the on-wire layout: mixed-endian per the GUID standard
    /// (little-endian words, raw trailing bytes).
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.data1.to_le_bytes());
        out[4..6].copy_from_slice(&self.data2.to_le_bytes());
        out[6..8].copy_from_slice(&self.data3.to_le_bytes());
        out[8..16].copy_from_slice(&self.data4);
        out
    }

    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            data1: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            data2: u16::from_le_bytes([bytes[4], bytes[5]]),
            data3: u16::from_le_bytes([bytes[6], bytes[7]]),
            data4: [
                bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14],
                bytes[15],
            ],
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let guid = Guid::new(
            0xC4D79F1E,
            0xF1AC,
            0x436B,
            [0xA8, 0x1D, 0xA7, 0x38, 0xE7, 0x04, 0x54, 0x69],
        );
        assert_eq!(Guid::from_bytes(&guid.to_bytes()), guid);
    }

    #[test]
    fn null_guid() {
        assert!(Guid::NULL.is_null());
        assert_eq!(Guid::NULL.to_bytes(), [0u8; 16]);
    }

    #[test]
    fn display_format() {
        let guid = Guid::new(
            0x1D4870AD,
            0x0DEF,
            0x43C0,
            [0xA4, 0x0C, 0x52, 0x36, 0x32, 0x29, 0x63, 0x42],
        );
        assert_eq!(guid.to_string(), "1D4870AD-0DEF-43C0-A40C-523632296342");
    }
}
