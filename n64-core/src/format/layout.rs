use serde::Serialize;

use super::codec::normalize;
use crate::error::FormatError;

pub const MAGIC_Z64: [u8; 4] = [0x80, 0x37, 0x12, 0x40];
pub const MAGIC_V64: [u8; 4] = [0x37, 0x80, 0x40, 0x12];
pub const MAGIC_N64: [u8; 4] = [0x40, 0x12, 0x37, 0x80];

/// Byte arrangement of an image on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StorageLayout {
    /// `.z64`, canonical big-endian order.
    #[serde(rename = "z64")]
    Native,
    /// `.v64`, every 16-bit pair swapped.
    #[serde(rename = "v64")]
    ByteSwapped,
    /// `.n64`, every 32-bit word reversed.
    #[serde(rename = "n64")]
    WordSwapped,
}

impl StorageLayout {
    pub const ALL: [StorageLayout; 3] = [
        StorageLayout::Native,
        StorageLayout::ByteSwapped,
        StorageLayout::WordSwapped,
    ];

    /// Match the first four raw bytes of an image against the known magics.
    pub fn detect(magic: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| magic == layout.magic().as_slice())
    }

    pub fn magic(self) -> [u8; 4] {
        match self {
            StorageLayout::Native => MAGIC_Z64,
            StorageLayout::ByteSwapped => MAGIC_V64,
            StorageLayout::WordSwapped => MAGIC_N64,
        }
    }

    /// Width of the byte groups that are reversed on disk.
    pub fn group_size(self) -> usize {
        match self {
            StorageLayout::Native => 1,
            StorageLayout::ByteSwapped => 2,
            StorageLayout::WordSwapped => 4,
        }
    }

    /// Conventional file extension for the layout.
    pub fn extension(self) -> &'static str {
        match self {
            StorageLayout::Native => "z64",
            StorageLayout::ByteSwapped => "v64",
            StorageLayout::WordSwapped => "n64",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StorageLayout::Native => "Z64 (Big-endian, Native)",
            StorageLayout::ByteSwapped => "V64 (Big-endian, byte-swapped)",
            StorageLayout::WordSwapped => "N64 (Little-endian)",
        }
    }

    /// Bring raw on-disk bytes into canonical order.
    ///
    /// `raw` must start on a group boundary and cover whole groups.
    pub fn to_canonical(self, raw: &[u8]) -> Result<Vec<u8>, FormatError> {
        match self {
            StorageLayout::Native => Ok(raw.to_vec()),
            _ => normalize(raw, self.group_size()),
        }
    }
}
