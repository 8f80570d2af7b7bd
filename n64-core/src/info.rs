use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::format::StorageLayout;
use crate::tables::{Cic, Lookup, MediaFormat, Region};
use crate::util::{format_file_size, format_hex};

/// Every header field of one image, ready for serialization or display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RomInfo {
    pub title: String,
    pub rom_id: String,
    pub version: u8,
    pub file_format: StorageLayout,
    pub file_size: u64,
    pub file_path: PathBuf,
    pub file_name: String,
    pub region: Lookup<Region, char>,
    pub media_format: Lookup<MediaFormat, char>,
    pub cic: Lookup<Cic, u32>,
    #[serde(serialize_with = "serialize_hex")]
    pub crc1: u32,
    #[serde(serialize_with = "serialize_hex")]
    pub crc2: u32,
}

fn serialize_hex<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hex(*value, ""))
}

impl fmt::Display for RomInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title:        {}", self.title)?;
        writeln!(f, "File format:  {}", self.file_format.description())?;
        writeln!(f, "File size:    {}", format_file_size(self.file_size))?;
        writeln!(f, "ROM ID:       {}", self.rom_id)?;
        match self.media_format {
            Lookup::Known(media) => writeln!(f, "Media:        {}", media)?,
            Lookup::Unknown(code) => writeln!(f, "Media:        {}", code.escape_default())?,
        }
        writeln!(f, "Version:      {}", self.version)?;
        match self.region {
            Lookup::Known(region) => writeln!(f, "Region:       {}", region)?,
            Lookup::Unknown(code) => {
                writeln!(f, "Region:       Unknown ({})", code.escape_default())?
            }
        }
        match self.cic {
            Lookup::Known(cic) => writeln!(f, "CIC:          {}", cic)?,
            Lookup::Unknown(crc) => {
                writeln!(f, "CIC:          Unknown ({})", format_hex(crc, "0x"))?
            }
        }
        writeln!(f, "CRC 1:        {}", format_hex(self.crc1, "0x"))?;
        writeln!(f, "CRC 2:        {}", format_hex(self.crc2, "0x"))
    }
}
