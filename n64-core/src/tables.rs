//! Fixed code tables for header fields.
//!
//! See <http://en64.shoutwiki.com/wiki/ROM#Cartridge_ROM_Header>.

use std::fmt;

use phf::phf_map;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Result of a table lookup: the mapped value, or the raw value that had no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup<T, R> {
    Known(T),
    Unknown(R),
}

impl<T, R> Lookup<T, R> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Lookup::Known(value) => Some(value),
            Lookup::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Lookup::Known(_))
    }
}

/// Known values serialize as themselves, misses as `{ "unknown": raw }`.
impl<T: Serialize, R: Serialize> Serialize for Lookup<T, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Lookup::Known(value) => value.serialize(serializer),
            Lookup::Unknown(raw) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("unknown", raw)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Au,
    Br,
    Ca,
    Cn,
    De,
    Es,
    Eu,
    Fr,
    It,
    Jp,
    Kr,
    Nl,
    Us,
    AsiaNtsc,
    Beta,
    Gw64Ntsc,
    Gw64Pal,
    Nordic,
}

static REGION_CODES: phf::Map<u8, Region> = phf_map! {
    b'7' => Region::Beta,
    b'A' => Region::AsiaNtsc,
    b'B' => Region::Br,
    b'C' => Region::Cn,
    b'D' => Region::De,
    b'E' => Region::Us,
    b'F' => Region::Fr,
    b'G' => Region::Gw64Ntsc,
    b'H' => Region::Nl,
    b'I' => Region::It,
    b'J' => Region::Jp,
    b'K' => Region::Kr,
    b'L' => Region::Gw64Pal,
    b'N' => Region::Ca,
    b'P' => Region::Eu,
    b'S' => Region::Es,
    b'U' => Region::Au,
    b'W' => Region::Nordic,
    b'X' => Region::Eu,
    b'Y' => Region::Eu,
};

impl Region {
    pub fn from_code(code: u8) -> Lookup<Region, char> {
        match REGION_CODES.get(&code) {
            Some(region) => Lookup::Known(*region),
            None => Lookup::Unknown(char::from(code)),
        }
    }

    /// Short identifier, also used when serializing.
    pub fn id(self) -> &'static str {
        match self {
            Region::Au => "au",
            Region::Br => "br",
            Region::Ca => "ca",
            Region::Cn => "cn",
            Region::De => "de",
            Region::Es => "es",
            Region::Eu => "eu",
            Region::Fr => "fr",
            Region::It => "it",
            Region::Jp => "jp",
            Region::Kr => "kr",
            Region::Nl => "nl",
            Region::Us => "us",
            Region::AsiaNtsc => "asia_ntsc",
            Region::Beta => "beta",
            Region::Gw64Ntsc => "gw64_ntsc",
            Region::Gw64Pal => "gw64_pal",
            Region::Nordic => "nordic",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Au => "Australia",
            Region::Br => "Brazil",
            Region::Ca => "Canada",
            Region::Cn => "China",
            Region::De => "Germany",
            Region::Es => "Spain",
            Region::Eu => "Europe",
            Region::Fr => "France",
            Region::It => "Italy",
            Region::Jp => "Japan",
            Region::Kr => "Korea",
            Region::Nl => "Netherlands",
            Region::Us => "United States",
            Region::AsiaNtsc => "Asia (NTSC)",
            Region::Beta => "Beta",
            Region::Gw64Ntsc => "Gateway 64 (NTSC)",
            Region::Gw64Pal => "Gateway 64 (PAL)",
            Region::Nordic => "Nordic",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage medium the software ships on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    Cartridge,
    DiskDrive,
    ExpandableCartridge,
    DiskExpansion,
    Aleck64,
}

static MEDIA_FORMATS: phf::Map<u8, MediaFormat> = phf_map! {
    b'N' => MediaFormat::Cartridge,
    b'D' => MediaFormat::DiskDrive,
    b'C' => MediaFormat::ExpandableCartridge,
    b'E' => MediaFormat::DiskExpansion,
    b'Z' => MediaFormat::Aleck64,
};

impl MediaFormat {
    pub fn from_code(code: u8) -> Lookup<MediaFormat, char> {
        match MEDIA_FORMATS.get(&code) {
            Some(media) => Lookup::Known(*media),
            None => Lookup::Unknown(char::from(code)),
        }
    }

    pub fn code(self) -> char {
        match self {
            MediaFormat::Cartridge => 'N',
            MediaFormat::DiskDrive => 'D',
            MediaFormat::ExpandableCartridge => 'C',
            MediaFormat::DiskExpansion => 'E',
            MediaFormat::Aleck64 => 'Z',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MediaFormat::Cartridge => "Cartridge",
            MediaFormat::DiskDrive => "64DD Disk",
            MediaFormat::ExpandableCartridge => "Cartridge part of an expandable game",
            MediaFormat::DiskExpansion => "64DD Expansion",
            MediaFormat::Aleck64 => "Aleck64 Cartridge",
        }
    }
}

impl Serialize for MediaFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Boot chip variant, e.g. `Cic(6102)` for CIC-NUS-6102.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cic(pub u16);

/// CRC-32 of the 4032-byte boot code block, per chip.
static CIC_FINGERPRINTS: phf::Map<u32, Cic> = phf_map! {
    0x587BD543u32 => Cic(5101),
    0x6170A4A1u32 => Cic(6101),
    0x90BB6CB5u32 => Cic(6102),
    0x0B050EE0u32 => Cic(6103),
    0x98BC2C86u32 => Cic(6105),
    0xACC8580Au32 => Cic(6106),
    0x009E9EA3u32 => Cic(7102),
    0x0E018159u32 => Cic(8303),
};

impl Cic {
    pub fn from_fingerprint(crc: u32) -> Lookup<Cic, u32> {
        match CIC_FINGERPRINTS.get(&crc) {
            Some(cic) => Lookup::Known(*cic),
            None => Lookup::Unknown(crc),
        }
    }
}

impl fmt::Display for Cic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CIC-NUS-{}", self.0)
    }
}
