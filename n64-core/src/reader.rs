use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder};
use flate2::Crc;
use n64_nls::{Decoder, Encoding, TextDecoder};

use crate::error::{Error, FormatError, Result};
use crate::format::StorageLayout;
use crate::info::RomInfo;
use crate::tables::{Cic, Lookup, MediaFormat, Region};

// Header offsets, in canonical order.
pub const CRC1_OFFSET: u64 = 0x10;
pub const CRC2_OFFSET: u64 = 0x14;
pub const TITLE_OFFSET: u64 = 0x20;
pub const TITLE_LEN: usize = 20;
pub const MEDIA_FORMAT_OFFSET: u64 = 0x38;
pub const ROM_ID_OFFSET: u64 = 0x3C;
pub const REGION_OFFSET: u64 = 0x3E;
pub const VERSION_OFFSET: u64 = 0x3F;
pub const BOOT_CODE_OFFSET: u64 = 0x40;
pub const BOOT_CODE_LEN: usize = 4032;

/// Lazy, layout-aware access to the header of one ROM image.
///
/// Nothing is cached: every accessor opens the file, reads what it needs and
/// closes it again.
#[derive(Debug, Clone)]
pub struct HeaderReader {
    path: PathBuf,
    layout: Option<StorageLayout>,
    decoder: Decoder,
}

impl HeaderReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_encoding(path, Encoding::default())
    }

    pub fn with_encoding(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self> {
        let mut reader = Self {
            path: path.as_ref().to_path_buf(),
            layout: None,
            decoder: Decoder::new(encoding),
        };
        reader.layout = reader.detect_layout()?;
        Ok(reader)
    }

    fn detect_layout(&self) -> Result<Option<StorageLayout>> {
        if self.file_size()? < 4 {
            log::warn!("{:?} is too short to hold a ROM header", self.path);
            return Ok(None);
        }

        let magic = self.raw_read(0, 4)?;
        let layout = StorageLayout::detect(&magic);
        match layout {
            Some(layout) => log::debug!("{:?}: detected {:?} layout", self.path, layout),
            None => log::warn!(
                "{:?}: unrecognized magic {:02X?}, storage layout unknown",
                self.path,
                magic
            ),
        }
        Ok(layout)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when the magic bytes matched no known layout.
    pub fn layout(&self) -> Option<StorageLayout> {
        self.layout
    }

    pub fn file_size(&self) -> Result<u64> {
        std::fs::metadata(&self.path)
            .map(|meta| meta.len())
            .map_err(|source| Error::Metadata {
                path: self.path.clone(),
                source,
            })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn out_of_range(&self, offset: u64, length: usize) -> Error {
        Error::File {
            path: self.path.clone(),
            offset,
            length,
            source: io::Error::new(ErrorKind::UnexpectedEof, "read past end of file"),
        }
    }

    /// Read `length` bytes exactly as stored on disk.
    ///
    /// The range is checked against the file size before any buffer is allocated.
    pub fn raw_read(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        let file_err = |source| Error::File {
            path: self.path.clone(),
            offset,
            length,
            source,
        };

        let end = offset
            .checked_add(length as u64)
            .ok_or_else(|| self.out_of_range(offset, length))?;

        let mut file = File::open(&self.path).map_err(file_err)?;
        let size = file.metadata().map_err(file_err)?.len();
        if end > size {
            return Err(self.out_of_range(offset, length));
        }

        file.seek(SeekFrom::Start(offset)).map_err(file_err)?;
        let mut buffer = vec![0; length];
        file.read_exact(&mut buffer).map_err(file_err)?;
        Ok(buffer)
    }

    /// Read `length` bytes in canonical order.
    ///
    /// The raw read is widened to whole layout groups so unaligned requests
    /// still come back correctly ordered.
    pub fn read_bytes(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        let layout = self.layout.ok_or(FormatError::UnknownLayout)?;
        let group = layout.group_size() as u64;

        let start = offset - offset % group;
        let end = offset
            .checked_add(length as u64)
            .and_then(|end| end.div_ceil(group).checked_mul(group))
            .ok_or_else(|| self.out_of_range(offset, length))?;
        let raw = self.raw_read(start, (end - start) as usize)?;
        let canonical = layout.to_canonical(&raw)?;

        let skip = (offset - start) as usize;
        Ok(canonical[skip..skip + length].to_vec())
    }

    /// Read one canonical byte.
    ///
    /// A byte at an odd offset sits in the other half of a swapped pair (or
    /// another slot of a reversed word), so the whole containing group is read
    /// and the slot picked after correction.
    pub fn read_byte(&self, offset: u64) -> Result<u8> {
        let layout = self.layout.ok_or(FormatError::UnknownLayout)?;
        let group = layout.group_size().max(2) as u64;

        let slot = offset % group;
        let bytes = self.read_bytes(offset - slot, group as usize)?;
        Ok(bytes[slot as usize])
    }

    pub fn read_uint32(&self, offset: u64) -> Result<u32> {
        let bytes = self.read_bytes(offset, 4)?;
        Ok(BigEndian::read_u32(&bytes))
    }

    /// Internal name of the software, e.g. `SUPER MARIO 64`.
    pub fn title(&self) -> Result<String> {
        let bytes = self.read_bytes(TITLE_OFFSET, TITLE_LEN)?;
        let title = self.decoder.decode_cstr(&bytes);
        Ok(title.trim_end().to_string())
    }

    /// Two-character game code, e.g. `SM` for Super Mario 64.
    pub fn rom_id(&self) -> Result<String> {
        let bytes = self.read_bytes(ROM_ID_OFFSET, 2)?;
        Ok(self.decoder.decode(&bytes).into_owned())
    }

    pub fn version(&self) -> Result<u8> {
        self.read_byte(VERSION_OFFSET)
    }

    pub fn crc1(&self) -> Result<u32> {
        self.read_uint32(CRC1_OFFSET)
    }

    pub fn crc2(&self) -> Result<u32> {
        self.read_uint32(CRC2_OFFSET)
    }

    pub fn region(&self) -> Result<Lookup<Region, char>> {
        let code = self.read_byte(REGION_OFFSET)?;
        Ok(Region::from_code(code))
    }

    /// Storage medium. The field spans four bytes, but only the last one is
    /// meaningful; the rest are NUL fill.
    pub fn media_format(&self) -> Result<Lookup<MediaFormat, char>> {
        let bytes = self.read_bytes(MEDIA_FORMAT_OFFSET, 4)?;
        Ok(MediaFormat::from_code(bytes[3]))
    }

    /// CRC-32 of the boot code block, used to identify the boot chip.
    pub fn boot_code_fingerprint(&self) -> Result<u32> {
        let boot_code = self.read_bytes(BOOT_CODE_OFFSET, BOOT_CODE_LEN)?;
        let mut crc = Crc::new();
        crc.update(&boot_code);
        log::debug!("{:?}: boot code crc32 {:08X}", self.path, crc.sum());
        Ok(crc.sum())
    }

    pub fn cic(&self) -> Result<Lookup<Cic, u32>> {
        Ok(Cic::from_fingerprint(self.boot_code_fingerprint()?))
    }

    /// Gather every header field.
    pub fn info(&self) -> Result<RomInfo> {
        let file_format = self.layout.ok_or(FormatError::UnknownLayout)?;

        Ok(RomInfo {
            title: self.title()?,
            rom_id: self.rom_id()?,
            version: self.version()?,
            file_format,
            file_size: self.file_size()?,
            file_path: self.path.clone(),
            file_name: self.file_name(),
            region: self.region()?,
            media_format: self.media_format()?,
            cic: self.cic()?,
            crc1: self.crc1()?,
            crc2: self.crc2()?,
        })
    }
}
