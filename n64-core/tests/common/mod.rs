//! Synthetic ROM images for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use n64_core::{normalize, StorageLayout};

pub const IMAGE_LEN: usize = 0x1000;

/// Builds a canonical (`.z64`) header image.
#[derive(Debug, Clone)]
pub struct RomBuilder {
    data: Vec<u8>,
}

impl Default for RomBuilder {
    fn default() -> Self {
        let mut data = vec![0u8; IMAGE_LEN];
        data[..4].copy_from_slice(&StorageLayout::Native.magic());
        let mut builder = Self { data };
        builder
            .crc(0x635A2BFF, 0x8B022326)
            .title("SUPER MARIO 64")
            .media(b'N')
            .rom_id(b"SM")
            .region(b'E')
            .version(0);
        builder
    }
}

impl RomBuilder {
    pub fn crc(&mut self, crc1: u32, crc2: u32) -> &mut Self {
        self.data[0x10..0x14].copy_from_slice(&crc1.to_be_bytes());
        self.data[0x14..0x18].copy_from_slice(&crc2.to_be_bytes());
        self
    }

    /// Space padded to 20 bytes.
    pub fn title(&mut self, title: &str) -> &mut Self {
        self.title_bytes(title.as_bytes())
    }

    pub fn title_bytes(&mut self, title: &[u8]) -> &mut Self {
        let field = &mut self.data[0x20..0x34];
        field.fill(b' ');
        field[..title.len()].copy_from_slice(title);
        self
    }

    pub fn media(&mut self, code: u8) -> &mut Self {
        self.data[0x38..0x3C].copy_from_slice(&[0, 0, 0, code]);
        self
    }

    pub fn rom_id(&mut self, id: &[u8; 2]) -> &mut Self {
        self.data[0x3C..0x3E].copy_from_slice(id);
        self
    }

    pub fn region(&mut self, code: u8) -> &mut Self {
        self.data[0x3E] = code;
        self
    }

    pub fn version(&mut self, version: u8) -> &mut Self {
        self.data[0x3F] = version;
        self
    }

    pub fn boot_code(&mut self, code: &[u8]) -> &mut Self {
        self.data[0x40..0x40 + code.len()].copy_from_slice(code);
        self
    }

    pub fn poke(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn canonical(&self) -> &[u8] {
        &self.data
    }

    /// The image as it would be stored on disk in `layout`.
    pub fn encode(&self, layout: StorageLayout) -> Vec<u8> {
        match layout {
            StorageLayout::Native => self.data.clone(),
            _ => normalize(&self.data, layout.group_size()).unwrap(),
        }
    }

    pub fn write(&self, layout: StorageLayout) -> TempRom {
        TempRom::new(layout.extension(), &self.encode(layout))
    }
}

/// A file in the temp directory, removed on drop.
pub struct TempRom {
    path: PathBuf,
}

impl TempRom {
    pub fn new(extension: &str, bytes: &[u8]) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "n64-core-test-{}-{}.{}",
            std::process::id(),
            id,
            extension
        ));
        std::fs::write(&path, bytes).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempRom {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut c = i as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 { 0xEDB88320 ^ (c >> 1) } else { c >> 1 };
        }
        *entry = c;
    }
    table
}

pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(data);
    crc.sum()
}

/// Four bytes that, appended to `prefix`, make the CRC-32 of the whole run equal `target`.
///
/// Feeding bytes `B` from register `r` lands in the same state as feeding four
/// zero bytes from `r ^ B`, so it is enough to run the zero-byte steps
/// backwards from the wanted register.
pub fn forge_crc32_suffix(prefix: &[u8], target: u32) -> [u8; 4] {
    let table = crc32_table();
    let mut by_top = [0usize; 256];
    for (i, entry) in table.iter().enumerate() {
        by_top[(entry >> 24) as usize] = i;
    }

    let mut reg = !target;
    for _ in 0..4 {
        let k = by_top[(reg >> 24) as usize];
        reg = ((reg ^ table[k]) << 8) | k as u32;
    }

    let start = !crc32(prefix);
    (reg ^ start).to_le_bytes()
}
