//! n64-core
//!
//! Reads the fixed 64-byte header (plus boot code) of Nintendo 64 ROM images.
//! Images come as `.z64` (big-endian), `.v64` (byte-swapped) or `.n64`
//! (word-swapped); [`HeaderReader`] detects which from the magic bytes and
//! corrects every read, so field accessors always see canonical order.
//!
//! ```ignore
//! use n64_core::HeaderReader;
//!
//! let rom = HeaderReader::open("Super Mario 64 (USA).v64")?;
//! println!("{}", rom.info()?);
//! ```

pub mod error;
pub mod format;
pub mod info;
pub mod reader;
pub mod tables;
pub mod util;

pub use error::{Error, FormatError, Result};
pub use format::{normalize, StorageLayout};
pub use info::RomInfo;
pub use reader::HeaderReader;
pub use tables::{Cic, Lookup, MediaFormat, Region};

/// File extensions ROM images are distributed under.
pub const ROM_EXTENSIONS: [&str; 3] = ["n64", "v64", "z64"];
