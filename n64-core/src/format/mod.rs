//! On-disk byte order of ROM images.
//!
//! Every image starts with the same four magic bytes, stored in whichever byte
//! order the dumper used. Detecting that order once lets all further reads be
//! corrected back to canonical big-endian.

mod codec;
mod layout;

pub use codec::normalize;
pub use layout::{StorageLayout, MAGIC_N64, MAGIC_V64, MAGIC_Z64};
