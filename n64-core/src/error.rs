use std::path::PathBuf;

use thiserror::Error;

/// The on-disk bytes could not be brought into canonical order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported or undetected storage layout")]
    UnknownLayout,

    #[error("byte run of length {length} is not a multiple of group size {group_size}")]
    Misaligned { length: usize, group_size: usize },

    #[error("group size must be non-zero")]
    InvalidGroupSize,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {length} bytes at 0x{offset:X} from {path:?}: {source}")]
    File {
        path: PathBuf,
        offset: u64,
        length: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stat {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl Error {
    /// True for failures of the underlying storage (missing file, short read).
    pub fn is_file_error(&self) -> bool {
        matches!(self, Error::File { .. } | Error::Metadata { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
