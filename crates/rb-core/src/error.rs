use core::fmt;

use crate::raster::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    StorageMismatch { expected: Storage, actual: Storage },
    OutOfBounds,
    UnsupportedChannelCount { channels: usize },
    NotBinaryLayout,
    UnsupportedPackedStorage { storage: Storage },
    EmptyLabel,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::StorageMismatch { expected, actual } => {
                write!(f, "storage mismatch: layout says {expected:?}, data is {actual:?}")
            }
            Self::OutOfBounds => write!(f, "region out of bounds"),
            Self::UnsupportedChannelCount { channels } => {
                write!(f, "unsupported channel count: {channels} (expected 1 or 3)")
            }
            Self::NotBinaryLayout => write!(f, "raster layout is not 1-bit single-band"),
            Self::UnsupportedPackedStorage { storage } => {
                write!(f, "unsupported packed word storage: {storage:?}")
            }
            Self::EmptyLabel => write!(f, "region label must not be empty"),
        }
    }
}

impl std::error::Error for Error {}
