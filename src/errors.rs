use core::{convert::Infallible, error::Error};

use alloc::string::String;
use thiserror::Error;

use crate::base::MAX_HASH_PATH_LEN;

/// An error triggered while validating an [`ArchiveDescriptor`](crate::ArchiveDescriptor) before
/// anything is serialized.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Entry name {0:?} is not ascii")]
    /// A folder or file name contained non-ascii characters.
    ///
    /// The engine folds case on ascii only, so the stored bytes and the hash would disagree.
    NonAsciiName(String),
    #[error("Entry name {0:?} contains a NUL byte")]
    /// A folder or file name contained a NUL byte, which would end the name early.
    InteriorNul(String),
    #[error("Entry name {name:?} is {len} bytes long (at most {MAX_HASH_PATH_LEN} are supported)")]
    /// A folder or file name was longer than the engine hashes.
    NameTooLong {
        /// The offending name
        name: String,
        /// Its length in bytes
        len: usize,
    },
}

/// An error triggered while writing a placeholder archive.
#[derive(Debug, Error)]
pub enum WriteError<Io: Error = Infallible> {
    #[error(transparent)]
    /// The descriptor was rejected before the destination was touched.
    Descriptor(DescriptorError),

    #[error(transparent)]
    /// An IO error occurred.
    Io(#[from] Io),
}

#[cfg(feature = "std")]
impl From<WriteError<std::io::Error>> for std::io::Error {
    fn from(val: WriteError<std::io::Error>) -> Self {
        match val {
            WriteError::Descriptor(err) => {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
            }
            WriteError::Io(err) => err,
        }
    }
}

/// An error triggered while preparing a profile for archive invalidation.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum InvalidationError {
    #[error("Could not write placeholder archive {}", path.display())]
    /// The placeholder archive could not be written.
    Write {
        /// The archive's location
        path: std::path::PathBuf,
        /// The underlying failure
        source: WriteError<std::io::Error>,
    },
    #[error("Could not remove placeholder archive {}", path.display())]
    /// The placeholder archive could not be removed.
    Remove {
        /// The archive's location
        path: std::path::PathBuf,
        /// The underlying failure
        source: std::io::Error,
    },
}
