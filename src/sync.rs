use std::{
    fs::File,
    io::Write,
    path::Path,
};

use crate::{errors, ArchiveDescriptor, ArchiveVersion};

pub type WriteError = errors::WriteError<std::io::Error>;

impl ArchiveDescriptor {
    /// Serializes the archive into `storage` and flushes it.
    pub fn write_to<W: Write>(&self, mut storage: W) -> Result<(), WriteError> {
        let bytes = self.to_bytes().map_err(WriteError::Descriptor)?;

        storage.write_all(&bytes)?;
        storage.flush()?;

        Ok(())
    }

    /// Writes the archive to `path`, replacing anything already there.
    ///
    /// The descriptor is validated before the file is opened, so an invalid descriptor leaves the
    /// filesystem untouched. An IO error part way through leaves a truncated, unusable archive
    /// behind; callers are expected to rewrite it when they find it missing or stale.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), WriteError> {
        let path = path.as_ref();
        let bytes = self.to_bytes().map_err(WriteError::Descriptor)?;

        log::debug!(target: "dummybsa",
            "Writing {} byte archive to {}",
            bytes.len(),
            path.display()
        );
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;

        Ok(())
    }
}

/// Writes the default placeholder archive for `version` to `path`.
pub fn write_placeholder(
    path: impl AsRef<Path>,
    version: impl Into<ArchiveVersion>,
) -> Result<(), WriteError> {
    ArchiveDescriptor::new(version).write_file(path)
}
