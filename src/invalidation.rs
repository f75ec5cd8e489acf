//! Toggling archive invalidation for a game profile.
//!
//! With invalidation active the game's ini tells the engine to prefer newer loose files, and the
//! placeholder archive sits at the front of the archive list so loose files win over packed ones.
//! Deactivating undoes both and points the engine back at `ArchiveInvalidation.txt`.

use std::{
    error::Error,
    fmt,
    path::{Path, PathBuf},
};

use crate::{ArchiveDescriptor, ArchiveVersion, InvalidationError};

pub const INVALIDATE_OLDER_FILES_KEY: &str = "Archive/bInvalidateOlderFiles";
pub const INVALIDATION_FILE_KEY: &str = "Archive/SInvalidationFile";
pub const ARCHIVE_INVALIDATION_FILE: &str = "ArchiveInvalidation.txt";

/// Key-value access to the game's ini settings, keys are `Section/name`.
pub trait Settings {
    type Error: Error;

    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// An ordered list of archive names as stored in the game's ini, e.g. `SArchiveList`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveList {
    archives: Vec<String>,
}

impl ArchiveList {
    /// Splits a comma separated list, trimming every entry.
    pub fn parse(value: &str) -> Self {
        Self {
            archives: value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.archives.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|archive| archive.eq_ignore_ascii_case(name))
    }

    /// Inserts `name` at `index` (or the end, if `index` is past it) unless it is already listed.
    ///
    /// Returns whether the list changed.
    pub fn insert(&mut self, index: usize, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }

        self.archives.insert(index.min(self.archives.len()), name.to_string());
        true
    }

    /// Removes every entry matching `name`, ignoring case.
    ///
    /// Returns whether the list changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.archives.len();
        self.archives.retain(|archive| !archive.eq_ignore_ascii_case(name));
        self.archives.len() != before
    }
}

impl fmt::Display for ArchiveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, archive) in self.archives.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(archive)?;
        }
        Ok(())
    }
}

/// Manages the placeholder archive of one game.
#[derive(Debug, Clone)]
pub struct Invalidation {
    archive_name: String,
    version: ArchiveVersion,
    data_dir: PathBuf,
}

impl Invalidation {
    pub fn new(
        archive_name: impl Into<String>,
        version: impl Into<ArchiveVersion>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            archive_name: archive_name.into(),
            version: version.into(),
            data_dir: data_dir.into(),
        }
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Where the placeholder archive lives.
    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.archive_name)
    }

    pub fn is_invalidation_archive(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.archive_name)
    }

    /// Brings `settings`, `archives` and the data directory in line with `active`.
    ///
    /// Returns whether anything had to change. Settings that fail to save are logged and skipped,
    /// failing to write or remove the placeholder archive is an error.
    pub fn prepare<S: Settings>(
        &self,
        settings: &mut S,
        archives: &mut ArchiveList,
        active: bool,
    ) -> Result<bool, InvalidationError> {
        let mut dirty = ensure_setting(settings, INVALIDATE_OLDER_FILES_KEY, "1", "0");

        let path = self.archive_path();
        if active {
            if archives.insert(0, &self.archive_name) {
                log::info!(target: "dummybsa", "Registered {} in the archive list", self.archive_name);
                dirty = true;
            }

            if !path.exists() {
                self.write_archive(&path)?;
                dirty = true;
            }

            dirty |= ensure_setting(settings, INVALIDATION_FILE_KEY, "", "");
        } else {
            if archives.remove(&self.archive_name) {
                log::info!(target: "dummybsa", "Removed {} from the archive list", self.archive_name);
                dirty = true;
            }

            if path.exists() {
                log::info!(target: "dummybsa", "Removing {}", path.display());
                std::fs::remove_file(&path)
                    .map_err(|source| InvalidationError::Remove { path, source })?;
                dirty = true;
            }

            dirty |= ensure_setting(
                settings,
                INVALIDATION_FILE_KEY,
                ARCHIVE_INVALIDATION_FILE,
                "",
            );
        }

        Ok(dirty)
    }

    fn write_archive(&self, path: &Path) -> Result<(), InvalidationError> {
        log::info!(target: "dummybsa", "Creating placeholder archive {}", path.display());
        ArchiveDescriptor::new(self.version)
            .write_file(path)
            .map_err(|source| InvalidationError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn ensure_setting<S: Settings>(settings: &mut S, key: &str, value: &str, default: &str) -> bool {
    let current = settings.get(key);
    if current.as_deref().unwrap_or(default) == value {
        return false;
    }

    if let Err(err) = settings.set(key, value) {
        log::warn!(target: "dummybsa", "Failed to set {key} to {value:?}: {err}");
    }

    true
}
