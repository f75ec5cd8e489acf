//! `dummybsa` is a library for writing minimal placeholder BSA archives
//!
//! Games built on the Gamebryo and Creation engines prefer files packed inside BSA archives over
//! loose files in their data directory. Registering an archive that the engine parses successfully
//! but that contains nothing of substance (one empty-named folder holding one zero-length
//! `dummy.dds`) together with the right ini settings flips that priority, which is what mod
//! managers call "archive invalidation".
//!
//! # Features
//! - [X] the engine's archive path hash, see [`archive_path_hash`]
//! - [X] serializing a placeholder archive to memory, see [`ArchiveDescriptor::to_bytes`]
//! - [X] writing a placeholder archive to disk (`std`)
//! - [X] toggling invalidation for a profile (`std`)
//!
//! # Quick start
//! ```no_run
//! use dummybsa::{sync::write_placeholder, ArchiveVersion};
//!
//! write_placeholder("Data/Fallout - Invalidation.bsa", ArchiveVersion::FO3)?;
//! # Ok::<(), dummybsa::sync::WriteError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors;
mod util;
pub use errors::*;

mod base;
#[cfg(feature = "std")]
pub mod invalidation;
#[cfg(feature = "std")]
pub mod sync;

pub use base::{
    archive_path_hash, ArchiveDescriptor, ArchiveFlags, ArchiveVersion, FileFlags, FileRecord,
    FolderRecord, HashFlags, Header, Layout, DEFAULT_FILE_NAME, DEFAULT_FOLDER_NAME,
    FILE_RECORD_SIZE, FOLDER_RECORD_SIZE, HEADER_SIZE, MAGIC, MAX_HASH_PATH_LEN,
};
