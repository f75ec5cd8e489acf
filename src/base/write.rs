use alloc::{borrow::ToOwned, string::String, vec::Vec};

use crate::{
    base::{
        archive_path_hash, ArchiveFlags, FileFlags, DEFAULT_FILE_NAME, DEFAULT_FOLDER_NAME,
        FILE_RECORD_SIZE, FILE_SIZE_FIELD_SIZE, FOLDER_RECORD_SIZE, HEADER_SIZE, MAGIC,
        MAX_HASH_PATH_LEN,
    },
    util::PutExt,
    DescriptorError,
};

/// The archive format version written into the header.
///
/// The value is forwarded verbatim, the constants only name the ones known engines accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchiveVersion(pub u32);

impl ArchiveVersion {
    /// Oblivion
    pub const TES4: ArchiveVersion = ArchiveVersion(0x67);
    /// Fallout 3, Fallout: New Vegas and Skyrim
    pub const FO3: ArchiveVersion = ArchiveVersion(0x68);
    /// Skyrim Special Edition
    pub const SSE: ArchiveVersion = ArchiveVersion(0x69);
}

impl From<u32> for ArchiveVersion {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Describes a placeholder archive: a single folder holding a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDescriptor {
    version: ArchiveVersion,
    folder_name: String,
    file_name: String,
}

impl ArchiveDescriptor {
    /// Creates a descriptor for an empty-named folder holding [`DEFAULT_FILE_NAME`].
    pub fn new(version: impl Into<ArchiveVersion>) -> Self {
        Self {
            version: version.into(),
            folder_name: DEFAULT_FOLDER_NAME.to_owned(),
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }

    pub fn with_folder_name(mut self, folder_name: impl Into<String>) -> Self {
        self.folder_name = folder_name.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn version(&self) -> ArchiveVersion {
        self.version
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn validate(&self) -> Result<(), DescriptorError> {
        for name in [&self.folder_name, &self.file_name] {
            if !name.is_ascii() {
                return Err(DescriptorError::NonAsciiName(name.clone()));
            }
            if name.contains('\0') {
                return Err(DescriptorError::InteriorNul(name.clone()));
            }
            if name.len() > MAX_HASH_PATH_LEN {
                return Err(DescriptorError::NameTooLong {
                    name: name.clone(),
                    len: name.len(),
                });
            }
        }

        Ok(())
    }

    /// Computes where everything lands once this descriptor is serialized.
    pub fn layout(&self) -> Result<Layout, DescriptorError> {
        self.validate()?;

        // Both lengths are bounded by MAX_HASH_PATH_LEN after validation.
        Ok(Layout {
            total_folder_name_length: self.folder_name.len() as u32 + 1,
            total_file_name_length: self.file_name.len() as u32 + 1,
        })
    }

    /// Serializes the archive into a freshly allocated buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DescriptorError> {
        let layout = self.layout()?;
        log::trace!(target: "dummybsa", "Laying out archive {layout:?}");

        let mut out = Vec::with_capacity(layout.total_len());

        Header {
            version: self.version,
            archive_flags: ArchiveFlags::DIRECTORY_STRINGS | ArchiveFlags::FILE_STRINGS,
            folder_count: Layout::FOLDER_COUNT,
            file_count: Layout::FILE_COUNT,
            total_folder_name_length: layout.total_folder_name_length,
            total_file_name_length: layout.total_file_name_length,
            file_flags: FileFlags::TEXTURES,
        }
        .write(&mut out);

        FolderRecord {
            name_hash: archive_path_hash(&self.folder_name),
            file_count: Layout::FILE_COUNT,
            offset: layout.folder_file_block_offset(),
        }
        .write(&mut out);

        debug_assert_eq!(out.len(), layout.file_block_offset() as usize);
        out.put_zstring(self.folder_name.as_bytes());

        FileRecord {
            name_hash: archive_path_hash(&self.file_name),
            size: 0,
            offset: layout.file_data_offset(),
        }
        .write(&mut out);

        debug_assert_eq!(out.len(), layout.file_names_offset() as usize);
        out.put_zstring(self.file_name.as_bytes());
        // The entry is a zero-length placeholder.
        out.put_u32_le(0);

        debug_assert_eq!(out.len(), layout.total_len());
        Ok(out)
    }
}

/// The archive header, always [`HEADER_SIZE`] bytes.
#[derive(Debug, Clone)]
pub struct Header {
    pub version: ArchiveVersion,
    pub archive_flags: ArchiveFlags,
    pub folder_count: u32,
    pub file_count: u32,
    pub total_folder_name_length: u32,
    pub total_file_name_length: u32,
    pub file_flags: FileFlags,
}

impl Header {
    fn write(&self, out: &mut Vec<u8>) {
        log::trace!(target: "dummybsa", "Writing header {self:?}");
        out.put_slice(MAGIC);
        out.put_u32_le(self.version.0);
        out.put_u32_le(HEADER_SIZE);
        out.put_u32_le(self.archive_flags.bits());
        out.put_u32_le(self.folder_count);
        out.put_u32_le(self.file_count);
        out.put_u32_le(self.total_folder_name_length);
        out.put_u32_le(self.total_file_name_length);
        out.put_u32_le(self.file_flags.bits());
    }
}

/// A folder record, always [`FOLDER_RECORD_SIZE`] bytes.
#[derive(Debug, Clone)]
pub struct FolderRecord {
    pub name_hash: u64,
    pub file_count: u32,
    /// Offset of the folder's file record block plus the total file name length.
    pub offset: u32,
}

impl FolderRecord {
    fn write(&self, out: &mut Vec<u8>) {
        log::trace!(target: "dummybsa", "Writing folder record {self:?}");
        out.put_u64_le(self.name_hash);
        out.put_u32_le(self.file_count);
        out.put_u32_le(self.offset);
    }
}

/// A file record, always [`FILE_RECORD_SIZE`] bytes.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub name_hash: u64,
    pub size: u32,
    pub offset: u32,
}

impl FileRecord {
    fn write(&self, out: &mut Vec<u8>) {
        log::trace!(target: "dummybsa", "Writing file record {self:?}");
        out.put_u64_le(self.name_hash);
        out.put_u32_le(self.size);
        out.put_u32_le(self.offset);
    }
}

/// Byte positions of a serialized single folder, single file archive.
///
/// Every offset is derived from the record sizes, so the values written into the records always
/// agree with where the bytes actually end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Folder name length including its terminator.
    pub total_folder_name_length: u32,
    /// File name length including its terminator.
    pub total_file_name_length: u32,
}

impl Layout {
    pub const FOLDER_COUNT: u32 = 1;
    pub const FILE_COUNT: u32 = 1;

    pub fn folder_records_offset(&self) -> u32 {
        HEADER_SIZE
    }

    /// Where the folder name and its file records start.
    pub fn file_block_offset(&self) -> u32 {
        self.folder_records_offset() + Self::FOLDER_COUNT * FOLDER_RECORD_SIZE
    }

    /// The value stored in the folder record, which the engine expects to include the total file
    /// name length.
    pub fn folder_file_block_offset(&self) -> u32 {
        self.file_block_offset() + self.total_file_name_length
    }

    pub fn file_names_offset(&self) -> u32 {
        self.file_block_offset()
            + self.total_folder_name_length
            + Self::FILE_COUNT * FILE_RECORD_SIZE
    }

    /// The value stored in the file record.
    ///
    /// Counts the records, the file names and the trailing size field, but not the folder name.
    pub fn file_data_offset(&self) -> u32 {
        self.file_block_offset()
            + Self::FILE_COUNT * FILE_RECORD_SIZE
            + self.total_file_name_length
            + FILE_SIZE_FIELD_SIZE
    }

    pub fn total_len(&self) -> usize {
        (self.file_names_offset() + self.total_file_name_length + FILE_SIZE_FIELD_SIZE) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ByteSliceExt;

    const DUMMY_FO3: [u8; 83] = [
        0x42, 0x53, 0x41, 0x00, 0x68, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00,
        0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0a, 0x00,
        0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x3e, 0x00, 0x00, 0x00, 0x00, 0xf9, 0xed, 0x05, 0x64, 0xfd, 0xc6, 0x50,
        0x8e, 0x00, 0x00, 0x00, 0x00, 0x52, 0x00, 0x00, 0x00, 0x64, 0x75, 0x6d, 0x6d, 0x79, 0x2e,
        0x64, 0x64, 0x73, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn default_archive_bytes() {
        let bytes = ArchiveDescriptor::new(ArchiveVersion::FO3).to_bytes().unwrap();
        assert_eq!(bytes, DUMMY_FO3);
    }

    #[test]
    fn layout_matches_engine_constants() {
        let layout = ArchiveDescriptor::new(ArchiveVersion::TES4).layout().unwrap();

        assert_eq!(layout.folder_records_offset(), 0x24);
        assert_eq!(layout.file_block_offset(), 0x34);
        assert_eq!(layout.total_file_name_length, 10);
        assert_eq!(layout.folder_file_block_offset(), 0x34 + 10);
        assert_eq!(layout.file_data_offset(), 0x44 + 10 + 4);
        assert_eq!(layout.total_len(), 36 + 16 + 1 + 16 + 10 + 4);
    }

    #[test]
    fn custom_names() {
        let descriptor = ArchiveDescriptor::new(7u32)
            .with_folder_name("textures")
            .with_file_name("placeholder.nif");
        let layout = descriptor.layout().unwrap();
        let bytes = descriptor.to_bytes().unwrap();

        assert_eq!(bytes.len(), 36 + 16 + 9 + 16 + 16 + 4);
        assert_eq!(bytes.len(), layout.total_len());
        assert_eq!(bytes[4..8].as_u32_le(), Some(7));
        assert_eq!(bytes[0x18..0x1C].as_u32_le(), Some(9));
        assert_eq!(bytes[0x1C..0x20].as_u32_le(), Some(16));
        assert_eq!(bytes[0x24..0x2C].as_u64_le(), Some(archive_path_hash("textures")));
        assert_eq!(bytes[0x30..0x34].as_u32_le(), Some(0x34 + 16));
        assert_eq!(&bytes[0x34..0x3D], b"textures\0");

        let file_record = &bytes[0x3D..0x4D];
        assert_eq!(
            file_record[0..8].as_u64_le(),
            Some(archive_path_hash("placeholder.nif"))
        );
        assert_eq!(file_record[8..12].as_u32_le(), Some(0));
        assert_eq!(file_record[12..16].as_u32_le(), Some(0x44 + 16 + 4));

        let names = layout.file_names_offset() as usize;
        assert_eq!(&bytes[names..names + 16], b"placeholder.nif\0");
        assert_eq!(bytes[names + 16..].as_u32_le(), Some(0));
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            ArchiveDescriptor::new(ArchiveVersion::FO3)
                .with_file_name("dümmy.dds")
                .to_bytes(),
            Err(DescriptorError::NonAsciiName(_))
        ));
        assert!(matches!(
            ArchiveDescriptor::new(ArchiveVersion::FO3)
                .with_folder_name("a\0b")
                .to_bytes(),
            Err(DescriptorError::InteriorNul(_))
        ));
        assert!(matches!(
            ArchiveDescriptor::new(ArchiveVersion::FO3)
                .with_file_name("a".repeat(MAX_HASH_PATH_LEN + 1))
                .layout(),
            Err(DescriptorError::NameTooLong { len, .. }) if len == MAX_HASH_PATH_LEN + 1
        ));
    }
}
