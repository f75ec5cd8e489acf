pub const MAGIC: &[u8; 4] = b"BSA\0";
pub const HEADER_SIZE: u32 = 0x24;
pub const FOLDER_RECORD_SIZE: u32 = 0x10;
pub const FILE_RECORD_SIZE: u32 = 0x10;
/// Width of the file size field that trails the file name block.
pub const FILE_SIZE_FIELD_SIZE: u32 = 4;

/// Longest name the engine looks at when hashing, anything past it is ignored.
pub const MAX_HASH_PATH_LEN: usize = 260;

pub const DEFAULT_FOLDER_NAME: &str = "";
/// A texture name, so the archive advertises [`FileFlags::TEXTURES`].
pub const DEFAULT_FILE_NAME: &str = "dummy.dds";

bitflags::bitflags! {
    /// Archive-wide flags stored in the header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ArchiveFlags: u32 {
        const DIRECTORY_STRINGS = 1 << 0;
        const FILE_STRINGS = 1 << 1;
    }
}

bitflags::bitflags! {
    /// The kinds of resources an archive claims to contain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileFlags: u32 {
        const MESHES = 1 << 0;
        const TEXTURES = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Bits [`archive_path_hash`] sets in the low word for well known extensions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HashFlags: u32 {
        const KF = 0x80;
        const NIF = 0x8000;
        const DDS = Self::KF.bits() | Self::NIF.bits();
        const WAV = 0x8000_0000;
    }
}

impl HashFlags {
    /// Looks up the flags for an already lowercased extension, without its leading dot.
    pub fn for_extension(extension: &[u8]) -> Self {
        match extension {
            b"kf" => Self::KF,
            b"nif" => Self::NIF,
            b"dds" => Self::DDS,
            b"wav" => Self::WAV,
            _ => Self::empty(),
        }
    }
}

fn rolling_hash(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |hash, &b| hash.wrapping_mul(0x1003f).wrapping_add(b.into()))
}

/// Computes the key the engine files `path` under inside an archive.
///
/// The low word packs the shape of the name: the last two bytes of the stem, the stem's length
/// and the first byte of the whole path, plus [`HashFlags`] for known extensions. The high word
/// holds a multiplicative hash of the stem's interior and of the extension (dot included), and is
/// zero when there is no extension.
///
/// Case and separators are normalized first, so `Foo\Bar.DDS` and `foo/bar.dds` collide. Input past
/// [`MAX_HASH_PATH_LEN`] bytes or after a NUL is ignored.
pub fn archive_path_hash(path: &str) -> u64 {
    let mut buffer = [0u8; MAX_HASH_PATH_LEN];
    let mut len = 0;
    for &c in path.as_bytes().iter().take_while(|&&c| c != 0).take(MAX_HASH_PATH_LEN) {
        buffer[len] = match c.to_ascii_lowercase() {
            b'\\' => b'/',
            c => c,
        };
        len += 1;
    }
    let name = &buffer[..len];

    let (stem, extension) = match name.iter().rposition(|&c| c == b'.') {
        Some(dot) => name.split_at(dot),
        None => (name, &[][..]),
    };

    let mut hash = 0u64;

    if let [.., last] = stem {
        let second_to_last = if stem.len() > 2 { stem[stem.len() - 2] } else { 0 };
        // The length byte only has 8 bits of room
        hash = u64::from(*last)
            | u64::from(second_to_last) << 8
            | u64::from(stem.len() as u8) << 16
            | u64::from(name[0]) << 24;
    }

    if let [_, rest @ ..] = extension {
        hash |= u64::from(HashFlags::for_extension(rest).bits());

        // The first byte and the last two are already part of the low word.
        let interior = stem.get(1..stem.len().saturating_sub(2)).unwrap_or(&[]);
        let high = rolling_hash(interior).wrapping_add(rolling_hash(extension));
        hash |= u64::from(high) << 32;
    }

    hash
}
