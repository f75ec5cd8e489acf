use alloc::vec::Vec;

macro_rules! define_put_le_methods {
    { $($name:ident($type:ty);)* } => {
        $(fn $name(&mut self, value: $type) {
            self.put_slice(&value.to_le_bytes())
        })*
    };
}

/// Appends fixed-width little-endian fields to a growing buffer.
pub trait PutExt {
    fn put_slice(&mut self, bytes: &[u8]);

    fn put_u8(&mut self, value: u8) {
        self.put_slice(&[value])
    }

    define_put_le_methods! {
        put_u32_le(u32);
        put_u64_le(u64);
    }

    /// Appends `bytes` followed by a single NUL terminator.
    fn put_zstring(&mut self, bytes: &[u8]) {
        self.put_slice(bytes);
        self.put_u8(0);
    }
}

impl PutExt for Vec<u8> {
    fn put_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes)
    }
}

#[cfg(test)]
macro_rules! declare_as_methods {
    { $($name:ident -> $type:ty;)* } => {
        $(fn $name(&self) -> Option<$type>;)*
    };
}

#[cfg(test)]
pub trait ByteSliceExt {
    declare_as_methods! {
        as_u32_le -> u32;
        as_u64_le -> u64;
    }
}

#[cfg(test)]
macro_rules! define_as_methods {
    { $($name:ident -> $type:ty;)* } => {
        $(fn $name(&self) -> Option<$type> {
            Some(<$type>::from_le_bytes((*self).try_into().ok()?))
        })*
    };
}

#[cfg(test)]
impl ByteSliceExt for [u8] {
    define_as_methods! {
        as_u32_le -> u32;
        as_u64_le -> u64;
    }
}
