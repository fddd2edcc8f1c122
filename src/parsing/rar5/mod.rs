//! RAR5 format parsing modules.
//!
//! RAR5 uses a completely different header format than RAR4:
//! - Variable-length integers (vint) for sizes, types and flags
//! - CRC-32 stored in full instead of its low 16 bits

mod vint;

pub mod archive_header;

pub use archive_header::Rar5ArchiveHeaderParser;
pub use vint::{read_vint, VintReader};

/// Header type of an archive encryption header.
pub const HEADER_TYPE_ENCRYPTION: u64 = 4;

/// RAR5 common header flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rar5HeaderFlags {
    /// Extra area is present after header
    pub has_extra_area: bool,
}

impl From<u64> for Rar5HeaderFlags {
    fn from(flags: u64) -> Self {
        Self {
            has_extra_area: flags & 0x0001 != 0,
        }
    }
}
