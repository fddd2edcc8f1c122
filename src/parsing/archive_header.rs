//! RAR4 main archive header layout.
//!
//! The main header follows the 7-byte marker and has a fixed shape:
//!
//! ```text
//! offset  7  crc       u16  low half of CRC32 over bytes 9..20
//! offset  9  type      u8   0x73
//! offset 10  flags     u16  bit 0x0004 = locked
//! offset 12  size      u16  13
//! offset 14  reserved  6 bytes
//! ```

use super::HeaderLayout;
use crate::buffer::{ArchiveBuffer, ByteSpan};
use crate::error::Result;
use crate::formats::FormatVersion;

pub struct ArchiveHeaderParser;

impl ArchiveHeaderParser {
    /// Header size including its CRC field.
    pub const HEADER_SIZE: usize = 13;
    pub const CRC_OFFSET: usize = 7;
    pub const CRC_SIZE: usize = 2;
    /// Bytes covered by the CRC (everything after the CRC field).
    pub const DATA_SIZE: usize = Self::HEADER_SIZE - Self::CRC_SIZE;
    /// Low byte of the flags word sits right after the one-byte type.
    pub const FLAG_OFFSET: usize = Self::CRC_OFFSET + Self::CRC_SIZE + 1;
    pub const LOCK_MASK: u8 = 0x04;

    /// Resolve the fixed RAR4 layout, checking it fits in `buffer`.
    pub fn layout(buffer: &ArchiveBuffer) -> Result<HeaderLayout> {
        HeaderLayout {
            version: FormatVersion::Rar4,
            checksum: ByteSpan::new(Self::CRC_OFFSET, Self::CRC_SIZE),
            data: ByteSpan::new(Self::CRC_OFFSET + Self::CRC_SIZE, Self::DATA_SIZE),
            flag_offset: Self::FLAG_OFFSET,
            flag_mask: Self::LOCK_MASK,
        }
        .validate(buffer)
    }
}
