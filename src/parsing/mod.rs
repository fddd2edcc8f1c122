//! Main header layout resolution.
//!
//! RAR4 and RAR5 store the lock flag and header checksum in very different
//! places. Each format resolves a [`HeaderLayout`] once; everything after
//! that works on the layout alone.

pub mod archive_header;
pub mod rar5;

pub use archive_header::ArchiveHeaderParser;
pub use rar5::Rar5ArchiveHeaderParser;

use crate::buffer::{ArchiveBuffer, ByteSpan};
use crate::error::{RarError, Result};
use crate::formats::FormatVersion;

/// Where the checksum, its data and the lock flag live in a main header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub version: FormatVersion,
    /// Stored checksum field (2 bytes for RAR4, 4 for RAR5).
    pub checksum: ByteSpan,
    /// Bytes covered by the checksum, starting right after the field.
    pub data: ByteSpan,
    /// Byte holding the lock bit, always inside `data`.
    pub flag_offset: usize,
    pub flag_mask: u8,
}

impl HeaderLayout {
    /// Resolve the layout for `version` from the header prefix.
    pub fn resolve(version: FormatVersion, buffer: &ArchiveBuffer) -> Result<Self> {
        match version {
            FormatVersion::Rar4 => ArchiveHeaderParser::layout(buffer),
            FormatVersion::Rar5 => Rar5ArchiveHeaderParser::layout(buffer),
        }
    }

    /// Bytes that must be written back after a toggle: from the start of
    /// the checksum field through the flag byte.
    pub fn write_span(&self) -> ByteSpan {
        ByteSpan::new(
            self.checksum.start,
            self.flag_offset - self.checksum.start + 1,
        )
    }

    /// Check the layout against the bytes actually read.
    pub(crate) fn validate(self, buffer: &ArchiveBuffer) -> Result<Self> {
        debug_assert_eq!(self.checksum.end(), self.data.start);
        for span in [self.checksum, self.data] {
            if span.end() > buffer.len() {
                return Err(RarError::BufferOverrun {
                    needed: span.end(),
                    have: buffer.len(),
                });
            }
        }
        if !self.data.contains(self.flag_offset) {
            return Err(RarError::InvalidHeader);
        }
        Ok(self)
    }
}
