//! RAR5 main archive header layout.
//!
//! The main header appears once after the signature:
//!
//! ```text
//! crc32          u32   over header_size..end of header
//! header_size    vint  bytes after this field
//! header_type    vint  1 = main, 4 = archive encryption
//! header_flags   vint  bit 0x0001 = extra area present
//! extra_size     vint  only with the extra area flag
//! archive_flags  vint  bit 0x0010 = locked
//! ```
//!
//! The lock mask is applied to the first byte of `archive_flags`.

use tracing::debug;

use super::{Rar5HeaderFlags, VintReader, HEADER_TYPE_ENCRYPTION};
use crate::buffer::{ArchiveBuffer, ByteSpan};
use crate::error::{RarError, Result};
use crate::formats::FormatVersion;
use crate::parsing::HeaderLayout;

pub struct Rar5ArchiveHeaderParser;

impl Rar5ArchiveHeaderParser {
    pub const CRC_OFFSET: usize = 8;
    pub const CRC_SIZE: usize = 4;
    /// First byte of the checksummed body (the header_size vint).
    pub const BODY_OFFSET: usize = Self::CRC_OFFSET + Self::CRC_SIZE;
    pub const LOCK_MASK: u8 = 0x10;

    /// Walk the vint prefix of the main header and resolve its layout.
    ///
    /// Fails with [`RarError::UnsupportedEncryptedHeader`] as soon as the
    /// header type reads 4, before anything else is decoded.
    pub fn layout(buffer: &ArchiveBuffer) -> Result<HeaderLayout> {
        let body = buffer.tail(Self::BODY_OFFSET).map_err(|_| RarError::BufferOverrun {
            needed: Self::BODY_OFFSET + 1,
            have: buffer.len(),
        })?;
        let mut reader = VintReader::at(body, Self::BODY_OFFSET);

        // header_size counts the bytes after its own encoding
        let (header_size, header_size_len) = reader.read_with_len()?;

        let header_type = reader.read()?;
        if header_type == HEADER_TYPE_ENCRYPTION {
            return Err(RarError::UnsupportedEncryptedHeader);
        }

        let header_flags = Rar5HeaderFlags::from(reader.read()?);
        if header_flags.has_extra_area {
            // Only the length of the extra area size field matters here
            reader.skip()?;
        }
        let flag_offset = reader.position();

        let data_len = usize::try_from(header_size)
            .ok()
            .and_then(|size| size.checked_add(header_size_len))
            .ok_or(RarError::InvalidHeader)?;

        debug!(
            header_size,
            header_type,
            has_extra_area = header_flags.has_extra_area,
            flag_offset,
            "resolved RAR5 main header"
        );

        HeaderLayout {
            version: FormatVersion::Rar5,
            checksum: ByteSpan::new(Self::CRC_OFFSET, Self::CRC_SIZE),
            data: ByteSpan::new(Self::BODY_OFFSET, data_len),
            flag_offset,
            flag_mask: Self::LOCK_MASK,
        }
        .validate(buffer)
    }
}
