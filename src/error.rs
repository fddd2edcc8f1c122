//! Error types for RAR header inspection and lock toggling.
//!
//! This module provides the [`RarError`] type which covers every way a lock
//! or unlock run can fail, from opening the file to validating the header.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | I/O | [`FileOpen`], [`FileRead`], [`FileWrite`] | The archive could not be opened, read, or updated |
//! | Format | [`NotARarFile`], [`UnsupportedEncryptedHeader`] | The file is not something this crate can touch |
//! | Integrity | [`HeaderCorrupt`], [`BufferOverrun`], [`InvalidHeader`] | The header could not be trusted |
//!
//! Every error is fatal for the run. Nothing is written to disk before the
//! header checksum has been validated and recomputed in memory, so a failure
//! before [`FileWrite`] leaves the archive untouched. A failure *during* the
//! write may leave the rewritten byte range partially updated; no journal or
//! temp-file rename protects against that.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rar_lock::{lock_file, LockState, RarError};
//!
//! match lock_file("archive.rar", LockState::Locked) {
//!     Ok(outcome) => println!("{outcome}"),
//!     Err(RarError::NotARarFile) => eprintln!("Not a RAR file"),
//!     Err(RarError::UnsupportedEncryptedHeader) => eprintln!("Headers are encrypted"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`FileOpen`]: RarError::FileOpen
//! [`FileRead`]: RarError::FileRead
//! [`FileWrite`]: RarError::FileWrite
//! [`NotARarFile`]: RarError::NotARarFile
//! [`UnsupportedEncryptedHeader`]: RarError::UnsupportedEncryptedHeader
//! [`HeaderCorrupt`]: RarError::HeaderCorrupt
//! [`BufferOverrun`]: RarError::BufferOverrun
//! [`InvalidHeader`]: RarError::InvalidHeader

use std::io;

use thiserror::Error;

/// Error type for RAR lock operations.
#[derive(Debug, Error)]
pub enum RarError {
    /// The archive could not be opened for read-and-update.
    #[error("Error opening file: {0}")]
    FileOpen(#[source] io::Error),

    /// Reading the header prefix failed, or the file was empty.
    #[error("Error reading file: {0}")]
    FileRead(#[source] io::Error),

    /// Writing the rewritten header bytes back failed.
    ///
    /// The checksum and flag bytes may be partially written.
    #[error("Error writing file: {0}")]
    FileWrite(#[source] io::Error),

    /// The buffer starts with neither RAR signature.
    ///
    /// RAR files must start with either:
    /// - RAR4: `Rar!\x1a\x07\x00` (7 bytes)
    /// - RAR5: `Rar!\x1a\x07\x01\x00` (8 bytes)
    #[error("This is not a RAR file")]
    NotARarFile,

    /// The first RAR5 header is an archive encryption header (type 4).
    ///
    /// Everything after it is encrypted, so neither the flag nor the
    /// checksum can be located or recomputed.
    #[error("RAR5 files with encrypted headers are not supported")]
    UnsupportedEncryptedHeader,

    /// The stored header checksum does not match the computed one.
    ///
    /// Either the archive is damaged or it uses a header variant whose
    /// offsets this crate would resolve incorrectly. The header is never
    /// modified in this case.
    #[error(
        "File is corrupted or not supported (stored CRC 0x{stored:08x}, computed 0x{computed:08x})"
    )]
    HeaderCorrupt {
        /// Checksum read from the header, zero-extended to 32 bits.
        stored: u32,
        /// Checksum computed over the data span, truncated to the field width.
        computed: u32,
    },

    /// Decoding or offset resolution would read outside the bytes read.
    #[error("Header extends past the bytes read: need {needed} bytes, have {have}")]
    BufferOverrun {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// A header field has an impossible value.
    ///
    /// Raised for variable-length integers longer than ten bytes and for a
    /// lock flag that would sit outside its own checksummed span.
    #[error("Invalid or malformed header")]
    InvalidHeader,
}

impl RarError {
    /// Whether the error came from the underlying file rather than its contents.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::FileOpen(_) | Self::FileRead(_) | Self::FileWrite(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RarError>;
