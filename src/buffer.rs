//! Owned header prefix with offset-checked access.
//!
//! Every read and write goes through a bounds check that reports
//! [`RarError::BufferOverrun`] instead of panicking on a short prefix.

use std::ops::Range;

use crate::error::{RarError, Result};

/// A contiguous byte range inside an [`ArchiveBuffer`].
///
/// Offsets are relative to the start of the archive, so a span also names
/// the on-disk bytes it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    pub start: usize,
    pub len: usize,
}

impl ByteSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last byte, saturating for absurd header sizes.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }
}

/// The first bytes of an archive, holding at least its main header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBuffer {
    bytes: Vec<u8>,
}

impl ArchiveBuffer {
    /// Prefix length read from disk when nothing else is configured.
    pub const DEFAULT_PREFIX_LEN: usize = 256;

    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    fn check(&self, span: ByteSpan) -> Result<()> {
        if span.end() > self.bytes.len() {
            return Err(RarError::BufferOverrun {
                needed: span.end(),
                have: self.bytes.len(),
            });
        }
        Ok(())
    }

    /// Borrow the bytes covered by `span`.
    pub fn span_bytes(&self, span: ByteSpan) -> Result<&[u8]> {
        self.check(span)?;
        Ok(&self.bytes[span.range()])
    }

    /// Bytes from `offset` to the end of the buffer.
    pub fn tail(&self, offset: usize) -> Result<&[u8]> {
        self.check(ByteSpan::new(offset, 0))?;
        Ok(&self.bytes[offset..])
    }

    pub fn byte(&self, offset: usize) -> Result<u8> {
        self.check(ByteSpan::new(offset, 1))?;
        Ok(self.bytes[offset])
    }

    pub fn set_byte(&mut self, offset: usize, value: u8) -> Result<()> {
        self.check(ByteSpan::new(offset, 1))?;
        self.bytes[offset] = value;
        Ok(())
    }

    /// Read an unsigned little-endian integer of `width` bytes (at most 4).
    pub fn read_le(&self, offset: usize, width: usize) -> Result<u32> {
        debug_assert!(width <= 4);
        let bytes = self.span_bytes(ByteSpan::new(offset, width))?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
    }

    /// Write the low `width` bytes of `value` little-endian at `offset`.
    pub fn write_le(&mut self, offset: usize, width: usize, value: u32) -> Result<()> {
        debug_assert!(width <= 4);
        let span = ByteSpan::new(offset, width);
        self.check(span)?;
        self.bytes[span.range()].copy_from_slice(&value.to_le_bytes()[..width]);
        Ok(())
    }
}

impl From<Vec<u8>> for ArchiveBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for ArchiveBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
