//! Variable-length integer (vint) parsing for RAR5.
//!
//! RAR5 uses variable-length integers where each byte contributes 7 bits
//! of data, and the high bit indicates if more bytes follow.
//!
//! Format:
//! - Bits 0-6: Data bits, most significant group first
//! - Bit 7: Continuation flag (1 = more bytes follow)

use crate::error::{RarError, Result};

/// Longest encoding of a `u64`.
const MAX_VINT_LEN: usize = 10;

/// Read a variable-length integer from a byte slice.
/// Returns the value and the number of bytes consumed.
///
/// Fails with [`RarError::BufferOverrun`] if the continuation chain runs
/// off the end of `data`.
#[inline]
pub fn read_vint(data: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;

    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VINT_LEN {
            return Err(RarError::InvalidHeader);
        }

        result = (result << 7) | u64::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }

    // Ran out of bytes without finding end
    Err(RarError::BufferOverrun {
        needed: data.len() + 1,
        have: data.len(),
    })
}

/// Cursor for reading consecutive vints from a buffer.
///
/// Positions are reported relative to `base`, so a reader created over
/// `buf.tail(12)` with base 12 yields absolute archive offsets.
pub struct VintReader<'a> {
    data: &'a [u8],
    base: usize,
    offset: usize,
}

impl<'a> VintReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    pub fn at(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            base,
            offset: 0,
        }
    }

    /// Read the next vint from the buffer.
    #[inline]
    pub fn read(&mut self) -> Result<u64> {
        self.read_with_len().map(|(value, _)| value)
    }

    /// Read the next vint, also returning how many bytes it occupied.
    #[inline]
    pub fn read_with_len(&mut self) -> Result<(u64, usize)> {
        let (value, consumed) = read_vint(&self.data[self.offset..]).map_err(|e| match e {
            RarError::BufferOverrun { needed, .. } => RarError::BufferOverrun {
                needed: self.base + self.offset + needed,
                have: self.base + self.data.len(),
            },
            other => other,
        })?;
        self.offset += consumed;
        Ok((value, consumed))
    }

    /// Skip one vint without caring about its value.
    pub fn skip(&mut self) -> Result<usize> {
        self.read_with_len().map(|(_, len)| len)
    }

    /// Current position, including the base offset.
    pub fn position(&self) -> usize {
        self.base + self.offset
    }

    /// Bytes consumed since the reader was created.
    pub fn consumed(&self) -> usize {
        self.offset
    }
}
