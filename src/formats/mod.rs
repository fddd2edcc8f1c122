//! RAR format detection and signatures.

use std::fmt;

use crate::error::{RarError, Result};

/// RAR header format, selected once from the archive signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// RAR 1.5 to 4.x
    Rar4,
    /// RAR 5.0+
    Rar5,
}

impl FormatVersion {
    pub const RAR4_SIGNATURE: &[u8; 7] = b"Rar!\x1a\x07\x00";
    pub const RAR5_SIGNATURE: &[u8; 8] = b"Rar!\x1a\x07\x01\x00";

    /// Signature length in bytes.
    pub fn signature_len(&self) -> usize {
        match self {
            Self::Rar4 => Self::RAR4_SIGNATURE.len(),
            Self::Rar5 => Self::RAR5_SIGNATURE.len(),
        }
    }

    /// Major version number as shown to users (4 or 5).
    pub fn number(&self) -> u8 {
        match self {
            Self::Rar4 => 4,
            Self::Rar5 => 5,
        }
    }

    /// Identify the format from the first bytes of an archive.
    ///
    /// Never looks past the eighth byte. The two signatures diverge at
    /// byte 6, so at most one of them can match.
    pub fn detect(data: &[u8]) -> Result<Self> {
        if data.starts_with(Self::RAR4_SIGNATURE) {
            Ok(Self::Rar4)
        } else if data.starts_with(Self::RAR5_SIGNATURE) {
            Ok(Self::Rar5)
        } else {
            Err(RarError::NotARarFile)
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAR{}", self.number())
    }
}
