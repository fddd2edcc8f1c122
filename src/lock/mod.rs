//! Lock flag inspection and toggling.
//!
//! [`toggle_lock`] runs the whole in-memory sequence on a header prefix:
//!
//! 1. detect the format from its signature
//! 2. resolve the [`HeaderLayout`]
//! 3. verify the stored checksum against the data span
//! 4. compare the lock bit with the requested state
//! 5. flip the bit, recompute the checksum, and report the bytes to persist
//!
//! Nothing in this module touches the disk; see [`crate::file_media`] for
//! the read and write around it.


use std::fmt;

use tracing::{debug, info};

use crate::buffer::{ArchiveBuffer, ByteSpan};
use crate::crc32::{crc32, truncate};
use crate::error::{RarError, Result};
use crate::formats::FormatVersion;
use crate::parsing::HeaderLayout;

/// Whether the archive is marked as locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockState {
    Unlocked,
    Locked,
}

impl LockState {
    pub fn is_locked(self) -> bool {
        self == Self::Locked
    }
}

impl From<bool> for LockState {
    fn from(locked: bool) -> Self {
        if locked {
            Self::Locked
        } else {
            Self::Unlocked
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlocked => write!(f, "unlocked"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// A validated main header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStatus {
    pub version: FormatVersion,
    pub layout: HeaderLayout,
    pub state: LockState,
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The archive was already in the requested state. Nothing to write.
    Unchanged {
        version: FormatVersion,
        state: LockState,
    },
    /// The flag was flipped; `write_span` holds every changed byte.
    Changed {
        version: FormatVersion,
        state: LockState,
        write_span: ByteSpan,
    },
}

impl ToggleOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    pub fn state(&self) -> LockState {
        match self {
            Self::Unchanged { state, .. } | Self::Changed { state, .. } => *state,
        }
    }

    pub fn write_span(&self) -> Option<ByteSpan> {
        match self {
            Self::Unchanged { .. } => None,
            Self::Changed { write_span, .. } => Some(*write_span),
        }
    }
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged {
                state: LockState::Locked,
                ..
            } => write!(f, "Archive is already locked"),
            Self::Unchanged {
                state: LockState::Unlocked,
                ..
            } => write!(f, "Archive is not locked"),
            Self::Changed { state, .. } => write!(f, "Archive has been {}", state),
        }
    }
}

/// Checksum of the data span, truncated to the stored field width.
fn header_checksum(buffer: &ArchiveBuffer, layout: &HeaderLayout) -> Result<u32> {
    let data = buffer.span_bytes(layout.data)?;
    Ok(truncate(crc32(data), layout.checksum.len))
}

/// Detect, resolve and checksum-verify the main header without changing it.
pub fn inspect(buffer: &ArchiveBuffer) -> Result<HeaderStatus> {
    let version = FormatVersion::detect(buffer.as_bytes())?;
    let layout = HeaderLayout::resolve(version, buffer)?;

    let stored = buffer.read_le(layout.checksum.start, layout.checksum.len)?;
    let computed = header_checksum(buffer, &layout)?;
    if stored != computed {
        debug!(
            %version,
            stored = format_args!("{:#010x}", stored),
            computed = format_args!("{:#010x}", computed),
            "main header checksum mismatch"
        );
        return Err(RarError::HeaderCorrupt { stored, computed });
    }

    let state = LockState::from(buffer.byte(layout.flag_offset)? & layout.flag_mask != 0);
    debug!(%version, ?layout, %state, "main header verified");

    Ok(HeaderStatus {
        version,
        layout,
        state,
    })
}

/// Move the archive's lock flag to `target`, updating `buffer` in place.
///
/// On [`ToggleOutcome::Changed`] the flag byte and checksum field in
/// `buffer` hold their new values and `write_span` names the bytes to
/// persist. On any error `buffer` is left exactly as it was.
pub fn toggle_lock(buffer: &mut ArchiveBuffer, target: LockState) -> Result<ToggleOutcome> {
    let HeaderStatus {
        version,
        layout,
        state,
    } = inspect(buffer)?;

    if state == target {
        return Ok(ToggleOutcome::Unchanged { version, state });
    }

    let flag = buffer.byte(layout.flag_offset)?;
    let flag = match target {
        LockState::Locked => flag | layout.flag_mask,
        LockState::Unlocked => flag & !layout.flag_mask,
    };
    // `buffer` stays untouched until both new values are known
    let mut data = buffer.span_bytes(layout.data)?.to_vec();
    data[layout.flag_offset - layout.data.start] = flag;
    let checksum = truncate(crc32(&data), layout.checksum.len);

    buffer.set_byte(layout.flag_offset, flag)?;
    buffer.write_le(layout.checksum.start, layout.checksum.len, checksum)?;

    let write_span = layout.write_span();
    info!(
        %version,
        state = %target,
        checksum = format_args!("{:#010x}", checksum),
        offset = write_span.start,
        len = write_span.len,
        "lock flag rewritten"
    );

    Ok(ToggleOutcome::Changed {
        version,
        state: target,
        write_span,
    })
}
