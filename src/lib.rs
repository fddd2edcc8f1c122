//! Lock and unlock RAR archives.
//!
//! A locked archive carries a single bit in its main header that tells
//! compliant tools not to modify it. This crate flips that bit in place and
//! rewrites the header checksum so the archive stays valid.
//!
//! Supports RAR15 (RAR 1.5-4.x) and RAR50 (RAR 5.0+) main headers. Archives
//! with encrypted RAR5 headers are refused.
//!
//! ## Features
//! - `cli` (default) - the `rar-lock` binary
//! - `async` - Async file access with tokio
//! - `wasm` - Browser WASM bindings
//!
//! ## Example
//!
//! ```rust,no_run
//! use rar_lock::{lock_file, LockState};
//!
//! let outcome = lock_file("archive.rar", LockState::Locked)?;
//! println!("{outcome}");
//! # Ok::<(), rar_lock::RarError>(())
//! ```

pub mod buffer;
mod crc32;
pub mod error;
mod file_media;
pub mod formats;
pub mod lock;
pub mod parsing;

#[cfg(feature = "wasm")]
mod wasm_bindings;

pub use buffer::{ArchiveBuffer, ByteSpan};
pub use crc32::crc32;
pub use error::{RarError, Result};
pub use file_media::{lock_file, lock_file_with, lock_stream, LocalArchive, LockOptions};
pub use formats::FormatVersion;
pub use lock::{inspect, toggle_lock, HeaderStatus, LockState, ToggleOutcome};
pub use parsing::HeaderLayout;

#[cfg(feature = "async")]
pub use file_media::lock_file_async;

#[cfg(feature = "wasm")]
pub use wasm_bindings::*;
