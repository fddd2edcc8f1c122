//! WASM bindings for rar-lock.
//!
//! Browser code reads the archive prefix itself, passes it in, and writes
//! the returned bytes back over the same offsets.

use wasm_bindgen::prelude::*;

use crate::buffer::ArchiveBuffer;
use crate::formats::FormatVersion;
use crate::lock::{inspect, toggle_lock, LockState};

/// Check if a buffer contains a RAR signature.
#[wasm_bindgen]
pub fn is_rar_archive(data: &[u8]) -> bool {
    FormatVersion::detect(data).is_ok()
}

/// Get the RAR format version from a buffer.
/// Returns 4 for RAR 1.5-4.x, 5 for RAR 5.0+, or 0 if not a RAR archive.
#[wasm_bindgen]
pub fn get_rar_version(data: &[u8]) -> u8 {
    FormatVersion::detect(data).map_or(0, |v| v.number())
}

/// Verify the main header and report `{ version, locked }`.
#[wasm_bindgen]
pub fn inspect_lock(data: &[u8]) -> Result<JsValue, JsError> {
    let status = inspect(&ArchiveBuffer::new(data.to_vec()))
        .map_err(|e| JsError::new(&e.to_string()))?;

    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &"version".into(), &JsValue::from(status.version.number()));
    let _ = js_sys::Reflect::set(&obj, &"locked".into(), &JsValue::from_bool(status.state.is_locked()));
    Ok(obj.into())
}

/// Set or clear the lock flag and return the rewritten prefix.
///
/// The result has the same length as `data`; only the checksum field
/// through the flag byte can differ.
#[wasm_bindgen]
pub fn set_lock(data: &[u8], locked: bool) -> Result<Vec<u8>, JsError> {
    let mut buffer = ArchiveBuffer::new(data.to_vec());
    toggle_lock(&mut buffer, LockState::from(locked)).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(buffer.into_inner())
}
