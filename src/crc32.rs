//! CRC32 calculation for RAR header checksums.
//!
//! Both RAR4 and RAR5 checksum their headers with the standard reflected
//! CRC-32 (polynomial 0xEDB88320). RAR4 stores only the low 16 bits.

/// CRC32 lookup table (polynomial 0xEDB88320)
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB88320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Calculate the CRC32 of `data`.
///
/// Pure and stateless: the same bytes always give the same value.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFFFFFF_u32;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    crc ^ 0xFFFFFFFF
}

/// Truncate a CRC32 to a checksum field of `width` bytes.
pub(crate) fn truncate(crc: u32, width: usize) -> u32 {
    match width {
        0 => 0,
        1..=3 => crc & ((1u32 << (width * 8)) - 1),
        _ => crc,
    }
}
