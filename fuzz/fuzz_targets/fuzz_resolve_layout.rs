#![no_main]
use libfuzzer_sys::fuzz_target;
use rar_lock::{ArchiveBuffer, FormatVersion, HeaderLayout};

fuzz_target!(|data: &[u8]| {
    let buffer = ArchiveBuffer::new(data.to_vec());

    // Resolve with both layouts regardless of signature
    for version in [FormatVersion::Rar4, FormatVersion::Rar5] {
        if let Ok(layout) = HeaderLayout::resolve(version, &buffer) {
            assert!(layout.data.end() <= data.len());
            assert!(layout.data.contains(layout.flag_offset));
            assert_eq!(layout.checksum.end(), layout.data.start);
        }
    }
});
