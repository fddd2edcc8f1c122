#![no_main]
use libfuzzer_sys::fuzz_target;
use rar_lock::{toggle_lock, ArchiveBuffer, LockState};

fuzz_target!(|data: &[u8]| {
    let Some((&target, rest)) = data.split_first() else {
        return;
    };
    let original = ArchiveBuffer::new(rest.to_vec());
    let mut buffer = original.clone();

    match toggle_lock(&mut buffer, LockState::from(target & 1 != 0)) {
        Ok(outcome) => {
            assert_eq!(buffer.len(), original.len());
            let changed = outcome.write_span().map(|s| s.range());
            for (i, (a, b)) in original.as_bytes().iter().zip(buffer.as_bytes()).enumerate() {
                if a != b {
                    assert!(changed.as_ref().is_some_and(|r| r.contains(&i)));
                }
            }
        }
        Err(_) => assert_eq!(buffer, original),
    }
});
