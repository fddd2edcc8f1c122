//! Benchmarks for header resolution and lock toggling.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rar_lock::{crc32, inspect, toggle_lock, ArchiveBuffer, LockState};

/// Unlocked RAR4 main header.
const RAR4_HEADER: [u8; 20] = [
    0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00, 0xCF, 0x90, 0x73, 0x00, 0x00, 0x0D, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];

/// Unlocked RAR5 main header with a locator extra area.
const RAR5_HEADER: [u8; 23] = [
    0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01, 0x00, 0x33, 0x92, 0xB5, 0xE5, 0x0A, 0x01, 0x05, 0x06,
    0x00, 0x05, 0x01, 0x01, 0x80, 0x80, 0x00,
];

fn bench_crc32(c: &mut Criterion) {
    let data: Vec<u8> = (0..256u32).map(|i| i as u8).collect();
    let mut group = c.benchmark_group("crc32");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("256_bytes", |b| b.iter(|| crc32(black_box(&data))));
    group.finish();
}

fn bench_inspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect");
    for (name, header) in [("rar4", &RAR4_HEADER[..]), ("rar5", &RAR5_HEADER[..])] {
        let buffer = ArchiveBuffer::new(header.to_vec());
        group.bench_function(name, |b| b.iter(|| inspect(black_box(&buffer))));
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle");
    for (name, header) in [("rar4", &RAR4_HEADER[..]), ("rar5", &RAR5_HEADER[..])] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || ArchiveBuffer::new(header.to_vec()),
                |mut buffer| toggle_lock(&mut buffer, LockState::Locked),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_crc32, bench_inspect, bench_toggle);
criterion_main!(benches);
