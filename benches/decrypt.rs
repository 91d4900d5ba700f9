// benches/decrypt.rs
//! Full decrypt + verify of pre-built vaults of increasing size

#[path = "../tests/common.rs"]
mod common;
use common::{VaultBuilder, SENTINEL, TEST_PASSWORD};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use psafe3::{decrypt_vault, Container, DecryptOptions, RustCrypto};
use std::hint::black_box;

// --- Size constants ---
const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

/// Header sentinel, then entries of five 32-byte text fields until `size` is reached.
fn build_container(size: usize) -> Container {
    let mut builder = VaultBuilder::new().iterations(2048).field(SENTINEL, b"");
    let mut written = 16;
    while written < size {
        for tag in 0x02..=0x06u8 {
            builder = builder.field(tag, &[b'a' + tag; 32]);
            written += 48;
        }
        builder = builder.field(SENTINEL, b"");
        written += 16;
    }
    Container::from_bytes(builder.build().bytes).unwrap()
}

fn bench_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt");
    let options = DecryptOptions::default();

    for &size in &[KB, 64 * KB, MB] {
        // Pre-build once (outside the timed loop)
        let container = build_container(size);

        group.throughput(Throughput::Bytes(container.body().len() as u64));
        group.bench_with_input(
            BenchmarkId::new("size", format_size(size)),
            &size,
            |b, _| {
                b.iter(|| {
                    let vault = decrypt_vault(
                        black_box(&container),
                        TEST_PASSWORD,
                        &options,
                        &RustCrypto,
                    )
                    .unwrap();
                    black_box(vault.field_count())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decrypt);
criterion_main!(benches);
