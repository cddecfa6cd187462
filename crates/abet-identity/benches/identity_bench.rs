// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for FAN resolution and hashing in the abet-identity
// crate. Both run on every QR decode event, so they must stay fast enough
// not to stall the UI thread.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use abet_identity::{fan_hash, resolve_from_scan};

/// Benchmark digit-run extraction across representative payload shapes.
fn bench_resolve_from_scan(c: &mut Criterion) {
    let payloads: &[(&str, &str)] = &[
        ("bare_fan", "987654321"),
        ("url_embedded", "https://id.example.gov/cards/v2/fan/987654321?issued=2023"),
        ("no_digits", "THIS-PAYLOAD-HAS-NO-NUMBER-AT-ALL"),
        ("long_text", "lorem ipsum dolor sit amet 123 consectetur 4567 adipiscing elit 99887766 sed do"),
    ];

    let mut group = c.benchmark_group("resolve_from_scan");
    for &(label, payload) in payloads {
        group.bench_function(label, |b| {
            b.iter(|| resolve_from_scan(black_box(payload)));
        });
    }
    group.finish();
}

/// Benchmark Keccak-256 hashing of typical identifier lengths.
fn bench_fan_hash(c: &mut Criterion) {
    let inputs: &[(&str, &str)] = &[
        ("fan_9_digits", "987654321"),
        ("fan_16_digits", "1234567890123456"),
        ("raw_fallback_payload", "https://id.example.gov/cards/no-numeric-id-here"),
    ];

    let mut group = c.benchmark_group("fan_hash_keccak256");
    for &(label, input) in inputs {
        group.bench_function(label, |b| {
            b.iter(|| fan_hash(black_box(input)).expect("hash failed"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve_from_scan, bench_fan_hash);
criterion_main!(benches);
