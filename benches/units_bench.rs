//! Unit Conversion Benchmarks
//!
//! `parse_units` and `format_units` run on every keystroke-driven quote
//! and on every displayed estimate.
//!
//! Run with: cargo bench --bench units_bench

use alloy::primitives::U256;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use dex_swap_client::domain::units::{format_units, parse_units};

fn bench_parse_units(c: &mut Criterion) {
    c.bench_function("parse_units_whole_18", |b| {
        b.iter(|| parse_units(black_box("1000000"), black_box(18)));
    });

    c.bench_function("parse_units_fraction_18", |b| {
        b.iter(|| parse_units(black_box("1234.567890123456789"), black_box(18)));
    });
}

fn bench_format_units(c: &mut Criterion) {
    let value = U256::from(25_000_000_000_000_000_000u128);
    let odd = U256::from(1_234_567_890_123_456_789u128);

    c.bench_function("format_units_round_18", |b| {
        b.iter(|| format_units(black_box(value), black_box(18)));
    });

    c.bench_function("format_units_fraction_18", |b| {
        b.iter(|| format_units(black_box(odd), black_box(18)));
    });
}

criterion_group!(benches, bench_parse_units, bench_format_units);
criterion_main!(benches);
