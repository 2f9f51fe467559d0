//! Benchmarks for DSP primitives and the full engine.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Primitives (oscillator bank, filter, envelope, shaper)
//!   - scenarios/*  Whole-engine blocks with held, legato and stressed notes

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f32 = 48_000.0;

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_envelope,
    dsp::bench_distortion,
    scenarios::bench_engine,
);
criterion_main!(benches);
