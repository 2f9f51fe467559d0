//! Benchmarks for the oscillator bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monobass::dsp::{lfo::Lfo, oscillator::OscillatorBank};
use monobass::BassParams;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let settings = BassParams::default().osc_settings();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut bank = OscillatorBank::new(1);
        let mut lfo = Lfo::new();
        group.bench_with_input(BenchmarkId::new("bank", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    let mod_value = lfo.next_sample(2.8, SAMPLE_RATE);
                    *out = bank.next_sample(black_box(55.0), mod_value, &settings, SAMPLE_RATE);
                }
                black_box(&buffer);
            })
        });

        // Heavy FM exercises the phase wrap on large and negative increments
        let mut heavy = settings;
        heavy.fm_amount = 1.0;
        heavy.fm_ratio = 8.0;
        let mut bank = OscillatorBank::new(1);
        group.bench_with_input(BenchmarkId::new("bank_heavy_fm", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = bank.next_sample(black_box(220.0), 0.5, &heavy, SAMPLE_RATE);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
