//! Benchmarks for the state-variable low-pass and its stereo pair.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monobass::dsp::filter::{cutoff_mod_semitones, SVFilter, StereoFilter};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size).map(|i| (i as f32 / size as f32) * 2.0 - 1.0).collect();

        // Fixed coefficients
        let mut filter = SVFilter::lowpass(400.0, SAMPLE_RATE);
        filter.set_resonance(0.6);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Coefficients recomputed every sample, as the engine does
        let mut stereo = StereoFilter::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("stereo_modulated", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0;
                for (i, &x) in input.iter().enumerate() {
                    let env = i as f32 / size as f32;
                    let lfo = 1.0 - 2.0 * env;
                    let semis = cutoff_mod_semitones(0.72, 0.3, env, lfo, 0.22);
                    stereo.modulate(220.0, semis, 0.25, lfo, 0.28);
                    let (l, r) = stereo.next_sample(x);
                    acc += l + r;
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
