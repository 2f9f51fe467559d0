//! Benchmarks for the ADSR envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monobass::dsp::{AdsrParams, Envelope};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn envelope(params: AdsrParams) -> Envelope {
    let mut env = Envelope::new(SAMPLE_RATE);
    env.set_parameters(params);
    env
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Retriggered every iteration; a long attack keeps most blocks ramping
        let mut env = envelope(AdsrParams::new(0.25, 0.2, 0.7, 0.3));
        env.trigger();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.trigger();
                env.render(black_box(&mut buffer));
            })
        });

        let mut env = envelope(AdsrParams::new(0.001, 0.02, 0.7, 0.3));
        env.trigger();
        for _ in 0..2_000 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer)))
        });

        let mut env = envelope(AdsrParams::new(0.001, 0.02, 0.7, 2.5));
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.trigger();
                env.next_sample();
                env.release();
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
