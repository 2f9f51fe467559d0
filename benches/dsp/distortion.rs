//! Benchmarks for the wavefolder and drive stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monobass::dsp::distortion::{wave_fold, DriveStage};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| ((i as f32) * 0.05).sin()).collect();
        let mut buffer = input.clone();

        let drive = DriveStage::new(0.45, 0.5);
        group.bench_with_input(BenchmarkId::new("fold_drive", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = drive.process(wave_fold(x, black_box(0.36)));
                }
                black_box(&buffer);
            })
        });

        group.bench_with_input(BenchmarkId::new("fold_bypass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = drive.process(wave_fold(x, black_box(0.0)));
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
