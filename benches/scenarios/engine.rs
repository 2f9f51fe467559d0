//! Benchmarks for complete engine blocks.
//!
//! Each case renders through `BassEngine::process_block` with a stereo
//! output, the way a host callback would.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monobass::{synth::SynthMessage, BassEngine, BassParams, EngineConfig, ParamId};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn render(engine: &mut BassEngine, params: &BassParams, events: &[SynthMessage], left: &mut [f32], right: &mut [f32]) {
    let mut rx = events;
    engine.process_block(params, &mut rx, &mut [left, right]);
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];
        let config = EngineConfig::new(SAMPLE_RATE, size);

        // Default patch, one held note
        let params = BassParams::default();
        let mut engine = BassEngine::new(config);
        render(&mut engine, &params, &[SynthMessage::NoteOn { note: 33, velocity: 1.0 }], &mut left, &mut right);
        group.bench_with_input(BenchmarkId::new("held_note", size), &size, |b, _| {
            b.iter(|| render(&mut engine, black_box(&params), &[], &mut left, &mut right))
        });

        // Legato slide every block
        let mut engine = BassEngine::new(config);
        let slide = [
            SynthMessage::NoteOn { note: 36, velocity: 0.6 },
            SynthMessage::NoteOn { note: 38, velocity: 1.0 },
            SynthMessage::NoteOff { note: 36 },
            SynthMessage::NoteOff { note: 38 },
        ];
        group.bench_with_input(BenchmarkId::new("legato", size), &size, |b, _| {
            b.iter(|| render(&mut engine, black_box(&params), &slide, &mut left, &mut right))
        });

        // Everything pushed to the top of its range
        let mut hot = BassParams::default();
        for id in ParamId::ALL {
            hot.set(id, id.range().1);
        }
        let mut engine = BassEngine::new(config);
        render(&mut engine, &hot, &[SynthMessage::NoteOn { note: 45, velocity: 1.0 }], &mut left, &mut right);
        group.bench_with_input(BenchmarkId::new("extreme_patch", size), &size, |b, _| {
            b.iter(|| render(&mut engine, black_box(&hot), &[], &mut left, &mut right))
        });
    }

    group.finish();
}
