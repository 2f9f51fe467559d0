mod common;

use common::*;
use monobass::{
    dsp::{
        amplify::db_to_gain,
        filter::{MAX_CUTOFF_HZ, MAX_RESONANCE, MIN_CUTOFF_HZ, MIN_RESONANCE},
        EnvelopeStage,
    },
    synth::SynthMessage,
    BassEngine, BassParams, EngineConfig, ParamId, SharedParams,
};

#[test]
fn a1_attack_rises_to_full_level() {
    let mut engine = engine();
    let params = BassParams::default();
    let attack_samples = (params.attack * SAMPLE_RATE).ceil() as usize;

    let mut output = Vec::new();
    let mut env = Vec::new();
    let frames = (0.01 * SAMPLE_RATE) as usize;
    for i in 0..frames {
        let events = if i == 0 { vec![note_on(33, 1.0)] } else { Vec::new() };
        let (left, _) = render(&mut engine, &params, &events, 1);
        output.push(left[0]);
        env.push(engine.amp_envelope().level());
    }

    assert!(output[0].abs() < 0.05, "starts near silence: {}", output[0]);
    let peak = env.iter().position(|&level| level == 1.0).unwrap();
    assert!(peak <= attack_samples + 1, "full level at sample {peak}");
    assert!(env[..=peak].windows(2).all(|w| w[1] >= w[0]));

    let window = attack_samples / 3;
    let rises: Vec<f32> = (0..3).map(|w| rms(&output[w * window..(w + 1) * window])).collect();
    assert!(rises[0] < rises[1] && rises[1] < rises[2], "rms {rises:?}");

    let settled = rms(&output[attack_samples..frames]);
    assert!(settled > rises[0] * 2.0, "body {settled} vs onset {}", rises[0]);
}

#[test]
fn envelope_is_continuous_across_every_stage() {
    let mut engine = engine();
    let mut params = BassParams::default();
    params.mono_legato = false;
    let max_increment = 1.0 / (params.attack * SAMPLE_RATE) + 1e-4;

    let mut levels = Vec::new();
    let mut step = |engine: &mut BassEngine, events: &[SynthMessage], count: usize| {
        for i in 0..count {
            let events: &[SynthMessage] = if i == 0 { events } else { &[] };
            render(engine, &params, events, 1);
            levels.push(engine.amp_envelope().level());
        }
    };

    step(&mut engine, &[note_on(36, 1.0)], 400); // attack → decay
    assert_eq!(engine.amp_envelope().stage(), EnvelopeStage::Decay);
    step(&mut engine, &[note_on(38, 1.0)], 12_000); // retrigger mid-decay → sustain
    assert_eq!(engine.amp_envelope().stage(), EnvelopeStage::Sustain);
    step(&mut engine, &[note_off(36), note_off(38)], 200); // release
    step(&mut engine, &[note_on(40, 1.0)], 200); // retrigger mid-release
    step(&mut engine, &[note_off(40)], 12_000); // release to idle
    assert_eq!(engine.amp_envelope().stage(), EnvelopeStage::Idle);

    let jump = max_step(&levels);
    assert!(jump <= max_increment, "largest step {jump} > {max_increment}");
}

#[test]
fn legato_transition_has_no_discontinuity() {
    let mut engine = engine();
    let params = BassParams::default();

    let (before, _) = render(&mut engine, &params, &[note_on(36, 1.0)], 2_400);
    let f36 = engine.current_frequency();
    assert!((f36 - 65.406).abs() < 0.01);
    let natural = max_step(&before[1_200..]);

    let (after, _) = render(&mut engine, &params, &[note_on(38, 1.0)], 1);
    let jump = (after[0] - before[before.len() - 1]).abs();
    assert!(jump <= natural * 1.5 + 1e-4, "transition {jump} vs natural {natural}");
    assert_ne!(engine.amp_envelope().stage(), EnvelopeStage::Attack);

    let f = engine.current_frequency();
    assert!(f > f36 && f < 66.0, "glide starts from the old pitch: {f}");

    render(&mut engine, &params, &[], 6_000);
    assert!((engine.current_frequency() - 73.416).abs() < 0.1);
}

#[test]
fn cutoff_and_resonance_stay_clamped() {
    let mut hot = BassParams::default();
    hot.cutoff = 14_000.0;
    hot.env_amount = 1.0;
    hot.accent = 1.0;
    hot.lfo_to_cutoff = 1.0;
    hot.lfo_rate = 24.0;
    hot.stereo = 1.0;
    hot.resonance = 5.0; // out of range on purpose

    let mut cold = hot;
    cold.cutoff = 30.0;
    cold.env_amount = -1.0;
    cold.resonance = -3.0;

    for (params, resonance) in [(hot, MAX_RESONANCE), (cold, MIN_RESONANCE)] {
        let mut engine = engine();
        render(&mut engine, &params, &[note_on(60, 1.0)], 0);
        for _ in 0..4_000 {
            render(&mut engine, &params, &[], 1);
            let (l, r) = engine.filter_cutoffs();
            for cutoff in [l, r] {
                assert!((MIN_CUTOFF_HZ..=MAX_CUTOFF_HZ).contains(&cutoff), "cutoff {cutoff}");
            }
            assert_eq!(engine.filter_resonance(), resonance);
        }
    }
}

#[test]
fn zero_stereo_collapses_to_mono() {
    let mut engine = engine();
    let mut params = BassParams::default();
    params.stereo = 0.0;

    let (left, right) = render(&mut engine, &params, &[note_on(36, 1.0)], 4_096);
    assert_eq!(left, right);

    params.stereo = 1.0;
    let (left, right) = render(&mut engine, &params, &[], 4_096);
    assert_ne!(left, right);
}

#[test]
fn randomized_stress_stays_finite_and_bounded() {
    let mut rng = oorandom::Rand32::new(0x5eed);
    let mut engine = engine();
    let block = 256;
    let blocks = (4.0 * SAMPLE_RATE) as usize / block;
    let mut any_sound = false;

    for _ in 0..blocks {
        let mut params = BassParams::default();
        for id in ParamId::ALL {
            let (min, max) = id.range();
            params.set(id, min + rng.rand_float() * (max - min));
        }

        let mut events = Vec::new();
        match rng.rand_range(0..6) {
            0 | 1 => events.push(note_on(rng.rand_range(24..72) as u8, rng.rand_float())),
            2 => events.push(note_off(rng.rand_range(24..72) as u8)),
            3 if rng.rand_range(0..8) == 0 => events.push(SynthMessage::AllNotesOff),
            _ => {}
        }

        let (left, right) = render(&mut engine, &params, &events, block);
        let limit = db_to_gain(params.output_db) * 1.2;
        for &s in left.iter().chain(&right) {
            assert!(s.is_finite(), "non-finite sample with {params:?}");
            assert!(s.abs() <= limit, "sample {s} over {limit} with {params:?}");
            any_sound |= s != 0.0;
        }
    }
    assert!(any_sound);
}

#[test]
fn non_finite_parameters_fall_back_to_defaults() {
    let mut broken = BassParams::default();
    broken.cutoff = f32::NAN;
    broken.output_db = f32::INFINITY;
    broken.glide = f32::NEG_INFINITY;
    broken.fm_ratio = f32::NAN;

    let mut engine = engine();
    let (left, right) = render(&mut engine, &broken, &[note_on(36, 1.0)], 2_048);
    assert!(left.iter().chain(&right).all(|s| s.is_finite()));
    assert!(left.iter().all(|s| s.abs() <= db_to_gain(6.0)));
}

#[test]
fn low_sample_rates_are_raised_and_stable() {
    let mut engine = BassEngine::new(EngineConfig::new(2_000.0, 128));
    assert_eq!(engine.sample_rate(), monobass::MIN_SAMPLE_RATE);

    let mut params = BassParams::default();
    params.cutoff = 14_000.0;
    params.fm_amount = 1.0;
    params.fm_ratio = 8.0;
    let (left, right) = render(&mut engine, &params, &[note_on(100, 1.0)], 8_000);
    assert!(left.iter().chain(&right).all(|s| s.is_finite() && s.abs() <= 1.0));
}

#[test]
fn mono_output_is_supported() {
    let mut engine = engine();
    let mut mono = vec![0.0; 512];
    let mut rx: &[SynthMessage] = &[note_on(33, 1.0)];
    engine.process_block(&BassParams::default(), &mut rx, &mut [mono.as_mut_slice()]);
    assert!(mono.iter().any(|s| *s != 0.0));
}

#[test]
fn renders_from_shared_params_while_another_thread_writes() {
    use std::{sync::Arc, thread};

    let shared = Arc::new(SharedParams::new());
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for i in 0..2_000 {
                shared.set(ParamId::Cutoff, 100.0 + (i % 50) as f32 * 200.0);
                shared.set(ParamId::Drive, (i % 10) as f32 / 10.0);
            }
        })
    };

    let mut engine = engine();
    render(&mut engine, &shared.snapshot(), &[note_on(40, 1.0)], 64);
    for _ in 0..200 {
        let (left, _) = render(&mut engine, &shared.snapshot(), &[], 64);
        assert!(left.iter().all(|s| s.is_finite()));
    }
    writer.join().unwrap();
}
