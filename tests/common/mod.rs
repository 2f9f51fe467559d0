#![allow(dead_code)]

use monobass::{synth::SynthMessage, BassEngine, BassParams, EngineConfig};

pub const SAMPLE_RATE: f32 = 48_000.0;

pub fn engine() -> BassEngine {
    BassEngine::new(EngineConfig::new(SAMPLE_RATE, 512))
}

/// Render one stereo block, applying `events` first.
pub fn render(engine: &mut BassEngine, params: &BassParams, events: &[SynthMessage], frames: usize) -> (Vec<f32>, Vec<f32>) {
    let mut left = vec![0.0; frames];
    let mut right = vec![0.0; frames];
    let mut rx = events;
    engine.process_block(params, &mut rx, &mut [left.as_mut_slice(), right.as_mut_slice()]);
    (left, right)
}

pub fn note_on(note: u8, velocity: f32) -> SynthMessage {
    SynthMessage::NoteOn { note, velocity }
}

pub fn note_off(note: u8) -> SynthMessage {
    SynthMessage::NoteOff { note }
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

pub fn max_step(samples: &[f32]) -> f32 {
    samples.windows(2).map(|w| (w[1] - w[0]).abs()).fold(0.0, f32::max)
}
