//! Render a short bass line offline and print level statistics.
//!
//! Run with: cargo run --example offline_bounce
//!
//! No audio device is involved: events go through an `EventBuffer` and the
//! engine renders into preallocated `AudioOutput` buffers, block by block.

use monobass::{
    io::{midi_to_synth, AudioOutput, MidiEvent},
    synth::EventBuffer,
    BassEngine, BassParams, EngineConfig,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 256;
/// Eighth notes at 120 BPM
const NOTE_SAMPLES: usize = 12_000;

fn main() {
    println!("monobass offline bounce");

    let mut engine = BassEngine::new(EngineConfig::new(SAMPLE_RATE, BLOCK));
    let mut params = BassParams::default();
    params.glide = 0.06;

    let mut events = EventBuffer::with_capacity(16);
    let mut output = AudioOutput::new(2, BLOCK);

    // (raw MIDI bytes, sample position); 38 overlaps 36 for a legato slide
    let line: [([u8; 3], usize); 8] = [
        ([0x90, 33, 127], 0),
        ([0x80, 33, 0], NOTE_SAMPLES / 2),
        ([0x90, 36, 70], NOTE_SAMPLES),
        ([0x90, 38, 110], 2 * NOTE_SAMPLES),
        ([0x80, 36, 0], 2 * NOTE_SAMPLES + 10),
        ([0x90, 38, 0], 3 * NOTE_SAMPLES),
        ([0x90, 45, 127], 4 * NOTE_SAMPLES),
        ([0xB0, 123, 0], 5 * NOTE_SAMPLES),
    ];

    let total = 6 * NOTE_SAMPLES;
    let mut position = 0;
    let mut peak = 0.0f32;
    let mut energy = 0.0f64;
    let mut per_note = vec![0.0f32; 6];

    while position < total {
        let frames = BLOCK.min(total - position);
        for &(bytes, at) in &line {
            if (position..position + frames).contains(&at) {
                if let Some(message) = MidiEvent::from_bytes(&bytes).and_then(|e| midi_to_synth(e, None)) {
                    events.push((at - position) as u32, message);
                }
            }
        }

        output.with_channels(frames, |channels| engine.process_block(&params, &mut events, channels));

        for (i, (&l, &r)) in output.buffers[0][..frames].iter().zip(&output.buffers[1][..frames]).enumerate() {
            let level = l.abs().max(r.abs());
            peak = peak.max(level);
            energy += (l as f64).powi(2);
            let slot = (position + i) / NOTE_SAMPLES;
            per_note[slot] = per_note[slot].max(level);
        }
        position += frames;
    }

    println!("Rendered {total} frames at {SAMPLE_RATE} Hz");
    println!("peak {peak:.3}  rms {:.3}", (energy / total as f64).sqrt());
    for (slot, level) in per_note.iter().enumerate() {
        println!("  eighth {slot}: peak {level:.3}");
    }
    println!("final pitch {:.2} Hz, envelope {:?}", engine.current_frequency(), engine.amp_envelope().stage());
}

