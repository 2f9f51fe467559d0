//! Step sequencer - sample-accurate acid pattern playback
//!
//! Runs in the audio callback. Each block it walks the step grid sample by
//! sample and pushes note events, tagged with their offset, into the
//! engine's event buffer.
//!
//! Plain steps gate for half a step. A slide step holds its note into the
//! next step, whose note-on is pushed *before* the held note-off at the
//! same offset, so the engine sees overlapping notes and glides legato.

use monobass::synth::{EventBuffer, SynthMessage};

pub const STEPS: usize = 16;

const NORMAL_VELOCITY: f32 = 0.55;
const ACCENT_VELOCITY: f32 = 1.0;
const GATE_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step {
    pub note: Option<u8>,
    pub accent: bool,
    pub slide: bool,
}

impl Step {
    pub const fn note(note: u8) -> Self {
        Self {
            note: Some(note),
            accent: false,
            slide: false,
        }
    }

    pub const fn rest() -> Self {
        Self {
            note: None,
            accent: false,
            slide: false,
        }
    }

    pub const fn accent(mut self) -> Self {
        self.accent = true;
        self
    }

    pub const fn slide(mut self) -> Self {
        self.slide = true;
        self
    }

    fn velocity(&self) -> f32 {
        if self.accent {
            ACCENT_VELOCITY
        } else {
            NORMAL_VELOCITY
        }
    }
}

pub struct Sequencer {
    pattern: [Step; STEPS],
    /// Samples per sixteenth note
    samples_per_step: f64,
    /// Samples elapsed in the current step
    position: f64,
    step: usize,
    step_started: bool,
    sounding: Option<u8>,
    /// Samples until the sounding note is released; `None` while sliding
    gate_left: Option<u64>,
    playing: bool,
}

impl Sequencer {
    pub fn new(pattern: [Step; STEPS], bpm: f64, sample_rate: f64) -> Self {
        Self {
            pattern,
            samples_per_step: samples_per_step(bpm, sample_rate),
            position: 0.0,
            step: 0,
            step_started: false,
            sounding: None,
            gate_left: None,
            playing: true,
        }
    }

    /// Push this block's note events into `events`.
    pub fn render(&mut self, frames: usize, events: &mut EventBuffer) {
        if !self.playing {
            return;
        }

        for offset in 0..frames as u32 {
            if !self.step_started {
                self.start_step(offset, events);
                self.step_started = true;
            }

            if let Some(left) = self.gate_left.as_mut() {
                if *left == 0 {
                    self.gate_left = None;
                    if let Some(note) = self.sounding.take() {
                        events.push(offset, SynthMessage::NoteOff { note });
                    }
                } else {
                    *left -= 1;
                }
            }

            self.position += 1.0;
            if self.position >= self.samples_per_step {
                self.position -= self.samples_per_step;
                self.step = (self.step + 1) % STEPS;
                self.step_started = false;
            }
        }
    }

    fn start_step(&mut self, offset: u32, events: &mut EventBuffer) {
        let step = self.pattern[self.step];
        let previous = self.sounding;
        let tied = previous.is_some() && self.gate_left.is_none();

        match step.note {
            Some(note) => {
                if !(tied && previous == Some(note)) {
                    events.push(
                        offset,
                        SynthMessage::NoteOn {
                            note,
                            velocity: step.velocity(),
                        },
                    );
                }
                if let Some(held) = previous.filter(|&held| held != note) {
                    events.push(offset, SynthMessage::NoteOff { note: held });
                }
                self.sounding = Some(note);
                self.gate_left = (!step.slide).then(|| self.gate_samples());
            }
            None => {
                if let Some(held) = self.sounding.take() {
                    events.push(offset, SynthMessage::NoteOff { note: held });
                }
                self.gate_left = None;
            }
        }
    }

    fn gate_samples(&self) -> u64 {
        ((self.samples_per_step * GATE_FRACTION) as u64).max(1)
    }

    /// Stop or resume. Stopping silences the engine on the next block.
    pub fn toggle(&mut self, events: &mut EventBuffer) {
        self.playing = !self.playing;
        if !self.playing {
            self.silence(events);
        }
    }

    /// Back to step one.
    pub fn reset(&mut self, events: &mut EventBuffer) {
        self.position = 0.0;
        self.step = 0;
        self.step_started = false;
        self.silence(events);
    }

    fn silence(&mut self, events: &mut EventBuffer) {
        self.sounding = None;
        self.gate_left = None;
        events.push(0, SynthMessage::AllNotesOff);
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

fn samples_per_step(bpm: f64, sample_rate: f64) -> f64 {
    // four sixteenths per beat
    (sample_rate * 60.0 / bpm.max(1.0) / 4.0).max(1.0)
}
