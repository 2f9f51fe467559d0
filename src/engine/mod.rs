//! The monophonic bass voice.
//!
//! [`BassEngine`] owns every piece of per-voice state and renders one block at
//! a time. A block runs in three phases:
//!
//! ```text
//!   1. snapshot     params.sanitized(), envelope times, tune, legato
//!   2. events       drain the receiver: note on/off, all notes off
//!   3. samples      glide → lfo → oscillators → fold → drive → amp env
//!                   → stereo filter (filter env + lfo) → bloom → tanh → out
//! ```
//!
//! Events are applied before any audio is generated for the block, so their
//! sample offsets only decide ordering. Nothing in `process_block` allocates,
//! locks or logs.

pub mod config;

pub use config::EngineConfig;

use crate::{
    dsp::{
        amplify::{accent_boost, db_to_gain, velocity_gain},
        bloom::{bloom_amount, Bloom},
        distortion::{soft_clip, wave_fold, DriveStage},
        envelope::Envelope,
        filter::{cutoff_mod_semitones, StereoFilter},
        glide::Glide,
        lfo::Lfo,
        oscillator::OscillatorBank,
    },
    io::converter::midi_note_to_freq,
    patch::BassParams,
    synth::{voice::MAX_NOTE, MessageReceiver, NoteTracker, SynthMessage},
};

use self::config::clamp_sample_rate;

/// Frequency the voice rests at after `prepare`.
pub const REST_FREQUENCY_HZ: f32 = 55.0;

/// Pre-gain applied ahead of the final soft clip.
const OUTPUT_DRIVE: f32 = 0.9;

pub struct BassEngine {
    config: EngineConfig,
    sample_rate: f32,
    max_block_size: usize,

    notes: NoteTracker,
    velocity: f32,
    tune: f32,
    legato: bool,

    glide: Glide,
    amp_env: Envelope,
    filter_env: Envelope,
    oscillators: OscillatorBank,
    lfo: Lfo,
    filter: StereoFilter,
    bloom_l: Bloom,
    bloom_r: Bloom,
}

impl BassEngine {
    pub fn new(config: EngineConfig) -> Self {
        let sample_rate = config.effective_sample_rate();
        let defaults = BassParams::default();

        let mut engine = Self {
            config,
            sample_rate,
            max_block_size: config.max_block_size,
            notes: NoteTracker::new(),
            velocity: 1.0,
            tune: defaults.tune,
            legato: defaults.mono_legato,
            glide: Glide::new(REST_FREQUENCY_HZ),
            amp_env: Envelope::new(sample_rate),
            filter_env: Envelope::new(sample_rate),
            oscillators: OscillatorBank::new(config.noise_seed),
            lfo: Lfo::new(),
            filter: StereoFilter::new(sample_rate),
            bloom_l: Bloom::new(),
            bloom_r: Bloom::new(),
        };
        engine.prepare(config.sample_rate, config.max_block_size);
        engine
    }

    /// Reconfigure and return every piece of state to silence.
    ///
    /// Sample rates below [`MIN_SAMPLE_RATE`](crate::MIN_SAMPLE_RATE) are
    /// raised to it. Phases, filter and bloom state, envelopes and held notes
    /// are all reset, and the pitch rests at 55 Hz.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        let effective = clamp_sample_rate(sample_rate);
        if effective != sample_rate {
            log::warn!("sample rate {sample_rate} Hz below supported floor, using {effective} Hz");
        }

        self.sample_rate = effective;
        self.max_block_size = max_block_size.max(1);
        self.config.sample_rate = effective;
        self.config.max_block_size = self.max_block_size;

        self.amp_env.set_sample_rate(effective);
        self.filter_env.set_sample_rate(effective);
        self.amp_env.reset();
        self.filter_env.reset();

        self.filter.set_sample_rate(effective);
        self.filter.reset();
        self.bloom_l.reset();
        self.bloom_r.reset();

        self.oscillators.reset();
        self.lfo.reset();
        self.glide.reset(REST_FREQUENCY_HZ);
        self.notes.clear();

        log::debug!(
            "bass engine prepared: {} Hz, max block {} samples",
            self.sample_rate,
            self.max_block_size
        );
    }

    /// Counterpart to `prepare` for hosts that tear down between runs. The
    /// engine holds no external resources, so there is nothing to free.
    pub fn release(&mut self) {}

    /// Render one block.
    ///
    /// `channels[0]` receives the left signal and `channels[1]` the right;
    /// a mono layout gets the left signal only. Any further channels are
    /// silenced. The block length is the shortest channel slice.
    pub fn process_block<R>(&mut self, params: &BassParams, events: &mut R, channels: &mut [&mut [f32]])
    where
        R: MessageReceiver + ?Sized,
    {
        let params = params.sanitized();

        let amp_adsr = params.amp_envelope();
        self.amp_env.set_parameters(amp_adsr);
        self.filter_env.set_parameters(amp_adsr.filter_envelope());
        self.tune = params.tune;
        self.legato = params.mono_legato;

        while let Some(message) = events.pop() {
            self.handle_message(message);
        }

        let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        for channel in channels.iter_mut().skip(2) {
            channel.fill(0.0);
        }
        if frames == 0 {
            return;
        }

        let sample_rate = self.sample_rate;
        self.glide.set_time(params.glide, sample_rate);

        let settings = params.osc_settings();
        let output_gain = db_to_gain(params.output_db);
        let accent = accent_boost(self.velocity, params.accent);
        let drive = DriveStage::new(params.drive, accent);
        let level = velocity_gain(self.velocity, accent);
        let bloom = bloom_amount(params.sub, params.drive);

        let (outputs, _) = channels.split_at_mut(channels.len().min(2));
        for frame in 0..frames {
            let frequency = self.glide.next_sample();
            let lfo = self.lfo.next_sample(params.lfo_rate, sample_rate);

            let voice = self.oscillators.next_sample(frequency, lfo, &settings, sample_rate);
            let voice = drive.process(wave_fold(voice, params.fold));

            let amp = self.amp_env.next_sample();
            let filter_env = self.filter_env.next_sample();

            let modulation = cutoff_mod_semitones(params.env_amount, accent, filter_env, lfo, params.lfo_to_cutoff);
            self.filter
                .modulate(params.cutoff, modulation, params.stereo, lfo, params.resonance);

            let (left, right) = self.filter.next_sample(voice * amp * level);
            let left = self.bloom_l.process(left, bloom);
            let right = self.bloom_r.process(right, bloom);

            let left = soft_clip(left * OUTPUT_DRIVE) * output_gain;
            let right = soft_clip(right * OUTPUT_DRIVE) * output_gain;

            match outputs {
                [l] => l[frame] = left,
                [l, r] => {
                    l[frame] = left;
                    r[frame] = right;
                }
                _ => {}
            }
        }
    }

    pub fn handle_message(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn { note, velocity } => self.note_on(note, velocity),
            SynthMessage::NoteOff { note } => self.note_off(note),
            SynthMessage::AllNotesOff | SynthMessage::AllSoundOff => self.all_notes_off(),
        }
    }

    /// Press a note: it becomes the sounding note.
    ///
    /// A silent voice jumps straight to the new pitch and triggers both
    /// envelopes. A sounding voice retriggers unless legato is on and another
    /// note is still held, in which case only the pitch glides.
    pub fn note_on(&mut self, note: u8, velocity: f32) {
        if note > MAX_NOTE {
            return;
        }
        let others_held = self.notes.press(note);
        self.velocity = if velocity.is_nan() {
            0.0
        } else {
            velocity.clamp(0.0, 1.0)
        };
        self.glide.set_target(self.note_frequency(note));

        if !self.amp_env.is_active() {
            self.glide.snap();
            self.trigger_envelopes();
        } else if !self.legato || !others_held {
            self.trigger_envelopes();
        }
    }

    /// Release a note. Unknown notes are ignored; releasing the last held
    /// note releases both envelopes, otherwise the pitch returns to the most
    /// recent remaining note.
    pub fn note_off(&mut self, note: u8) {
        if !self.notes.release(note) {
            return;
        }
        if self.notes.is_empty() {
            self.release_envelopes();
        } else {
            self.retarget();
        }
    }

    pub fn all_notes_off(&mut self) {
        self.notes.clear();
        self.release_envelopes();
    }

    /// Take over a bulk-restored parameter set.
    ///
    /// The new tune applies to the currently held note through the glide, so
    /// the pitch moves smoothly instead of jumping.
    pub fn apply_restored_params(&mut self, params: &BassParams) {
        let params = params.sanitized();
        self.tune = params.tune;
        self.legato = params.mono_legato;
        self.retarget();
        log::debug!(
            "restored parameters: tune {} st, legato {}, {} held notes",
            self.tune,
            self.legato,
            self.notes.len()
        );
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn current_frequency(&self) -> f32 {
        self.glide.current()
    }

    pub fn target_frequency(&self) -> f32 {
        self.glide.target()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn held_notes(&self) -> &[u8] {
        self.notes.notes()
    }

    pub fn amp_envelope(&self) -> &Envelope {
        &self.amp_env
    }

    pub fn filter_envelope(&self) -> &Envelope {
        &self.filter_env
    }

    /// (left, right) cutoffs set for the last rendered sample.
    pub fn filter_cutoffs(&self) -> (f32, f32) {
        self.filter.cutoffs()
    }

    pub fn filter_resonance(&self) -> f32 {
        self.filter.resonance()
    }

    fn note_frequency(&self, note: u8) -> f32 {
        midi_note_to_freq(note) * 2.0_f32.powf(self.tune / 12.0)
    }

    fn retarget(&mut self) {
        if let Some(note) = self.notes.active_note() {
            self.glide.set_target(self.note_frequency(note));
        }
    }

    fn trigger_envelopes(&mut self) {
        self.amp_env.trigger();
        self.filter_env.trigger();
    }

    fn release_envelopes(&mut self) {
        self.amp_env.release();
        self.filter_env.release();
    }
}

impl Default for BassEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
