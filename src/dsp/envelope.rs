use crate::MIN_TIME;

/*
ADSR Envelope Implementation
============================

Two of these run side by side in the engine: one shapes amplitude, the other
sweeps the filter cutoff.

Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0).

  stage       Which phase of the envelope we're in: Idle, Attack, Decay,
              Sustain, or Release. A state machine governs transitions.

  trigger     Gate high. Starts Attack from the CURRENT level, not from zero.

  release     Gate low. Starts Release from the CURRENT level, whatever the
              stage.

  increment   How much `level` changes per sample, derived from the stage
              time and the sample rate.


The Shape: Linear Ramps
-----------------------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

    attack   level += 1 / (attack * sample_rate)            until 1.0
    decay    level -= (1 - S) / (decay * sample_rate)       until S
    release  level  = start * (1 - elapsed / total)         until 0.0


Retrigger Without Clicks
------------------------

A mono bass retriggers constantly. Snapping the level back to zero on every
note would put a step into the output, so `trigger` keeps the level where it
is and simply climbs from there:

    1.0 ┐     ╱╲            ╱╲
        │    ╱  ╲______    ╱  ╲____
        │   ╱          ╲__╱
    0.0 └──╱──────────────↑──────────→
                     retrigger mid-release

The same rule applies to release: it starts from the current level, so a note
released mid-attack fades from where it got to.


The Filter Envelope
-------------------

The filter envelope has no controls of its own. Its times are derived from the
amplitude envelope (`AdsrParams::filter_envelope`) so it always moves a little
faster and tighter than the amplitude envelope.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,    // Gate low, envelope inactive, level = 0
    Attack,  // Ramping up to 1.0 from wherever the level was
    Decay,   // Reached peak, ramping down to sustain level
    Sustain, // Holding at sustain level while gate is high
    Release, // Gate went low, ramping down to 0
}

/// Stage times in seconds plus the sustain level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl AdsrParams {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Parameters of the filter envelope, scaled from the amplitude envelope.
    pub fn filter_envelope(&self) -> Self {
        Self {
            attack: self.attack * 0.3,
            decay: (self.decay * 0.6).max(0.03),
            sustain: (self.sustain * 0.75).clamp(0.0, 1.0),
            release: (self.release * 0.7).max(0.02),
        }
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self::new(0.003, 0.18, 0.66, 0.21)
    }
}

pub struct Envelope {
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,
    sample_rate: f32,

    stage: EnvelopeStage,
    level: f32,

    // Release bookkeeping (snapshotted at release for an exact landing on 0)
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            attack_time: 0.0,
            decay_time: 0.0,
            sustain_level: 0.0,
            release_time: 0.0,
            sample_rate: sample_rate.max(1.0),

            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        };
        env.set_parameters(AdsrParams::default());
        env
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
    }

    /// Update stage times. Safe to call every block; a release already in
    /// progress keeps the length it started with.
    pub fn set_parameters(&mut self, params: AdsrParams) {
        self.attack_time = params.attack.max(MIN_TIME);
        self.decay_time = params.decay.max(MIN_TIME);
        self.sustain_level = if params.sustain.is_nan() {
            0.0
        } else {
            params.sustain.clamp(0.0, 1.0)
        };
        self.release_time = params.release.max(MIN_TIME);
    }

    /// Gate high: (re)start the attack from the current level.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: start the release phase from the current level.
    pub fn release(&mut self) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * self.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance the envelope by one sample and return the new level.
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += 1.0 / (self.attack_time * self.sample_rate);

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let target = self.sustain_level;
                let decrement = (1.0 - target) / (self.decay_time * self.sample_rate);
                self.level -= decrement;

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeStage::Release => {
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    /// Reset to idle state.
    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn envelope(attack: f32, decay: f32, sustain: f32, release: f32) -> Envelope {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_parameters(AdsrParams::new(attack, decay, sustain, release));
        env
    }

    fn render_samples(env: &mut Envelope, samples: usize) {
        for _ in 0..samples {
            env.next_sample();
        }
    }

    #[test]
    fn attack_reaches_full_level() {
        let mut env = envelope(0.01, 0.1, 0.7, 0.2);

        env.trigger();
        render_samples(&mut env, (0.01 * SAMPLE_RATE) as usize + 1);

        assert!(env.level() > 0.99, "expected attack to reach full level");
        assert_ne!(env.stage(), EnvelopeStage::Attack);
    }

    #[test]
    fn sustain_holds_target_level() {
        let sustain = 0.6;
        let mut env = envelope(0.01, 0.05, sustain, 0.2);

        env.trigger();
        render_samples(&mut env, ((0.01 + 0.05) * SAMPLE_RATE) as usize + 5);

        assert_eq!(env.stage(), EnvelopeStage::Sustain);
        assert!((env.level() - sustain).abs() < 1e-6);
    }

    #[test]
    fn release_falls_back_to_idle() {
        let release = 0.03;
        let mut env = envelope(0.01, 0.05, 0.5, release);

        env.trigger();
        render_samples(&mut env, 20);

        env.release();
        render_samples(&mut env, (release * SAMPLE_RATE) as usize + 2);

        assert!(env.level() <= 0.001, "release should fall back to zero");
        assert_eq!(env.stage(), EnvelopeStage::Idle);
    }

    #[test]
    fn retrigger_continues_from_current_level() {
        let mut env = envelope(0.01, 0.05, 0.5, 0.1);
        env.trigger();
        render_samples(&mut env, 30); // mid-decay
        let before = env.level();
        assert_eq!(env.stage(), EnvelopeStage::Decay);

        env.trigger();
        let after = env.next_sample();

        assert_eq!(env.stage(), EnvelopeStage::Attack);
        assert!(after > before, "attack should climb from {before}, got {after}");
        assert!(after - before <= 1.0 / (0.01 * SAMPLE_RATE) + 1e-6);
    }

    #[test]
    fn release_mid_attack_starts_from_current_level() {
        let mut env = envelope(0.1, 0.05, 0.5, 0.1);
        env.trigger();
        render_samples(&mut env, 20);
        let before = env.level();

        env.release();
        let after = env.next_sample();

        assert_eq!(env.stage(), EnvelopeStage::Release);
        assert!(after < before && before - after < 0.05);
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let mut env = envelope(0.01, 0.05, 0.5, 0.1);
        env.release();
        assert_eq!(env.stage(), EnvelopeStage::Idle);
        assert_eq!(env.next_sample(), 0.0);
    }

    #[test]
    fn filter_envelope_scales_amp_settings() {
        let amp = AdsrParams::new(0.01, 0.02, 0.9, 0.01);
        let filter = amp.filter_envelope();

        assert!((filter.attack - 0.003).abs() < 1e-7);
        assert!((filter.decay - 0.03).abs() < 1e-7, "decay floors at 30 ms");
        assert!((filter.sustain - 0.675).abs() < 1e-6);
        assert!((filter.release - 0.02).abs() < 1e-7, "release floors at 20 ms");

        let long = AdsrParams::new(0.2, 1.0, 1.0, 2.0).filter_envelope();
        assert!((long.decay - 0.6).abs() < 1e-6);
        assert!((long.release - 1.4).abs() < 1e-6);
    }

    #[test]
    fn level_is_continuous_across_stages() {
        let mut env = envelope(0.02, 0.05, 0.4, 0.05);
        let max_step = 1.0 / (0.02 * SAMPLE_RATE) + 1e-6;
        let mut previous = 0.0;

        env.trigger();
        for i in 0..300 {
            if i == 45 {
                env.trigger();
            }
            if i == 150 {
                env.release();
            }
            let level = env.next_sample();
            assert!((level - previous).abs() <= max_step, "jump at sample {i}");
            previous = level;
        }
    }
}
