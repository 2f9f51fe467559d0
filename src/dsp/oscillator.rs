use std::f32::consts::TAU;

use super::{distortion::soft_clip, mix::crossfade};

/*
Oscillator Bank
===============

Three phase accumulators and a noise source build the raw voice:

    fm    sine at frequency * fm_ratio (ratio-locked modulator)
    main  saw/pulse crossfade at frequency + sin(fm) * fm_amount * 600 Hz
    sub   sine at frequency / 2, crossfaded with a tanh-saturated copy
    noise uniform white noise from a seeded generator

    voice = main * (1 - 0.9 * sub) + sub_osc * (1.08 * sub) + noise * amount

Raising `sub` pulls the main oscillator down while the sub comes up, so the
sum stays at a similar level as the fundamental is emphasised.

Every waveform is read from the current phase first; phases advance after, so
the first sample after a reset starts at phase zero.
*/

/// Phase accumulator wrapped into [0, 2π).
#[derive(Debug, Clone, Copy, Default)]
pub struct Phase(f32);

impl Phase {
    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Position within the cycle, in [0, 1).
    #[inline]
    pub fn normalized(&self) -> f32 {
        self.0 / TAU
    }

    #[inline]
    pub fn advance(&mut self, increment: f32) {
        let next = self.0 + increment;
        self.0 = if (0.0..TAU).contains(&next) {
            next
        } else {
            let wrapped = next.rem_euclid(TAU);
            // rem_euclid can round up to TAU itself for tiny negative inputs
            if wrapped.is_finite() && wrapped < TAU {
                wrapped
            } else {
                0.0
            }
        };
    }

    pub fn reset(&mut self) {
        self.0 = 0.0;
    }
}

/// Seeded white noise, bipolar.
pub struct NoiseSource {
    rng: oorandom::Rand32,
    seed: u64,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: oorandom::Rand32::new(seed),
            seed,
        }
    }

    /// Restart the stream from the original seed.
    pub fn reseed(&mut self) {
        self.rng = oorandom::Rand32::new(self.seed);
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.rng.rand_float() * 2.0 - 1.0
    }
}

/// Per-block oscillator settings, read from the parameter snapshot.
#[derive(Debug, Clone, Copy)]
pub struct OscSettings {
    pub osc_mix: f32,
    pub sub: f32,
    pub fm_amount: f32,
    pub fm_ratio: f32,
    pub noise: f32,
}

/// Pulse duty cycle moved by the LFO; deeper with more FM.
#[inline]
pub fn pulse_width(lfo: f32, fm_amount: f32) -> f32 {
    (0.49 + 0.18 * lfo * (0.2 + fm_amount)).clamp(0.12, 0.88)
}

pub struct OscillatorBank {
    main: Phase,
    sub: Phase,
    fm: Phase,
    noise: NoiseSource,
}

impl OscillatorBank {
    pub fn new(seed: u64) -> Self {
        Self {
            main: Phase::default(),
            sub: Phase::default(),
            fm: Phase::default(),
            noise: NoiseSource::new(seed),
        }
    }

    /// Produce one raw voice sample at `frequency` Hz.
    pub fn next_sample(&mut self, frequency: f32, lfo: f32, settings: &OscSettings, sample_rate: f32) -> f32 {
        let fm_hz = self.fm.value().sin() * (settings.fm_amount * 600.0);

        let phase_norm = self.main.normalized();
        let saw = 2.0 * phase_norm - 1.0;
        let pulse = if phase_norm < pulse_width(lfo, settings.fm_amount) {
            1.0
        } else {
            -1.0
        };
        let main = crossfade(settings.osc_mix, saw, pulse);

        let sub_pure = self.sub.value().sin();
        let sub_saturated = soft_clip(sub_pure * (1.7 + settings.sub * 0.9));
        let sub = crossfade(0.34 + settings.sub * 0.5, sub_pure, sub_saturated);

        let noise = self.noise.next_sample() * settings.noise;

        let voice = main * (1.0 - settings.sub * 0.9) + sub * (settings.sub * 1.08) + noise;

        let to_increment = TAU / sample_rate;
        self.main.advance((frequency + fm_hz) * to_increment);
        self.sub.advance(frequency * 0.5 * to_increment);
        self.fm.advance(frequency * settings.fm_ratio * to_increment);

        voice
    }

    /// Zero all phases and restart the noise stream.
    pub fn reset(&mut self) {
        self.main.reset();
        self.sub.reset();
        self.fm.reset();
        self.noise.reseed();
    }

    /// (main, sub, fm) phases in radians.
    pub fn phases(&self) -> (f32, f32, f32) {
        (self.main.value(), self.sub.value(), self.fm.value())
    }
}
