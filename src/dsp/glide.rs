//! Exponential pitch glide (portamento).
//!
//! Each sample the current frequency moves a fixed fraction of the way to
//! the target:
//!
//! ```text
//!   coeff   = exp(-1 / (max(time, 0.1 ms) * sample_rate))
//!   current = coeff * current + (1 - coeff) * target
//! ```
//!
//! `time` is the time constant: after one time constant 63% of the interval
//! is covered, after five about 99.3%. The result is clamped to
//! [20 Hz, 12 kHz] every sample so the oscillators never see a runaway or
//! ultrasonic frequency.

pub const MIN_FREQUENCY_HZ: f32 = 20.0;
pub const MAX_FREQUENCY_HZ: f32 = 12_000.0;
const MIN_GLIDE_TIME: f32 = 0.0001;

/// One-pole slew coefficient for a time constant in seconds.
#[inline]
pub fn slew_coefficient(time_seconds: f32, sample_rate: f32) -> f32 {
    let t = time_seconds.max(MIN_GLIDE_TIME);
    (-1.0 / (t * sample_rate)).exp()
}

#[derive(Debug, Clone)]
pub struct Glide {
    current: f32,
    target: f32,
    coeff: f32,
}

impl Glide {
    pub fn new(frequency: f32) -> Self {
        let frequency = clamp_frequency(frequency);
        Self {
            current: frequency,
            target: frequency,
            coeff: 0.0,
        }
    }

    /// Recompute the coefficient; called once per block.
    pub fn set_time(&mut self, time_seconds: f32, sample_rate: f32) {
        self.coeff = slew_coefficient(time_seconds, sample_rate);
    }

    pub fn set_target(&mut self, frequency: f32) {
        self.target = frequency;
    }

    /// Jump straight to the target.
    pub fn snap(&mut self) {
        self.current = clamp_frequency(self.target);
    }

    /// Reset both current and target frequency.
    pub fn reset(&mut self, frequency: f32) {
        self.target = frequency;
        self.snap();
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let next = self.coeff * self.current + (1.0 - self.coeff) * self.target;
        self.current = clamp_frequency(next);
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

#[inline]
fn clamp_frequency(frequency: f32) -> f32 {
    if frequency.is_nan() {
        MIN_FREQUENCY_HZ
    } else {
        frequency.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
    }
}
