//! Low-end bloom.
//!
//! A slow one-pole low-pass follows the filtered signal; its saturated output
//! is added back on top, thickening the fundamental like a gentle low shelf.
//!
//! ```text
//!   state += 0.030 * (input - state)
//!   out    = input + tanh(state * 2.4) * amount
//!   amount = (0.14 + 0.34 * sub) * (1 + 0.24 * drive)
//! ```
//!
//! The coefficient is fixed: at 44.1-48 kHz it puts the follower corner
//! a little above 200 Hz, right under a bass line.

use super::distortion::soft_clip;

pub const BLOOM_COEFF: f32 = 0.030;

/// How much bloom to add back, from the sub and drive controls.
#[inline]
pub fn bloom_amount(sub: f32, drive: f32) -> f32 {
    (0.14 + 0.34 * sub) * (1.0 + 0.24 * drive)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Bloom {
    state: f32,
}

impl Bloom {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, input: f32, amount: f32) -> f32 {
        self.state += BLOOM_COEFF * (input - self.state);
        input + soft_clip(self.state * 2.4) * amount
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    pub fn state(&self) -> f32 {
        self.state
    }
}
