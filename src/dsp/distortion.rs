//! Nonlinear shaping: soft clip, wavefolder and the drive stage.
//!
//! The voice passes through the folder first, then the drive stage:
//!
//! ```text
//!   raw voice ──► fold(x, amount) ──► tanh(x * gain) * trim ──► envelope/filter
//! ```
//!
//! # Soft Clip
//!
//! `tanh` is used everywhere the engine saturates: sub oscillator, drive,
//! bloom and the final output stage. It is smooth, odd-symmetric and bounded
//! to (-1, 1), which is what keeps the output bounded for any input.
//!
//! # Wavefolding
//!
//! Instead of flattening peaks, a folder reflects them back down. Here the
//! fold is a sine transfer function whose slope grows with the amount:
//!
//! ```text
//!   folded = sin(x * (1 + 4 * amount) * π/2)
//!   out    = x + amount * (folded - x)
//! ```
//!
//! At amount 0 the folder is bypassed; at amount 1 the input sweeps several
//! half-periods of the sine, adding bright, metallic partials.
//!
//! # Drive
//!
//! ```text
//!   gain = 1 + 15 * drive * (1 + 0.5 * accent)
//!   trim = 1 / sqrt(max(1, gain))
//! ```
//!
//! The trim keeps perceived loudness roughly level as drive goes up: more
//! gain pushes tanh further into saturation, and the square-root trim pulls
//! the result back down.

use std::f32::consts::FRAC_PI_2;

/// Below this amount the folder passes the signal through untouched.
const FOLD_BYPASS: f32 = 0.001;

/// Smooth saturation, bounded to (-1, 1).
#[inline]
pub fn soft_clip(sample: f32) -> f32 {
    sample.tanh()
}

/// Sine wavefolder blended with the dry signal by `amount`.
#[inline]
pub fn wave_fold(sample: f32, amount: f32) -> f32 {
    if amount <= FOLD_BYPASS {
        return sample;
    }

    let drive = 1.0 + amount * 4.0;
    let folded = (sample * drive * FRAC_PI_2).sin();
    sample + amount * (folded - sample)
}

/// Saturating drive with loudness trim. Gain and trim are fixed per block.
#[derive(Debug, Clone, Copy)]
pub struct DriveStage {
    gain: f32,
    trim: f32,
}

impl DriveStage {
    pub fn new(drive: f32, accent_boost: f32) -> Self {
        let gain = 1.0 + 15.0 * drive * (1.0 + 0.5 * accent_boost);
        Self {
            gain,
            trim: 1.0 / gain.max(1.0).sqrt(),
        }
    }

    #[inline]
    pub fn process(&self, sample: f32) -> f32 {
        soft_clip(sample * self.gain) * self.trim
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn trim(&self) -> f32 {
        self.trim
    }
}
