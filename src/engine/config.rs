#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MAX_BLOCK_SIZE, MIN_SAMPLE_RATE};

/// Seed used when none is configured, so renders are reproducible by default.
pub const DEFAULT_NOISE_SEED: u64 = 0x6d6f_6e6f_6261_7373;

/// Construction-time settings for [`BassEngine`](super::BassEngine).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub max_block_size: usize,
    pub noise_seed: u64,
}

impl EngineConfig {
    pub fn new(sample_rate: f32, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            ..Self::default()
        }
    }

    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = seed;
        self
    }

    /// Sample rate after applying the lower bound. NaN maps to the floor.
    pub fn effective_sample_rate(&self) -> f32 {
        clamp_sample_rate(self.sample_rate)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: MAX_BLOCK_SIZE,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }
}

pub(crate) fn clamp_sample_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() {
        sample_rate.max(MIN_SAMPLE_RATE)
    } else {
        MIN_SAMPLE_RATE
    }
}
