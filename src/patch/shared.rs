use std::sync::atomic::{AtomicU32, Ordering};

use super::{BassParams, ParamId, ParamSource};
use crate::PARAM_COUNT;

/// Lock-free parameter store shared between a control thread and the audio
/// thread.
///
/// Each value is an `f32` bit pattern in its own `AtomicU32`. Reads and writes
/// are relaxed: the audio thread may see a mix of old and new values for one
/// block, never a torn float. A non-finite cell reads as unavailable.
pub struct SharedParams {
    values: [AtomicU32; PARAM_COUNT],
}

impl SharedParams {
    pub fn new() -> Self {
        Self::from_params(&BassParams::default())
    }

    pub fn from_params(params: &BassParams) -> Self {
        let values = params.to_values();
        Self {
            values: std::array::from_fn(|i| AtomicU32::new(values[i].to_bits())),
        }
    }

    /// Store a raw value; clamping happens when the snapshot is read.
    pub fn set(&self, id: ParamId, value: f32) {
        self.values[id.index()].store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Relaxed))
    }

    /// Mark a value unavailable so readers fall back to its default.
    pub fn unset(&self, id: ParamId) {
        self.set(id, f32::NAN);
    }

    /// Nudge a value by `delta`, staying inside the declared range.
    pub fn adjust(&self, id: ParamId, delta: f32) -> f32 {
        let current = self.value(id).unwrap_or_else(|| id.default_value());
        let next = id.sanitize(current + delta);
        self.set(id, next);
        next
    }

    pub fn snapshot(&self) -> BassParams {
        BassParams::read_from(self)
    }

    /// Bulk restore, e.g. from saved state.
    pub fn store(&self, params: &BassParams) {
        for (id, value) in ParamId::ALL.into_iter().zip(params.to_values()) {
            self.set(id, value);
        }
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamSource for SharedParams {
    fn value(&self, id: ParamId) -> Option<f32> {
        let value = self.get(id);
        value.is_finite().then_some(value)
    }
}
