use std::f32::consts::PI;

/*
Topology-preserving (trapezoidal) state-variable filter, low-pass output only.

    g = tan(π · cutoff / sample_rate)      prewarped integrator gain
    k = 1 / resonance                       damping, resonance acts as Q

The integrator memories (ic1eq, ic2eq) stay consistent with whatever g and k
were used on the previous sample, so cutoff can be moved every sample without
the blow-ups a direct-form biquad shows under fast modulation.

| resonance | k     | response                   |
| --------- | ----- | -------------------------- |
| 0.05      | 20.0  | heavily damped, soft knee  |
| 0.28      | 3.57  | default, gentle            |
| 0.95      | 1.05  | flat to slightly peaked    |
*/

pub const MIN_CUTOFF_HZ: f32 = 20.0;
pub const MAX_CUTOFF_HZ: f32 = 18_000.0;
pub const MIN_RESONANCE: f32 = 0.05;
pub const MAX_RESONANCE: f32 = 0.95;

/// Keeps the prewarp away from the tan() pole at Nyquist.
const MAX_CUTOFF_RATIO: f32 = 0.49;

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,
    g: f32,
    k: f32,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz: 1_000.0,
            resonance: 0.28,
            sample_rate: sample_rate.max(1.0),
            g: 0.0,
            k: 1.0,
        };
        filter.set_cutoff(cutoff_hz);
        filter.set_resonance(filter.resonance);
        filter
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.set_cutoff(self.cutoff_hz);
    }

    /// Clamps to the audio range (and below Nyquist) and recomputes g.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        let ceiling = MAX_CUTOFF_HZ
            .min(self.sample_rate * MAX_CUTOFF_RATIO)
            .max(MIN_CUTOFF_HZ);
        self.cutoff_hz = if cutoff_hz.is_nan() {
            MIN_CUTOFF_HZ
        } else {
            cutoff_hz.clamp(MIN_CUTOFF_HZ, ceiling)
        };
        self.g = (PI * self.cutoff_hz / self.sample_rate).tan();
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = if resonance.is_nan() {
            MIN_RESONANCE
        } else {
            resonance.clamp(MIN_RESONANCE, MAX_RESONANCE)
        };
        self.k = 1.0 / self.resonance;
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let g = self.g;
        let h = 1.0 / (1.0 + g * (g + self.k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }
}

/// Cutoff offset in semitones from the filter envelope and the LFO.
///
/// The envelope is biased by -0.2 so a resting envelope pulls the cutoff
/// slightly below the base setting; accent pushes the envelope depth up.
#[inline]
pub fn cutoff_mod_semitones(
    env_amount: f32,
    accent_boost: f32,
    filter_env: f32,
    lfo: f32,
    lfo_to_cutoff: f32,
) -> f32 {
    (env_amount + accent_boost * 0.45) * (filter_env - 0.2) * 72.0 + lfo * lfo_to_cutoff * 36.0
}

#[inline]
fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

/// Two low-pass filters fed the same mono signal. The right cutoff is detuned
/// from the left by `stereo * lfo * 4` semitones, so width collapses to mono
/// when either is zero.
pub struct StereoFilter {
    left: SVFilter,
    right: SVFilter,
}

impl StereoFilter {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            left: SVFilter::lowpass(1_000.0, sample_rate),
            right: SVFilter::lowpass(1_000.0, sample_rate),
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.left.set_sample_rate(sample_rate);
        self.right.set_sample_rate(sample_rate);
    }

    /// Set both channels' coefficients for the next sample.
    pub fn modulate(&mut self, base_cutoff: f32, mod_semitones: f32, stereo: f32, lfo: f32, resonance: f32) {
        let left = (base_cutoff * semitones_to_ratio(mod_semitones)).clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);
        let right = (left * semitones_to_ratio(stereo * lfo * 4.0)).clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);

        self.left.set_cutoff(left);
        self.right.set_cutoff(right);
        self.left.set_resonance(resonance);
        self.right.set_resonance(resonance);
    }

    #[inline]
    pub fn next_sample(&mut self, mono: f32) -> (f32, f32) {
        (self.left.next_sample(mono), self.right.next_sample(mono))
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// Current (left, right) cutoffs in Hz.
    pub fn cutoffs(&self) -> (f32, f32) {
        (self.left.cutoff(), self.right.cutoff())
    }

    pub fn resonance(&self) -> f32 {
        self.left.resonance()
    }
}
