//! Parameter identifiers and the per-block parameter snapshot.
//!
//! The engine reads its 22 controls once per block into a [`BassParams`]
//! value and never looks at external storage again until the next block.
//! Values come from any [`ParamSource`]; [`SharedParams`] is a lock-free
//! store for hosts that write parameters from a UI or automation thread.

mod shared;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{envelope::AdsrParams, oscillator::OscSettings},
    PARAM_COUNT,
};

pub use shared::SharedParams;

/// Anything that can answer "what is the current value of this parameter?".
///
/// `None` means the value is unavailable; the snapshot falls back to the
/// parameter's default.
pub trait ParamSource {
    fn value(&self, id: ParamId) -> Option<f32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Output,
    Tune,
    Glide,
    OscMix,
    Sub,
    FmAmount,
    FmRatio,
    Fold,
    Drive,
    Noise,
    Cutoff,
    Resonance,
    EnvAmount,
    LfoRate,
    LfoToCutoff,
    Stereo,
    Attack,
    Decay,
    Sustain,
    Release,
    MonoLegato,
    Accent,
}

impl ParamId {
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Output,
        ParamId::Tune,
        ParamId::Glide,
        ParamId::OscMix,
        ParamId::Sub,
        ParamId::FmAmount,
        ParamId::FmRatio,
        ParamId::Fold,
        ParamId::Drive,
        ParamId::Noise,
        ParamId::Cutoff,
        ParamId::Resonance,
        ParamId::EnvAmount,
        ParamId::LfoRate,
        ParamId::LfoToCutoff,
        ParamId::Stereo,
        ParamId::Attack,
        ParamId::Decay,
        ParamId::Sustain,
        ParamId::Release,
        ParamId::MonoLegato,
        ParamId::Accent,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed string identifier, as used by hosts and saved state.
    pub fn id(self) -> &'static str {
        match self {
            ParamId::Output => "output",
            ParamId::Tune => "tune",
            ParamId::Glide => "glide",
            ParamId::OscMix => "oscMix",
            ParamId::Sub => "sub",
            ParamId::FmAmount => "fmAmt",
            ParamId::FmRatio => "fmRatio",
            ParamId::Fold => "fold",
            ParamId::Drive => "drive",
            ParamId::Noise => "noise",
            ParamId::Cutoff => "cutoff",
            ParamId::Resonance => "resonance",
            ParamId::EnvAmount => "envAmt",
            ParamId::LfoRate => "lfoRate",
            ParamId::LfoToCutoff => "lfoToCutoff",
            ParamId::Stereo => "stereo",
            ParamId::Attack => "attack",
            ParamId::Decay => "decay",
            ParamId::Sustain => "sustain",
            ParamId::Release => "release",
            ParamId::MonoLegato => "monoLegato",
            ParamId::Accent => "accent",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.id() == id)
    }

    /// Declared (min, max) range. Units: dB for output, semitones for tune,
    /// seconds for glide and the envelope times, Hz for cutoff and LFO rate.
    pub fn range(self) -> (f32, f32) {
        match self {
            ParamId::Output => (-24.0, 6.0),
            ParamId::Tune => (-24.0, 24.0),
            ParamId::Glide => (0.0, 0.35),
            ParamId::FmRatio => (0.25, 8.0),
            ParamId::Cutoff => (30.0, 14_000.0),
            ParamId::Resonance => (0.05, 0.95),
            ParamId::EnvAmount => (-1.0, 1.0),
            ParamId::LfoRate => (0.05, 24.0),
            ParamId::Attack => (0.001, 0.25),
            ParamId::Decay => (0.02, 1.2),
            ParamId::Release => (0.01, 2.5),
            ParamId::OscMix
            | ParamId::Sub
            | ParamId::FmAmount
            | ParamId::Fold
            | ParamId::Drive
            | ParamId::Noise
            | ParamId::LfoToCutoff
            | ParamId::Stereo
            | ParamId::Sustain
            | ParamId::MonoLegato
            | ParamId::Accent => (0.0, 1.0),
        }
    }

    /// Fallback used when a source has no usable value.
    pub fn default_value(self) -> f32 {
        match self {
            ParamId::Output => -8.0,
            ParamId::Tune => 0.0,
            ParamId::Glide => 0.025,
            ParamId::OscMix => 0.72,
            ParamId::Sub => 0.62,
            ParamId::FmAmount => 0.28,
            ParamId::FmRatio => 2.0,
            ParamId::Fold => 0.36,
            ParamId::Drive => 0.45,
            ParamId::Noise => 0.07,
            ParamId::Cutoff => 220.0,
            ParamId::Resonance => 0.28,
            ParamId::EnvAmount => 0.72,
            ParamId::LfoRate => 2.8,
            ParamId::LfoToCutoff => 0.22,
            ParamId::Stereo => 0.25,
            ParamId::Attack => 0.003,
            ParamId::Decay => 0.18,
            ParamId::Sustain => 0.66,
            ParamId::Release => 0.21,
            ParamId::MonoLegato => 1.0,
            ParamId::Accent => 0.5,
        }
    }

    /// On/off parameters are stored as 0.0 / 1.0 and read as `value >= 0.5`.
    pub fn is_toggle(self) -> bool {
        matches!(self, ParamId::MonoLegato)
    }

    /// Clamp into range; NaN and infinities become the default.
    pub fn sanitize(self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default_value();
        }
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

/// One block's worth of parameter values. Copy, immutable within a block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BassParams {
    #[cfg_attr(feature = "serde", serde(rename = "output"))]
    pub output_db: f32,
    pub tune: f32,
    pub glide: f32,
    pub osc_mix: f32,
    pub sub: f32,
    #[cfg_attr(feature = "serde", serde(rename = "fmAmt"))]
    pub fm_amount: f32,
    pub fm_ratio: f32,
    pub fold: f32,
    pub drive: f32,
    pub noise: f32,
    pub cutoff: f32,
    pub resonance: f32,
    #[cfg_attr(feature = "serde", serde(rename = "envAmt"))]
    pub env_amount: f32,
    pub lfo_rate: f32,
    pub lfo_to_cutoff: f32,
    pub stereo: f32,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub mono_legato: bool,
    pub accent: f32,
}

impl Default for BassParams {
    fn default() -> Self {
        let mut params = Self {
            output_db: 0.0,
            tune: 0.0,
            glide: 0.0,
            osc_mix: 0.0,
            sub: 0.0,
            fm_amount: 0.0,
            fm_ratio: 0.0,
            fold: 0.0,
            drive: 0.0,
            noise: 0.0,
            cutoff: 0.0,
            resonance: 0.0,
            env_amount: 0.0,
            lfo_rate: 0.0,
            lfo_to_cutoff: 0.0,
            stereo: 0.0,
            attack: 0.0,
            decay: 0.0,
            sustain: 0.0,
            release: 0.0,
            mono_legato: false,
            accent: 0.0,
        };
        for id in ParamId::ALL {
            params.set(id, id.default_value());
        }
        params
    }
}

impl BassParams {
    /// Read every parameter once, substituting defaults for missing or
    /// non-finite values and clamping into the declared ranges.
    pub fn read_from<S: ParamSource + ?Sized>(source: &S) -> Self {
        let mut params = Self::default();
        for id in ParamId::ALL {
            let value = source
                .value(id)
                .filter(|v| v.is_finite())
                .unwrap_or_else(|| id.default_value());
            params.set(id, value);
        }
        params
    }

    /// Copy with every value clamped into range.
    pub fn sanitized(&self) -> Self {
        let mut params = *self;
        for id in ParamId::ALL {
            params.set(id, self.get(id));
        }
        params
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Output => self.output_db,
            ParamId::Tune => self.tune,
            ParamId::Glide => self.glide,
            ParamId::OscMix => self.osc_mix,
            ParamId::Sub => self.sub,
            ParamId::FmAmount => self.fm_amount,
            ParamId::FmRatio => self.fm_ratio,
            ParamId::Fold => self.fold,
            ParamId::Drive => self.drive,
            ParamId::Noise => self.noise,
            ParamId::Cutoff => self.cutoff,
            ParamId::Resonance => self.resonance,
            ParamId::EnvAmount => self.env_amount,
            ParamId::LfoRate => self.lfo_rate,
            ParamId::LfoToCutoff => self.lfo_to_cutoff,
            ParamId::Stereo => self.stereo,
            ParamId::Attack => self.attack,
            ParamId::Decay => self.decay,
            ParamId::Sustain => self.sustain,
            ParamId::Release => self.release,
            ParamId::MonoLegato => {
                if self.mono_legato {
                    1.0
                } else {
                    0.0
                }
            }
            ParamId::Accent => self.accent,
        }
    }

    /// Set one value, clamped into its declared range.
    pub fn set(&mut self, id: ParamId, value: f32) {
        let value = id.sanitize(value);
        match id {
            ParamId::Output => self.output_db = value,
            ParamId::Tune => self.tune = value,
            ParamId::Glide => self.glide = value,
            ParamId::OscMix => self.osc_mix = value,
            ParamId::Sub => self.sub = value,
            ParamId::FmAmount => self.fm_amount = value,
            ParamId::FmRatio => self.fm_ratio = value,
            ParamId::Fold => self.fold = value,
            ParamId::Drive => self.drive = value,
            ParamId::Noise => self.noise = value,
            ParamId::Cutoff => self.cutoff = value,
            ParamId::Resonance => self.resonance = value,
            ParamId::EnvAmount => self.env_amount = value,
            ParamId::LfoRate => self.lfo_rate = value,
            ParamId::LfoToCutoff => self.lfo_to_cutoff = value,
            ParamId::Stereo => self.stereo = value,
            ParamId::Attack => self.attack = value,
            ParamId::Decay => self.decay = value,
            ParamId::Sustain => self.sustain = value,
            ParamId::Release => self.release = value,
            ParamId::MonoLegato => self.mono_legato = value >= 0.5,
            ParamId::Accent => self.accent = value,
        }
    }

    /// All values in [`ParamId::ALL`] order, for bulk save.
    pub fn to_values(&self) -> [f32; PARAM_COUNT] {
        ParamId::ALL.map(|id| self.get(id))
    }

    /// Inverse of [`BassParams::to_values`], for bulk restore.
    pub fn from_values(values: &[f32; PARAM_COUNT]) -> Self {
        Self::read_from(values)
    }

    /// (id, value) pairs, for hosts that persist by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        ParamId::ALL.into_iter().map(|id| (id.id(), self.get(id)))
    }

    pub fn amp_envelope(&self) -> AdsrParams {
        AdsrParams::new(self.attack, self.decay, self.sustain, self.release)
    }

    pub fn osc_settings(&self) -> OscSettings {
        OscSettings {
            osc_mix: self.osc_mix,
            sub: self.sub,
            fm_amount: self.fm_amount,
            fm_ratio: self.fm_ratio,
            noise: self.noise,
        }
    }
}

impl ParamSource for BassParams {
    fn value(&self, id: ParamId) -> Option<f32> {
        Some(self.get(id))
    }
}

impl ParamSource for [f32; PARAM_COUNT] {
    fn value(&self, id: ParamId) -> Option<f32> {
        self.get(id.index()).copied()
    }
}
