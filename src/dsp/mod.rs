//! Low-level DSP primitives used by the bass engine.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside the engine struct. They stay focused on the
//! signal-processing math; the engine decides when and with which parameters
//! they run.

/// Gain helpers: decibels, velocity and accent.
pub mod amplify;
/// Post-filter low-end follower.
pub mod bloom;
/// Soft clipping, wavefolding and the drive stage.
pub mod distortion;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable low-pass filter and the modulated stereo pair.
pub mod filter;
/// Exponential pitch glide.
pub mod glide;
/// Sine low frequency oscillator.
pub mod lfo;
/// Linear crossfades.
pub mod mix;
/// Phase accumulators, the oscillator bank and the noise source.
pub mod oscillator;

pub use envelope::{AdsrParams, Envelope, EnvelopeStage};
