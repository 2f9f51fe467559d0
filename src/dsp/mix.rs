//! Linear crossfades.
//!
//! A crossfade walks from one signal to another with a single position
//! control:
//!
//! ```text
//!   position  output
//!   0.0       a
//!   0.5       halfway between a and b
//!   1.0       b
//! ```
//!
//! The oscillator bank uses it for saw→pulse and pure→saturated sub, and the
//! wavefolder uses it as a dry/wet blend.

/// Linear interpolation from `a` (position 0) to `b` (position 1).
///
/// The position is not clamped; callers pass values already in range.
#[inline]
pub fn crossfade(position: f32, a: f32, b: f32) -> f32 {
    a + position * (b - a)
}
