//! Gain helpers.

/*
Gain Staging
============

  dB         output level control, -24 dB .. +6 dB
             gain = 10^(dB / 20)

             ×1.0   =   0 dB
             ×0.5   ≈  -6 dB
             ×0.4   ≈  -8 dB   (default output)
             ×2.0   ≈  +6 dB

  velocity   scales the voice before the filter, never fully silent:
             gain = 0.25 + 0.75 * velocity

  accent     only velocities above 0.55 count, scaled by the accent control:
             boost = clamp((velocity - 0.55) * 2.2, 0, 1) * accent

             velocity  boost (accent = 1)
             0.55      0.0
             0.80      0.55
             1.00      0.99

The accent boost is computed once per block and feeds the drive gain, the
filter envelope depth, and a small extra amplitude lift (+22% at full boost).
*/

/// Convert decibels to a linear gain factor.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Accent intensity in [0, 1] from the last note's velocity.
#[inline]
pub fn accent_boost(velocity: f32, accent: f32) -> f32 {
    ((velocity - 0.55) * 2.2).clamp(0.0, 1.0) * accent
}

/// Pre-filter amplitude from velocity and accent.
#[inline]
pub fn velocity_gain(velocity: f32, accent_boost: f32) -> f32 {
    (0.25 + 0.75 * velocity) * (1.0 + 0.22 * accent_boost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_to_gain() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-20.0) - 0.1).abs() < 1e-6);
        assert!((db_to_gain(6.0) - 1.995).abs() < 1e-3);
    }

    #[test]
    fn test_accent_needs_hard_velocity() {
        assert_eq!(accent_boost(0.5, 1.0), 0.0);
        assert_eq!(accent_boost(0.55, 1.0), 0.0);
        assert!((accent_boost(0.8, 1.0) - 0.55).abs() < 1e-5);
        assert_eq!(accent_boost(1.0, 0.0), 0.0);
        assert!(accent_boost(1.0, 1.0) <= 1.0);
    }

    #[test]
    fn test_velocity_gain_range() {
        assert!((velocity_gain(0.0, 0.0) - 0.25).abs() < 1e-6);
        assert!((velocity_gain(1.0, 0.0) - 1.0).abs() < 1e-6);
        assert!((velocity_gain(1.0, 1.0) - 1.22).abs() < 1e-6);
    }
}
