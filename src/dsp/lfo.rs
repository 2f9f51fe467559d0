//! Low Frequency Oscillator (LFO).

/*
Low Frequency Oscillators
=========================

An LFO is simply an oscillator running at sub-audio frequencies. The engine
has one, a bipolar sine (-1.0 to +1.0), free-running: it is never reset by
notes, only by `prepare`.

    0.05 - 0.5 Hz   Slow sweeps
    0.5 - 7 Hz      Wobble, classic filter movement
    7 - 24 Hz       Fast flutter, approaching audio-rate territory

One LFO value per sample feeds three destinations:

    filter cutoff     lfo * lfo_to_cutoff * 36 semitones
    stereo width      right cutoff detuned by stereo * lfo * 4 semitones
    pulse width       duty cycle moved around 0.49

Like the audio oscillators the value is read before the phase advances, so
the first sample after a reset is sin(0) = 0.
*/

use std::f32::consts::TAU;

use super::oscillator::Phase;

#[derive(Debug, Default)]
pub struct Lfo {
    phase: Phase,
}

impl Lfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, then advance by one sample at `rate_hz`.
    #[inline]
    pub fn next_sample(&mut self, rate_hz: f32, sample_rate: f32) -> f32 {
        let value = self.phase.value().sin();
        self.phase.advance(TAU * rate_hz / sample_rate);
        value
    }

    pub fn reset(&mut self) {
        self.phase.reset();
    }

    pub fn phase(&self) -> f32 {
        self.phase.value()
    }
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use monobass::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(5.0, 48000.0);
/// assert_eq!(samples, 9600.0); // 5 Hz at 48kHz = 9600 samples
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}
