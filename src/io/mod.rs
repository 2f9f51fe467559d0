// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

pub use converter::{midi_note_to_freq, midi_to_synth};
pub use midi::MidiEvent;

/// Planar output buffers allocated once per configuration.
#[derive(Debug, Default)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    pub fn new(channels: usize, block_size: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; block_size]; channels],
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn block_size(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    /// Borrow the first two channels as the slice list `process_block` takes,
    /// truncated to `frames`. Further channels are left untouched.
    pub fn with_channels<R>(&mut self, frames: usize, f: impl FnOnce(&mut [&mut [f32]]) -> R) -> R {
        let count = self.buffers.len().min(2);
        let mut slices: [&mut [f32]; 2] = [&mut [], &mut []];
        for (slot, buffer) in slices.iter_mut().zip(self.buffers.iter_mut()) {
            let frames = frames.min(buffer.len());
            *slot = &mut buffer[..frames];
        }
        f(&mut slices[..count])
    }

    /// Interleave the first `frames` into `out`, laid out with `out_channels`
    /// samples per frame. A mono device gets channel 0; device channels
    /// without a matching buffer are silenced.
    pub fn interleave_into(&self, frames: usize, out_channels: usize, out: &mut [f32]) {
        if out_channels == 0 {
            return;
        }
        for (index, frame) in out.chunks_mut(out_channels).take(frames).enumerate() {
            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = self
                    .buffers
                    .get(channel)
                    .and_then(|buffer| buffer.get(index))
                    .copied()
                    .unwrap_or(0.0);
            }
        }
    }
}
