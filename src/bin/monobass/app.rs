//! Player - audio stream setup and the realtime callback

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use monobass::{
    io::AudioOutput,
    synth::EventBuffer,
    BassEngine, EngineConfig, SharedParams, MAX_BLOCK_SIZE,
};
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::Arc;

use super::sequencer::{Sequencer, Step, STEPS};
use super::ui::{ControlMessage, EngineStatus, SessionInfo, UiApp};

/// Scope samples buffered between UI frames
const SCOPE_RING: usize = 16_384;
/// Events per block: a few notes per step at most
const EVENT_CAPACITY: usize = 64;

pub struct Player {
    bpm: f64,
    pattern: [Step; STEPS],
}

impl Player {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            pattern: [Step::rest(); STEPS],
        }
    }

    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn pattern(mut self, pattern: [Step; STEPS]) -> Self {
        self.pattern = pattern;
        self
    }

    /// Open the default output device, start playback and hand the terminal
    /// to the UI until it quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        log::info!(
            "output device {:?}: {sample_rate} Hz, {channels} channels",
            device.name().unwrap_or_default()
        );

        let params = Arc::new(SharedParams::new());
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING);
        let (status_tx, status_rx) = RingBuffer::<EngineStatus>::new(64);
        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(16);

        let session = SessionInfo {
            bpm: self.bpm,
            sample_rate,
            channels,
            steps: self.pattern.iter().map(|s| (s.note, s.accent, s.slide)).collect(),
        };

        let mut audio = AudioState {
            engine: BassEngine::new(EngineConfig::new(sample_rate, MAX_BLOCK_SIZE)),
            sequencer: Sequencer::new(self.pattern, self.bpm, sample_rate as f64),
            events: EventBuffer::with_capacity(EVENT_CAPACITY),
            output: AudioOutput::new(2, MAX_BLOCK_SIZE),
            params: Arc::clone(&params),
            scope_tx,
            status_tx,
            control_rx,
        };

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| audio.fill(data, channels),
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(session, params, scope_rx, status_rx, control_tx).run(&mut terminal);
        ratatui::restore();
        drop(stream);
        result
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the audio callback owns. Moved into the callback; nothing in
/// here is shared except the lock-free parameter store.
struct AudioState {
    engine: BassEngine,
    sequencer: Sequencer,
    events: EventBuffer,
    output: AudioOutput,
    params: Arc<SharedParams>,
    scope_tx: Producer<f32>,
    status_tx: Producer<EngineStatus>,
    control_rx: Consumer<ControlMessage>,
}

impl AudioState {
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        self.poll_controls();

        let params = self.params.snapshot();
        let total_frames = data.len() / channels;
        let mut written = 0;

        while written < total_frames {
            let frames = (total_frames - written).min(MAX_BLOCK_SIZE);

            self.sequencer.render(frames, &mut self.events);
            let Self {
                engine, events, output, ..
            } = self;
            output.with_channels(frames, |block| engine.process_block(&params, events, block));

            let start = written * channels;
            self.output
                .interleave_into(frames, channels, &mut data[start..start + frames * channels]);
            for &sample in &self.output.buffers[0][..frames] {
                // the UI catches up on its next frame if the ring is full
                let _ = self.scope_tx.push(sample);
            }

            written += frames;
        }

        let (cutoff_left, cutoff_right) = self.engine.filter_cutoffs();
        let _ = self.status_tx.push(EngineStatus {
            step: self.sequencer.step(),
            is_playing: self.sequencer.is_playing(),
            note: self.engine.held_notes().last().copied(),
            frequency: self.engine.current_frequency(),
            amp_level: self.engine.amp_envelope().level(),
            cutoff_left,
            cutoff_right,
        });
    }

    fn poll_controls(&mut self) {
        while let Ok(message) = self.control_rx.pop() {
            match message {
                ControlMessage::TogglePlayback => self.sequencer.toggle(&mut self.events),
                ControlMessage::Reset => self.sequencer.reset(&mut self.events),
            }
        }
    }
}
