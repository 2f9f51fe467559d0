//! Messages exchanged between the UI thread and the audio callback
//!
//! Both directions travel over rtrb rings, so everything here is `Copy`.

/// Commands sent from the UI to the audio callback
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    TogglePlayback,
    Reset,
}

/// Engine snapshot pushed once per audio callback
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineStatus {
    pub step: usize,
    pub is_playing: bool,
    /// Sounding note, if any
    pub note: Option<u8>,
    pub frequency: f32,
    pub amp_level: f32,
    pub cutoff_left: f32,
    pub cutoff_right: f32,
}

/// Static session facts, known before the stream starts
#[derive(Clone, Debug)]
pub struct SessionInfo {
    pub bpm: f64,
    pub sample_rate: f32,
    pub channels: usize,
    /// (note, accent, slide) per step, for the step row
    pub steps: Vec<(Option<u8>, bool, bool)>,
}
