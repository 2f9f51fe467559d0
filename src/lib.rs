pub mod dsp;
pub mod engine; // Block processing, lifecycle, note handling
pub mod io;
pub mod patch; // Parameter identifiers, snapshots, shared store
pub mod synth; // Note tracking and control messages

pub use engine::{BassEngine, EngineConfig};
pub use patch::{BassParams, ParamId, ParamSource, SharedParams};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const MIN_SAMPLE_RATE: f32 = 8_000.0;
pub const PARAM_COUNT: usize = 22;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
