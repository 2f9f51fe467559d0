// Purpose: note handling and control messages
// This layer sits between the MIDI/event sources and the engine

pub mod message;
pub mod voice;

pub use message::{EventBuffer, MessageReceiver, SynthMessage};
pub use voice::NoteTracker;
