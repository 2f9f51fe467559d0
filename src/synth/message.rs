#[cfg(feature = "rtrb")]
use rtrb::Consumer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Control events consumed by the engine at the start of each block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    /// Velocity is normalized to 0.0..=1.0.
    NoteOn { note: u8, velocity: f32 },
    NoteOff { note: u8 },
    AllNotesOff,
    AllSoundOff,
}

/// Source of control messages, drained completely once per block.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// A message tagged with its sample offset inside the block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimedMessage {
    pub offset: u32,
    pub message: SynthMessage,
}

/// Fixed-capacity event queue for one block, kept in offset order.
///
/// Messages with equal offsets keep their push order. Popping drains the
/// queue; once empty it is cleared for the next block. Capacity is reserved
/// up front and never grows: pushes beyond it are rejected.
pub struct EventBuffer {
    events: Vec<TimedMessage>,
    read: usize,
}

impl EventBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            read: 0,
        }
    }

    /// Insert in offset order. Returns false (dropping the message) when full.
    pub fn push(&mut self, offset: u32, message: SynthMessage) -> bool {
        if self.events.len() == self.events.capacity() {
            return false;
        }
        let position = self.events[self.read..]
            .iter()
            .position(|e| e.offset > offset)
            .map_or(self.events.len(), |p| p + self.read);
        self.events.insert(position, TimedMessage { offset, message });
        true
    }

    pub fn len(&self) -> usize {
        self.events.len() - self.read
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.read = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedMessage> {
        self.events[self.read..].iter()
    }
}

impl MessageReceiver for EventBuffer {
    fn pop(&mut self) -> Option<SynthMessage> {
        match self.events.get(self.read) {
            Some(event) => {
                self.read += 1;
                Some(event.message)
            }
            None => {
                self.clear();
                None
            }
        }
    }
}

impl MessageReceiver for &[SynthMessage] {
    fn pop(&mut self) -> Option<SynthMessage> {
        let (first, rest) = self.split_first()?;
        *self = rest;
        Some(*first)
    }
}
