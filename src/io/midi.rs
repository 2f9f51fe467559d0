/// A channel voice message decoded from raw MIDI bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Centered on zero, -8192..=8191.
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Decode one message. Running status, system messages and truncated
    /// input yield `None`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status < 0x80 {
            return None;
        }
        let channel = status & 0x0F;
        let byte = |i: usize| data.get(i).copied().filter(|b| *b < 0x80);

        match status & 0xF0 {
            0x80 => Some(Self::NoteOff {
                channel,
                key: byte(0)?,
                velocity: byte(1)?,
            }),
            0x90 => Some(Self::NoteOn {
                channel,
                key: byte(0)?,
                velocity: byte(1)?,
            }),
            0xB0 => Some(Self::ControlChange {
                channel,
                controller: byte(0)?,
                value: byte(1)?,
            }),
            0xC0 => Some(Self::ProgramChange {
                channel,
                program: byte(0)?,
            }),
            0xE0 => {
                let lsb = byte(0)? as i16;
                let msb = byte(1)? as i16;
                Some(Self::PitchBend {
                    channel,
                    value: ((msb << 7) | lsb) - 8192,
                })
            }
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::ControlChange { channel, .. }
            | Self::PitchBend { channel, .. }
            | Self::ProgramChange { channel, .. } => channel,
        }
    }
}
