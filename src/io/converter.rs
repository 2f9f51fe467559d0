use crate::{io::midi::MidiEvent, synth::message::SynthMessage};

const ALL_SOUND_OFF: u8 = 120;
const ALL_NOTES_OFF: u8 = 123;

/// Map a decoded MIDI event to an engine message.
///
/// `channel_filter` of `None` accepts every channel (omni).
pub fn midi_to_synth(midi: MidiEvent, channel_filter: Option<u8>) -> Option<SynthMessage> {
    if channel_filter.is_some_and(|ch| ch != midi.channel()) {
        return None;
    }

    match midi {
        MidiEvent::NoteOn { key, velocity: 0, .. } => Some(SynthMessage::NoteOff { note: key }),
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity: velocity_to_unit(velocity),
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthMessage::NoteOff { note: key }),
        MidiEvent::ControlChange {
            controller: ALL_NOTES_OFF,
            ..
        } => Some(SynthMessage::AllNotesOff),
        MidiEvent::ControlChange {
            controller: ALL_SOUND_OFF,
            ..
        } => Some(SynthMessage::AllSoundOff),
        _ => None,
    }
}

#[inline]
pub fn velocity_to_unit(velocity: u8) -> f32 {
    (velocity.min(127) as f32) / 127.0
}

/// Equal-tempered frequency, A4 (note 69) = 440 Hz.
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
