/// Highest valid MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// Ordered list of held notes for a monophonic voice.
///
/// The most recently pressed note is last and is the one that sounds. A note
/// appears at most once; pressing it again moves it to the end. Storage is
/// reserved for every MIDI note, so pressing never allocates.
#[derive(Debug, Clone)]
pub struct NoteTracker {
    notes: Vec<u8>,
}

impl NoteTracker {
    pub fn new() -> Self {
        Self {
            notes: Vec::with_capacity(MAX_NOTE as usize + 1),
        }
    }

    /// Push `note` as the newest held note.
    ///
    /// Returns whether any *other* note was already held, which is what the
    /// engine needs to decide between a legato slide and a fresh trigger.
    /// Notes above 127 are ignored and report `false`.
    pub fn press(&mut self, note: u8) -> bool {
        if note > MAX_NOTE {
            return false;
        }
        self.remove(note);
        let others_held = !self.notes.is_empty();
        self.notes.push(note);
        others_held
    }

    /// Drop `note`. Returns whether it was held.
    pub fn release(&mut self, note: u8) -> bool {
        self.remove(note)
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// The note that should be sounding, if any.
    pub fn active_note(&self) -> Option<u8> {
        self.notes.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Held notes, oldest first.
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    fn remove(&mut self, note: u8) -> bool {
        match self.notes.iter().position(|&n| n == note) {
            Some(index) => {
                self.notes.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Default for NoteTracker {
    fn default() -> Self {
        Self::new()
    }
}
