// src/models/note.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven diatonic scale degrees asked in the quiz.
///
/// The declaration order is the column order of a persisted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteKey {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteKey {
    /// All notes in column order.
    pub const ALL: [NoteKey; 7] = [
        NoteKey::C,
        NoteKey::D,
        NoteKey::E,
        NoteKey::F,
        NoteKey::G,
        NoteKey::A,
        NoteKey::B,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of the note inside a persisted row.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn solfege(self) -> &'static str {
        match self {
            NoteKey::C => "Do",
            NoteKey::D => "Re",
            NoteKey::E => "Mi",
            NoteKey::F => "Fa",
            NoteKey::G => "Sol",
            NoteKey::A => "La",
            NoteKey::B => "Si",
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            NoteKey::C => "C",
            NoteKey::D => "D",
            NoteKey::E => "E",
            NoteKey::F => "F",
            NoteKey::G => "G",
            NoteKey::A => "A",
            NoteKey::B => "B",
        }
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Note descriptor sent to the quiz form.
#[derive(Debug, Serialize)]
pub struct NoteInfo {
    pub note: NoteKey,
    pub solfege: &'static str,
    /// Where the client fetches the sound for the play button.
    pub audio_url: String,
}
