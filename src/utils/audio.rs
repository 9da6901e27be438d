// src/utils/audio.rs

use crate::models::note::NoteKey;

/// Provides the sound behind a note's play button.
///
/// Injected into the application state so the note catalogue never
/// hard-codes where audio lives.
pub trait NoteAudio: Send + Sync {
    /// URL the client loads to play `note`.
    fn source(&self, note: NoteKey) -> String;
}

/// Audio served from the static assets directory as `notes/{Solfege}.mp3`.
#[derive(Debug, Clone)]
pub struct StaticNoteAudio {
    assets_url: String,
}

impl StaticNoteAudio {
    pub fn new(assets_url: impl Into<String>) -> Self {
        Self {
            assets_url: assets_url.into(),
        }
    }
}

impl NoteAudio for StaticNoteAudio {
    fn source(&self, note: NoteKey) -> String {
        format!(
            "{}/notes/{}.mp3",
            self.assets_url.trim_end_matches('/'),
            note.solfege()
        )
    }
}
