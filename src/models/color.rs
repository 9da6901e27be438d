// src/models/color.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::note::NoteKey;

/// A color identifier picked for a note, e.g. `"indigo"`.
///
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorChoice(String);

impl ColorChoice {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorChoice {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A swatch offered by the quiz form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaletteColor {
    pub label: &'static str,
    pub name: &'static str,
    /// Hex swatch value.
    pub value: &'static str,
}

/// The colors a user can choose from.
pub const PALETTE: [PaletteColor; 7] = [
    PaletteColor { label: "Red", name: "red", value: "#FF0000" },
    PaletteColor { label: "Orange", name: "orange", value: "#FF7F00" },
    PaletteColor { label: "Yellow", name: "yellow", value: "#FFFF00" },
    PaletteColor { label: "Green", name: "green", value: "#00FF00" },
    PaletteColor { label: "Blue", name: "blue", value: "#0000FF" },
    PaletteColor { label: "Indigo", name: "indigo", value: "#4B0082" },
    PaletteColor { label: "Violet", name: "violet", value: "#9400D3" },
];

/// Correct color for every note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    colors: [ColorChoice; NoteKey::COUNT],
}

impl AnswerKey {
    /// The answer key the quiz is graded against.
    pub fn standard() -> Self {
        Self::from_fn(|note| {
            ColorChoice::from(match note {
                NoteKey::C => "red",
                NoteKey::D => "orange",
                NoteKey::E => "yellow",
                NoteKey::F => "green",
                NoteKey::G => "blue",
                NoteKey::A => "indigo",
                NoteKey::B => "violet",
            })
        })
    }

    pub fn from_fn(f: impl FnMut(NoteKey) -> ColorChoice) -> Self {
        Self {
            colors: NoteKey::ALL.map(f),
        }
    }

    pub fn correct(&self, note: NoteKey) -> &ColorChoice {
        &self.colors[note.index()]
    }
}

impl Default for AnswerKey {
    fn default() -> Self {
        Self::standard()
    }
}
