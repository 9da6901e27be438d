// src/models/stats.rs

use serde::Serialize;

use crate::models::{color::ColorChoice, note::NoteKey};

/// Grading outcome of a single submission. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
    pub notes: Vec<NoteResult>,
}

/// Per-note line of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteResult {
    pub note: NoteKey,
    pub solfege: &'static str,
    pub selected: ColorChoice,
    pub correct_color: ColorChoice,
    pub is_correct: bool,
}

/// Statistics over every stored attempt, recomputed on each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub total_tests: usize,
    pub overall_accuracy: u32,
    pub notes: Vec<NoteStats>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteStats {
    pub note: NoteKey,
    pub solfege: &'static str,
    pub correct_color: ColorChoice,
    /// Rows that have a color for this note.
    pub answered: usize,
    pub accuracy: u32,
    /// `None` when no row answered the note.
    pub most_common: Option<ColorChoice>,
    pub distribution: Vec<ColorCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorCount {
    pub color: ColorChoice,
    pub count: usize,
}

/// One line of the attempt history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Position in the sheet, usable with the admin row routes.
    pub row_index: usize,
    pub timestamp: String,
    pub colors: Vec<ColorChoice>,
    pub score: u32,
    pub comparison: Comparison,
}

/// How an attempt scored relative to the overall accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    AboveAverage,
    Average,
    BelowAverage,
}
