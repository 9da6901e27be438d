// src/models/row.rs

use chrono::SecondsFormat;
use serde::Serialize;

use crate::{
    error::AppError,
    models::{color::ColorChoice, note::NoteKey, submission::Submission},
};

/// Cells in a stored row: one color per note, then the timestamp.
pub const ROW_WIDTH: usize = NoteKey::COUNT + 1;

/// Header written as the first row of an empty sheet.
pub fn header_cells() -> Vec<String> {
    NoteKey::ALL
        .iter()
        .map(|note| note.letter().to_string())
        .chain(std::iter::once("Timestamp".to_string()))
        .collect()
}

/// Flat representation of a submission as stored in the sheet.
///
/// Colors read back from the store may be empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedRow {
    pub colors: [ColorChoice; NoteKey::COUNT],
    /// ISO-8601 creation time.
    pub timestamp: String,
}

impl PersistedRow {
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            colors: submission.colors().clone(),
            timestamp: submission
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_cells(&self) -> Vec<String> {
        self.colors
            .iter()
            .map(|c| c.as_str().to_string())
            .chain(std::iter::once(self.timestamp.clone()))
            .collect()
    }

    pub fn from_cells(cells: &[String]) -> Result<Self, AppError> {
        if cells.len() != ROW_WIDTH {
            return Err(AppError::DataShape(format!(
                "expected {} cells per row, got {}",
                ROW_WIDTH,
                cells.len()
            )));
        }

        let colors = NoteKey::ALL.map(|note| ColorChoice::new(cells[note.index()].as_str()));
        Ok(Self {
            colors,
            timestamp: cells[NoteKey::COUNT].clone(),
        })
    }

    pub fn color(&self, note: NoteKey) -> Option<&ColorChoice> {
        let color = &self.colors[note.index()];
        (!color.is_empty()).then_some(color)
    }
}

/// A data row together with its position in the sheet (header = 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub row_index: usize,
    pub row: PersistedRow,
}

/// Parses everything a fetch returned.
///
/// The header row is dropped and blank rows are skipped. Any other row
/// with the wrong width fails the whole parse.
pub fn parse_rows(values: &[Vec<String>]) -> Result<Vec<StoredRow>, AppError> {
    values
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, cells)| !cells.is_empty())
        .map(|(row_index, cells)| {
            PersistedRow::from_cells(cells)
                .map(|row| StoredRow { row_index, row })
                .map_err(|e| match e {
                    AppError::DataShape(msg) => {
                        AppError::DataShape(format!("row {}: {}", row_index, msg))
                    }
                    other => other,
                })
        })
        .collect()
}
