// src/models/submission.rs

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{color::ColorChoice, note::NoteKey},
};

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    /// Selected color per note.
    /// Key: note letter ("C".."B")
    /// Value: color name from the palette
    #[validate(custom(function = validate_answers))]
    pub answers: HashMap<NoteKey, String>,
}

pub(crate) fn validate_answers(
    answers: &HashMap<NoteKey, String>,
) -> Result<(), validator::ValidationError> {
    let missing = missing_notes(answers);
    if !missing.is_empty() {
        let mut error = validator::ValidationError::new("incomplete_selection");
        error.message = Some(Cow::from(missing_message(&missing)));
        return Err(error);
    }
    if answers.values().any(|color| color.len() > 32) {
        return Err(validator::ValidationError::new("color_too_long"));
    }
    Ok(())
}

/// Notes without a (non-empty) color, in column order.
pub fn missing_notes(answers: &HashMap<NoteKey, String>) -> Vec<NoteKey> {
    NoteKey::ALL
        .into_iter()
        .filter(|note| answers.get(note).is_none_or(|color| color.is_empty()))
        .collect()
}

fn missing_message(missing: &[NoteKey]) -> String {
    let names: Vec<&str> = missing.iter().map(|n| n.letter()).collect();
    format!(
        "Please select a color for all notes before submitting. Missing: {}",
        names.join(", ")
    )
}

/// One completed quiz attempt: a color for every note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    colors: [ColorChoice; NoteKey::COUNT],
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Builds a submission from the form selection.
    /// Fails if any note has no color.
    pub fn from_selection(
        answers: &HashMap<NoteKey, String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let missing = missing_notes(answers);
        if !missing.is_empty() {
            return Err(AppError::Validation(missing_message(&missing)));
        }

        let colors = NoteKey::ALL.map(|note| {
            answers
                .get(&note)
                .map(|color| ColorChoice::new(color.as_str()))
                .unwrap_or_else(|| ColorChoice::new(""))
        });

        Ok(Self { colors, created_at })
    }

    pub fn selected(&self, note: NoteKey) -> &ColorChoice {
        &self.colors[note.index()]
    }

    pub fn colors(&self) -> &[ColorChoice; NoteKey::COUNT] {
        &self.colors
    }
}
