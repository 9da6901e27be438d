// src/scoring/grader.rs

use crate::models::{
    color::AnswerKey,
    note::NoteKey,
    stats::{NoteResult, ResultSummary},
    submission::Submission,
};

/// Rounded percentage of `part / whole`, half rounding up.
/// Returns 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Grades a complete submission against the answer key.
pub fn grade(submission: &Submission, key: &AnswerKey) -> ResultSummary {
    let notes: Vec<NoteResult> = NoteKey::ALL
        .into_iter()
        .map(|note| {
            let selected = submission.selected(note);
            let correct_color = key.correct(note);
            NoteResult {
                note,
                solfege: note.solfege(),
                selected: selected.clone(),
                correct_color: correct_color.clone(),
                // Strict string matching
                is_correct: selected == correct_color,
            }
        })
        .collect();

    let correct = notes.iter().filter(|n| n.is_correct).count();
    let total = notes.len();

    ResultSummary {
        correct: correct as u32,
        total: total as u32,
        percentage: percentage(correct, total),
        notes,
    }
}
