// src/handlers/quiz.rs

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        color::{AnswerKey, PALETTE},
        note::{NoteInfo, NoteKey},
        row::PersistedRow,
        submission::{SubmitQuizRequest, Submission},
    },
    scoring::grade,
    state::AppState,
};

/// Header carrying the client's session id for the one-submit-at-a-time rule.
pub const SESSION_HEADER: &str = "x-session-id";

/// Returns what the quiz form needs: the notes (with their sounds) and the palette.
pub async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let notes: Vec<NoteInfo> = NoteKey::ALL
        .into_iter()
        .map(|note| NoteInfo {
            note,
            solfege: note.solfege(),
            audio_url: state.audio.source(note),
        })
        .collect();

    Ok(Json(serde_json::json!({
        "notes": notes,
        "palette": PALETTE,
    })))
}

/// Submits a quiz attempt.
///
/// * Rejects incomplete selections before anything is stored.
/// * Grades against the answer key.
/// * Appends the attempt to the row store.
/// * Only one submit per session (`x-session-id`) may be in flight.
pub async fn submit_quiz(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::from(validation_errors));
    }

    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty());

    // Held until the response is built, success or not
    let _permit = match session_id {
        Some(id) => Some(state.submits.acquire(id)?),
        None => None,
    };

    let submission = Submission::from_selection(&req.answers, Utc::now())?;
    let result = grade(&submission, &AnswerKey::standard());
    let row = PersistedRow::from_submission(&submission);

    state
        .store
        .append_row(row.to_cells())
        .await
        .map_err(|e| {
            tracing::error!("Failed to save quiz attempt: {:?}", e);
            e
        })?;

    tracing::info!(
        "Quiz submitted: {}/{} correct ({}%)",
        result.correct,
        result.total,
        result.percentage
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "result": result,
            "message": "Data saved successfully!"
        })),
    ))
}
