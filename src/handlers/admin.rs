// src/handlers/admin.rs

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        color::ColorChoice,
        note::NoteKey,
        row::{PersistedRow, ROW_WIDTH},
        submission::validate_answers,
    },
    store::RowStore,
};

/// DTO for correcting a stored attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRowRequest {
    #[validate(custom(function = validate_answers))]
    pub answers: HashMap<NoteKey, String>,
    /// Replacement timestamp. The stored one is kept when omitted.
    #[validate(length(min = 1, max = 64))]
    pub timestamp: Option<String>,
}

/// Loads the sheet and returns the cells of the data row at `row_index`.
async fn existing_row(store: &dyn RowStore, row_index: usize) -> Result<Vec<String>, AppError> {
    if row_index == 0 {
        return Err(AppError::BadRequest(
            "Row 0 is the header and cannot be changed".to_string(),
        ));
    }

    let mut values = store.fetch_all_rows().await?;
    match values.get(row_index) {
        Some(cells) if !cells.is_empty() => Ok(values.swap_remove(row_index)),
        _ => Err(AppError::NotFound(format!("Row {} not found", row_index))),
    }
}

/// Replaces the colors (and optionally the timestamp) of a stored attempt.
pub async fn update_row(
    State(store): State<Arc<dyn RowStore>>,
    Path(row_index): Path<usize>,
    Json(payload): Json<UpdateRowRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let existing = existing_row(store.as_ref(), row_index).await?;

    // Malformed rows have no trustworthy timestamp; fall back to now.
    let timestamp = payload
        .timestamp
        .or_else(|| (existing.len() == ROW_WIDTH).then(|| existing[NoteKey::COUNT].clone()))
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    let row = PersistedRow {
        colors: NoteKey::ALL.map(|note| {
            ColorChoice::new(payload.answers.get(&note).cloned().unwrap_or_default())
        }),
        timestamp,
    };

    store
        .update_row(row_index, row.to_cells())
        .await
        .map_err(|e| {
            tracing::error!("Failed to update row {}: {:?}", row_index, e);
            e
        })?;

    Ok(Json(row))
}

/// Deletes a stored attempt.
pub async fn delete_row(
    State(store): State<Arc<dyn RowStore>>,
    Path(row_index): Path<usize>,
) -> Result<impl IntoResponse, AppError> {
    existing_row(store.as_ref(), row_index).await?;

    store.delete_row(row_index).await.map_err(|e| {
        tracing::error!("Failed to delete row {}: {:?}", row_index, e);
        e
    })?;

    tracing::info!("Deleted quiz attempt at row {}", row_index);
    Ok(StatusCode::NO_CONTENT)
}
