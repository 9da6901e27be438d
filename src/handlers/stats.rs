// src/handlers/stats.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::{
        color::{AnswerKey, PALETTE},
        row::parse_rows,
    },
    scoring::aggregate,
    store::RowStore,
};

/// Statistics over every stored attempt, including the full history table.
///
/// A malformed row fails the whole request; nothing is partially tabulated.
pub async fn get_stats(
    State(store): State<Arc<dyn RowStore>>,
) -> Result<impl IntoResponse, AppError> {
    let values = store.fetch_all_rows().await.map_err(|e| {
        tracing::error!("Failed to fetch rows for statistics: {:?}", e);
        e
    })?;

    let rows = parse_rows(&values)?;
    let stats = aggregate(&rows, &AnswerKey::standard(), &PALETTE);

    Ok(Json(stats))
}
