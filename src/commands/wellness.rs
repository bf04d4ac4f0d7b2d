// commands/wellness.rs — GET /api/wellness/score.

use crate::atoms::error::ServerResult;
use crate::engine::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use mindecho_core::wellness::{wellness_score, WellnessScore};

pub async fn score(State(state): State<AppState>) -> ServerResult<Json<WellnessScore>> {
    let entries = state.moods.list_all()?;
    Ok(Json(wellness_score(&entries, Utc::now())))
}
