// commands/mood.rs — mood log CRUD.
//
//   POST /api/mood               → 201 + stored entry
//   GET  /api/mood               → every entry, oldest first
//   GET  /api/mood/recent?limit  → newest first
//   GET  /api/mood/history?days  → entries inside the window, oldest first

use crate::atoms::error::{ServerError, ServerResult};
use crate::engine::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use log::info;
use mindecho_core::mood::{MoodEntry, NewMood};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<i64>,
}

pub async fn create_mood(
    State(state): State<AppState>,
    payload: Result<Json<NewMood>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<MoodEntry>)> {
    let Json(new_mood) = payload.map_err(|e| ServerError::bad_request(e.body_text()))?;
    let entry = state.moods.append(new_mood.into_entry()?)?;
    info!(
        "[mood] Logged {} ({}) id={}",
        entry.mood, entry.intensity, entry.id
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_moods(State(state): State<AppState>) -> ServerResult<Json<Vec<MoodEntry>>> {
    Ok(Json(state.moods.list_all()?))
}

pub async fn recent_moods(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ServerResult<Json<Vec<MoodEntry>>> {
    let limit = query.limit.unwrap_or(state.config.recent_mood_limit);
    let mut entries = state.moods.list_recent(limit)?;
    entries.reverse();
    Ok(Json(entries))
}

pub async fn mood_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ServerResult<Json<Vec<MoodEntry>>> {
    let days = query.days.unwrap_or(state.config.history_days);
    if days < 0 {
        return Err(ServerError::bad_request("days must not be negative"));
    }
    // Windows reaching past chrono's range cover the whole log.
    let since = Duration::try_days(days)
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    Ok(Json(state.moods.list_since(since)?))
}
