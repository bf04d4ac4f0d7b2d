// commands/utility.rs — health probe and static helpline list.

use crate::atoms::constants::{Helpline, HELPLINES};
use crate::engine::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub mood_entries: usize,
}

/// Always 200. A failing store reports zero entries rather than taking the
/// probe down with it.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let mood_entries = state.moods.count().unwrap_or_else(|e| {
        warn!("[health] Mood count failed: {}", e);
        0
    });
    Json(Health {
        status: "healthy",
        timestamp: Utc::now(),
        mood_entries,
    })
}

#[derive(Debug, Serialize)]
pub struct Helplines {
    pub helplines: &'static [Helpline],
}

pub async fn helplines() -> Json<Helplines> {
    Json(Helplines {
        helplines: HELPLINES,
    })
}
