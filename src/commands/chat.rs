// commands/chat.rs — POST /api/chat.
//
// A chat turn never surfaces a 5xx: anything that goes wrong after input
// validation is logged and answered with CHAT_FALLBACK_REPLY.

use crate::atoms::constants::CHAT_FALLBACK_REPLY;
use crate::atoms::error::{ServerError, ServerResult};
use crate::engine::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use log::{error, warn};
use mindecho_core::chat::{respond, ChatRequest};
use mindecho_core::CoreError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub role: &'static str,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    fn assistant(content: impl Into<String>) -> Self {
        ChatReply {
            role: "assistant",
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ServerResult<Json<ChatReply>> {
    let Json(request) = payload.map_err(|e| {
        warn!("[chat] Rejected body: {}", e);
        ServerError::bad_request("Message is required")
    })?;

    if request.message.trim().is_empty() {
        return Err(ServerError::bad_request("Message is required"));
    }

    let recent = match state.moods.list_recent(state.config.recent_mood_limit) {
        Ok(moods) => moods,
        Err(e) => {
            warn!("[chat] Mood lookup failed, continuing without history: {}", e);
            Vec::new()
        }
    };

    let turn = {
        let mut rng = state.rng.lock();
        respond(&request, &recent, &mut *rng)
    };

    match turn {
        Ok(turn) => Ok(Json(ChatReply::assistant(turn.reply))),
        Err(CoreError::InvalidInput(message)) => Err(ServerError::BadRequest(message)),
        Err(e) => {
            error!("[chat] Turn failed: {}", e);
            Ok(Json(ChatReply::assistant(CHAT_FALLBACK_REPLY)))
        }
    }
}
