// MindEcho — wellness companion server.
//
// Module layout:
//   atoms/    — constants, ServerError
//   engine/   — ServerConfig, AppState
//   commands/ — axum handlers (chat, analyze, mood, wellness, utility)
//
// Scoring, fusion and reply assembly live in the `mindecho-core` crate.

pub mod atoms;
pub mod commands;
pub mod engine;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use commands::{analyze, chat, mood, utility, wellness};
use engine::state::AppState;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

pub use atoms::error::{ServerError, ServerResult};
pub use engine::config::{load_config, ServerConfig, StorageKind};

/// Every route under /api, with body limit, request timeout and CORS applied.
pub fn build_router(state: AppState) -> Router {
    let cors = if state.config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/analyze/image", post(analyze::analyze_image))
        .route("/api/analyze/voice", post(analyze::analyze_voice))
        .route("/api/mood", post(mood::create_mood).get(mood::list_moods))
        .route("/api/mood/recent", get(mood::recent_moods))
        .route("/api/mood/history", get(mood::mood_history))
        .route("/api/wellness/score", get(wellness::score))
        .route("/api/health", get(utility::health))
        .route("/api/emergency/helplines", get(utility::helplines))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .with_state(state)
}
