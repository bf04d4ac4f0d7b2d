// MindEcho Server — Application State
// Shared by every handler through axum's `State` extractor.

use super::config::{ServerConfig, StorageKind};
use crate::atoms::error::ServerResult;
use log::info;
use mindecho_core::mood::{InMemoryMoodStore, MoodRepository, SqliteMoodStore};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub moods: Arc<dyn MoodRepository>,
    /// Template selection. Seeded from `response_seed` when configured so a
    /// fresh server replays identical replies.
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Build state with the mood backend the configuration names.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let moods: Arc<dyn MoodRepository> = match config.storage {
            StorageKind::Memory => {
                info!("[state] Using in-memory mood store");
                Arc::new(InMemoryMoodStore::new())
            }
            StorageKind::Sqlite => Arc::new(SqliteMoodStore::open(&config.db_path)?),
        };
        Ok(Self::with_repository(config, moods))
    }

    pub fn with_repository(config: ServerConfig, moods: Arc<dyn MoodRepository>) -> Self {
        let rng = match config.response_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        AppState {
            config: Arc::new(config),
            moods,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}
