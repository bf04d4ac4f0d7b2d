// MindEcho Server — Configuration
// ServerConfig, StorageKind, load_config, env overrides
//
// Precedence: built-in defaults < TOML file < MINDECHO_* environment.

use crate::atoms::constants::*;
use crate::atoms::error::{ServerError, ServerResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Storage backend ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    Sqlite,
}

impl std::str::FromStr for StorageKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(ServerError::Config(format!(
                "unknown storage backend {other:?} (expected \"memory\" or \"sqlite\")"
            ))),
        }
    }
}

// ── Config Struct ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// "memory" | "sqlite"
    pub storage: StorageKind,
    /// SQLite file, used when `storage = "sqlite"`.
    pub db_path: PathBuf,
    /// Per-request ceiling; overruns return 408.
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
    /// Moods handed to the chat pipeline, and the default for /api/mood/recent.
    pub recent_mood_limit: usize,
    /// Default window for /api/mood/history.
    pub history_days: i64,
    /// Fixed seed for template selection. Unset means OS entropy.
    pub response_seed: Option<u64>,
    pub cors_permissive: bool,
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindecho")
        .join("mood.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: DEFAULT_BIND_ADDRESS.into(),
            port: DEFAULT_PORT,
            storage: StorageKind::Memory,
            db_path: default_db_path(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            recent_mood_limit: DEFAULT_RECENT_MOOD_LIMIT,
            history_days: DEFAULT_HISTORY_DAYS,
            response_seed: None,
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Apply MINDECHO_* overrides. `lookup` is `std::env::var(..).ok()` in
    /// production and a map in tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_address = bind;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_PORT}={port:?}: {e}")))?;
        }
        if let Some(storage) = lookup(ENV_STORAGE) {
            self.storage = storage.parse()?;
        }
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.response_seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|e| ServerError::Config(format!("{ENV_SEED}={seed:?}: {e}")))?,
            );
        }
        Ok(())
    }
}

// ── Loading ────────────────────────────────────────────────────────────

pub fn parse_config(raw: &str) -> ServerResult<ServerConfig> {
    toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
}

/// Load configuration. An explicit `path` must exist; the default
/// `mindecho.toml` is optional.
pub fn load_config(path: Option<&Path>) -> ServerResult<ServerConfig> {
    let mut config = match path {
        Some(p) => {
            info!("[config] Loading {:?}", p);
            parse_config(&std::fs::read_to_string(p)?)?
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                info!("[config] Loading {:?}", default);
                parse_config(&std::fs::read_to_string(default)?)?
            } else {
                ServerConfig::default()
            }
        }
    };
    config.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_documented_values() {
        let c = ServerConfig::default();
        assert_eq!(c.request_timeout_secs, 30);
        assert_eq!(c.max_body_bytes, 10 * 1024 * 1024);
        assert_eq!(c.recent_mood_limit, 5);
        assert_eq!(c.history_days, 30);
        assert_eq!(c.storage, StorageKind::Memory);
        assert!(c.db_path.ends_with("mindecho/mood.db"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = parse_config("port = 8080\nstorage = \"sqlite\"\n").unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.storage, StorageKind::Sqlite);
        assert_eq!(c.bind_address, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (ENV_PORT, "9000"),
            (ENV_STORAGE, "SQLite"),
            (ENV_SEED, "42"),
            (ENV_DB_PATH, "/tmp/m.db"),
        ]
        .into_iter()
        .collect();
        let mut c = ServerConfig::default();
        c.apply_overrides(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(c.port, 9000);
        assert_eq!(c.storage, StorageKind::Sqlite);
        assert_eq!(c.response_seed, Some(42));
        assert_eq!(c.db_path, PathBuf::from("/tmp/m.db"));
    }

    #[test]
    fn bad_override_is_a_config_error() {
        let mut c = ServerConfig::default();
        let err = c
            .apply_overrides(|k| (k == ENV_PORT).then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
