// ── MindEcho Atoms: Constants ──────────────────────────────────────────────
// Named constants for the server crate.

use serde::Serialize;

// ── Configuration defaults ───────────────────────────────────────────────
// Used by `ServerConfig::default()` in engine/config.rs.
pub(crate) const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 3001;
pub(crate) const DEFAULT_CONFIG_FILE: &str = "mindecho.toml";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
pub(crate) const DEFAULT_RECENT_MOOD_LIMIT: usize = 5;
pub(crate) const DEFAULT_HISTORY_DAYS: i64 = 30;

// ── Environment overrides ────────────────────────────────────────────────
pub(crate) const ENV_BIND: &str = "MINDECHO_BIND";
pub(crate) const ENV_PORT: &str = "MINDECHO_PORT";
pub(crate) const ENV_STORAGE: &str = "MINDECHO_STORAGE";
pub(crate) const ENV_DB_PATH: &str = "MINDECHO_DB_PATH";
pub(crate) const ENV_SEED: &str = "MINDECHO_SEED";

// ── Chat ──────────────────────────────────────────────────────────────────
// Returned with HTTP 200 whenever a chat turn fails internally. The chat UI
// never sees a 5xx.
pub const CHAT_FALLBACK_REPLY: &str = "I apologize, but I'm having trouble responding right now. \
Please try again in a moment. If you're in crisis, please reach out to a mental health \
professional or call a crisis helpline immediately.";

// ── Emergency helplines ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Helpline {
    pub label: &'static str,
    pub number: &'static str,
}

pub const HELPLINES: &[Helpline] = &[
    Helpline {
        label: "National Suicide Prevention Lifeline (US)",
        number: "988",
    },
    Helpline {
        label: "Crisis Text Line (text HOME)",
        number: "741741",
    },
    Helpline {
        label: "National Helpline (India)",
        number: "9152987821",
    },
    Helpline {
        label: "Suicide Prevention",
        number: "08046110007",
    },
];
