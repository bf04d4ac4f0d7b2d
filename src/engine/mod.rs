// MindEcho Server — Engine
// Process-level plumbing shared by the command handlers.
//
// Module layout:
//   config — ServerConfig (TOML + MINDECHO_* overrides)
//   state  — AppState (config, mood repository, response RNG)

pub mod config;
pub mod state;
