// ── MindEcho Atoms Layer ───────────────────────────────────────────────────
// Pure constants and error types, no I/O.
// Dependency rule: atoms may only depend on std, mindecho-core and external
// pure crates. Nothing here may import from engine/ or commands/.

pub mod constants;
pub mod error;
