// ── MindEcho Core ──────────────────────────────────────────────────────────
// Pure business logic shared by the HTTP server and the CLI.
// Nothing in this crate knows about HTTP; every public operation is a
// synchronous computation over one payload plus an injected RNG.
//
// Module layout:
//   emotion    — shared EmotionLabel + text/audio/image feature extractors and classifiers
//   fusion     — weighted multimodal fusion and mental-health indicators
//   sentiment  — crisis gate and coarse sentiment scanner (independent keyword tables)
//   response   — conversation context + template-driven reply assembly
//   chat       — one chat turn end to end
//   mood       — MoodEntry, MoodRepository trait, in-memory and SQLite stores
//   media      — data-URL parsing and RGBA decoding
//   report     — voice/image analysis documents returned by the analyze endpoints
//   wellness   — wellness score derived from stored moods

pub mod chat;
pub mod emotion;
pub mod error;
pub mod fusion;
pub mod media;
pub mod mood;
pub mod report;
pub mod response;
pub mod sentiment;
pub mod wellness;

pub use emotion::{EmotionClassification, EmotionLabel};
pub use error::{CoreError, CoreResult};
pub use fusion::{FusedAnalysis, MentalHealthIndicators};
