// MindEcho Core — Mood Log
// Mood entries plus the repository seam the server and CLI store them behind.
//
// Module layout:
//   mod      — MoodLabel, MoodEntry, NewMood, MoodRepository trait
//   memory   — InMemoryMoodStore (Mutex<Vec<MoodEntry>>)
//   sqlite   — SqliteMoodStore (Mutex<Connection>) + schema migrations

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod memory;
mod schema;
mod sqlite;

pub use memory::InMemoryMoodStore;
pub use sqlite::SqliteMoodStore;

// ── MoodLabel ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Great,
    Good,
    Okay,
    Bad,
    Terrible,
    Happy,
    Calm,
    Sad,
    Anxious,
    Angry,
    Stressed,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 11] = [
        MoodLabel::Great,
        MoodLabel::Good,
        MoodLabel::Okay,
        MoodLabel::Bad,
        MoodLabel::Terrible,
        MoodLabel::Happy,
        MoodLabel::Calm,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Angry,
        MoodLabel::Stressed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Great => "great",
            MoodLabel::Good => "good",
            MoodLabel::Okay => "okay",
            MoodLabel::Bad => "bad",
            MoodLabel::Terrible => "terrible",
            MoodLabel::Happy => "happy",
            MoodLabel::Calm => "calm",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Angry => "angry",
            MoodLabel::Stressed => "stressed",
        }
    }

    /// 1..=5 value used for averages and trends. Labels outside the
    /// great…terrible ladder sit at the midpoint.
    pub fn scale(self) -> u8 {
        match self {
            MoodLabel::Great => 5,
            MoodLabel::Good => 4,
            MoodLabel::Okay => 3,
            MoodLabel::Bad => 2,
            MoodLabel::Terrible => 1,
            _ => 3,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(
            self,
            MoodLabel::Bad
                | MoodLabel::Terrible
                | MoodLabel::Sad
                | MoodLabel::Anxious
                | MoodLabel::Angry
                | MoodLabel::Stressed
        )
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MoodLabel::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| CoreError::invalid(format!("unknown mood: {s}")))
    }
}

// ── MoodEntry ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub mood: MoodLabel,
    /// 1..=5
    pub intensity: u8,
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Build a fresh entry stamped now. Intensity defaults to the label's
    /// scale value and must lie in 1..=5 when given.
    pub fn new(mood: MoodLabel, intensity: Option<u8>, note: Option<String>) -> CoreResult<Self> {
        Self::at(mood, intensity, note, Utc::now())
    }

    pub fn at(
        mood: MoodLabel,
        intensity: Option<u8>,
        note: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let intensity = intensity.unwrap_or_else(|| mood.scale());
        if !(1..=5).contains(&intensity) {
            return Err(CoreError::invalid(format!(
                "intensity must be between 1 and 5, got {intensity}"
            )));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            mood,
            intensity,
            note: note.unwrap_or_default(),
            timestamp,
        })
    }
}

/// Wire shape for creating an entry. `mood` stays a string so unknown
/// labels surface as a validation error rather than a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMood {
    pub mood: String,
    #[serde(default)]
    pub intensity: Option<u8>,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewMood {
    pub fn into_entry(self) -> CoreResult<MoodEntry> {
        let mood: MoodLabel = self.mood.parse()?;
        MoodEntry::new(mood, self.intensity, self.note)
    }
}

// ── Repository ────────────────────────────────────────────────────────────

/// Storage seam for mood entries. Implementations keep insertion order;
/// every listing is chronological (oldest first).
pub trait MoodRepository: Send + Sync {
    fn append(&self, entry: MoodEntry) -> CoreResult<MoodEntry>;

    /// Last `n` entries, oldest first.
    fn list_recent(&self, n: usize) -> CoreResult<Vec<MoodEntry>>;

    /// Entries stamped at or after `since`, oldest first.
    fn list_since(&self, since: DateTime<Utc>) -> CoreResult<Vec<MoodEntry>>;

    fn list_all(&self) -> CoreResult<Vec<MoodEntry>>;

    fn count(&self) -> CoreResult<usize>;
}

/// Mean of the 1..=5 scale values, `None` for an empty slice.
pub fn mean_scale(entries: &[MoodEntry]) -> Option<f32> {
    if entries.is_empty() {
        return None;
    }
    let sum: u32 = entries.iter().map(|e| e.mood.scale() as u32).sum();
    Some(sum as f32 / entries.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_and_negativity() {
        assert_eq!(MoodLabel::Great.scale(), 5);
        assert_eq!(MoodLabel::Terrible.scale(), 1);
        assert_eq!(MoodLabel::Anxious.scale(), 3);
        assert!(MoodLabel::Bad.is_negative());
        assert!(!MoodLabel::Calm.is_negative());
    }

    #[test]
    fn intensity_defaults_to_scale() {
        let e = MoodEntry::new(MoodLabel::Good, None, None).unwrap();
        assert_eq!(e.intensity, 4);
        assert!(e.note.is_empty());
    }

    #[test]
    fn intensity_out_of_range_rejected() {
        assert!(MoodEntry::new(MoodLabel::Okay, Some(0), None).is_err());
        assert!(MoodEntry::new(MoodLabel::Okay, Some(6), None).is_err());
    }

    #[test]
    fn new_mood_parses_case_insensitively() {
        let e = NewMood {
            mood: "Anxious".into(),
            intensity: Some(2),
            note: Some("deadline".into()),
        }
        .into_entry()
        .unwrap();
        assert_eq!(e.mood, MoodLabel::Anxious);

        let bad = NewMood {
            mood: "ecstatic".into(),
            intensity: None,
            note: None,
        };
        assert!(matches!(bad.into_entry(), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn mean_scale_over_entries() {
        let entries: Vec<_> = [MoodLabel::Great, MoodLabel::Bad, MoodLabel::Calm]
            .into_iter()
            .map(|m| MoodEntry::new(m, None, None).unwrap())
            .collect();
        assert_eq!(mean_scale(&entries), Some(10.0 / 3.0));
        assert_eq!(mean_scale(&[]), None);
    }
}
