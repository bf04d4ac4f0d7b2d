// ── Emotion: shared vocabulary ─────────────────────────────────────────────
//
// One enumeration consumed by every classifier, the fusion engine and the
// response templates. Per-label tables are written as exhaustive `match`es,
// so adding a label without its keywords, explanations or coping mapping is
// a compile error instead of a silent fallback.
//
// Pipeline per modality: raw signal → feature vector → EmotionClassification

pub mod audio;
pub mod image;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ═════════════════════════════════════════════════════════════════════════════
// EmotionLabel
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Fear,
    Disgust,
    Surprise,
    Neutral,
    Stress,
    Anxiety,
    Confusion,
    Lonely,
    Excited,
    Tired,
    Hopeless,
    Overwhelmed,
    Calm,
    Motivated,
}

impl EmotionLabel {
    /// Every label, in scoring order. Ties in the text classifier resolve to
    /// the earliest label in this list.
    pub const ALL: [EmotionLabel; 17] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Fear,
        EmotionLabel::Disgust,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
        EmotionLabel::Stress,
        EmotionLabel::Anxiety,
        EmotionLabel::Confusion,
        EmotionLabel::Lonely,
        EmotionLabel::Excited,
        EmotionLabel::Tired,
        EmotionLabel::Hopeless,
        EmotionLabel::Overwhelmed,
        EmotionLabel::Calm,
        EmotionLabel::Motivated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Angry => "angry",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Stress => "stress",
            EmotionLabel::Anxiety => "anxiety",
            EmotionLabel::Confusion => "confusion",
            EmotionLabel::Lonely => "lonely",
            EmotionLabel::Excited => "excited",
            EmotionLabel::Tired => "tired",
            EmotionLabel::Hopeless => "hopeless",
            EmotionLabel::Overwhelmed => "overwhelmed",
            EmotionLabel::Calm => "calm",
            EmotionLabel::Motivated => "motivated",
        }
    }

    /// Map the looser vocabulary used by analysis reports and clients
    /// ("anxious", "stressed", "angry or frustrated", …) onto a label.
    /// Returns `None` for words that carry no emotion ("uncertain", "engaged").
    pub fn from_loose(raw: &str) -> Option<EmotionLabel> {
        let word = raw.trim().to_lowercase();
        if let Ok(label) = word.parse::<EmotionLabel>() {
            return Some(label);
        }
        let label = match word.as_str() {
            "anxious" | "nervous" | "worried" => EmotionLabel::Anxiety,
            "stressed" | "pressured" | "tense" => EmotionLabel::Stress,
            "angry or frustrated" | "frustrated" | "mad" => EmotionLabel::Angry,
            "excited or happy" | "energetic" => EmotionLabel::Excited,
            "sad or tired" | "withdrawn" | "low" => EmotionLabel::Sad,
            "content" | "relaxed" | "peaceful" => EmotionLabel::Calm,
            "emotionally varied" | "conflicted" | "confused" => EmotionLabel::Confusion,
            "thoughtful" | "contemplative" | "focused" => EmotionLabel::Motivated,
            "scared" | "afraid" => EmotionLabel::Fear,
            "joyful" | "upbeat" => EmotionLabel::Happy,
            "exhausted" => EmotionLabel::Tired,
            "isolated" => EmotionLabel::Lonely,
            _ => return None,
        };
        Some(label)
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown emotion label: {s}"))
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// EmotionClassification
// ═════════════════════════════════════════════════════════════════════════════

/// Output of one classifier. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionClassification {
    #[serde(rename = "emotion")]
    pub label: EmotionLabel,
    /// 0..=100
    pub intensity: u8,
    pub explanation: String,
}

impl EmotionClassification {
    pub fn new(label: EmotionLabel, intensity: f32, explanation: impl Into<String>) -> Self {
        Self {
            label,
            intensity: clamp_intensity(intensity),
            explanation: explanation.into(),
        }
    }

    pub fn neutral(intensity: f32, explanation: impl Into<String>) -> Self {
        Self::new(EmotionLabel::Neutral, intensity, explanation)
    }
}

/// Round and clamp a raw score into 0..=100. NaN collapses to 0.
pub fn clamp_intensity(raw: f32) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
