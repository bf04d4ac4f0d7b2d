// ── Analysis reports ───────────────────────────────────────────────────────
//
// Client-facing documents returned by the analyze endpoints. They wrap the
// per-modality classification with the descriptive fields the UI shows
// (energy, stress, scene wording) and define the degraded shapes returned
// when decoding fails.

use crate::emotion::audio::{self, AudioFeatures, VoiceRule};
use crate::emotion::image::{self as visual, ColorTone, ImageFeatures};
use crate::emotion::{EmotionClassification, EmotionLabel};
use serde::{Deserialize, Serialize};

/// Confidence reported when no voice rule fires.
const NEUTRAL_VOICE_CONFIDENCE: u8 = 65;
const FALLBACK_IMAGE_CONFIDENCE: u8 = 40;
/// Data URLs longer than this read as a detailed capture in the fallback.
const DETAILED_CAPTURE_CHARS: usize = 50_000;

// ═════════════════════════════════════════════════════════════════════════════
// Voice
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDetails {
    /// Percent, 0..=100.
    pub avg_amplitude: u8,
    pub peak_amplitude: u8,
    /// Seconds, one decimal.
    pub duration: f32,
    pub voice_quality: String,
    pub emotional_tone: String,
    pub variability: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceReport {
    /// Human descriptor, e.g. "angry or frustrated".
    pub emotion: String,
    pub label: Option<EmotionLabel>,
    pub intensity: u8,
    pub energy: String,
    pub stress: String,
    pub confidence: u8,
    pub details: VoiceDetails,
}

fn percent(x: f32) -> u8 {
    (x * 100.0).round().clamp(0.0, 100.0) as u8
}

impl VoiceReport {
    pub fn from_features(features: &AudioFeatures) -> Self {
        if features.sample_count == 0 {
            return Self::uncertain();
        }
        let rule: &VoiceRule = audio::match_voice_rule(features);
        let classification = audio::classify_voice(features);
        let confidence = if rule.label == EmotionLabel::Neutral {
            NEUTRAL_VOICE_CONFIDENCE
        } else {
            rule.intensity
        };
        Self {
            emotion: rule.descriptor.to_string(),
            label: Some(classification.label),
            intensity: classification.intensity,
            energy: rule.energy.as_str().to_string(),
            stress: rule.stress.as_str().to_string(),
            confidence,
            details: VoiceDetails {
                avg_amplitude: percent(features.avg_amplitude),
                peak_amplitude: percent(features.peak_amplitude),
                duration: (features.duration_secs * 10.0).round() / 10.0,
                voice_quality: rule.quality.to_string(),
                emotional_tone: rule.tone.to_string(),
                variability: percent(features.variance),
            },
        }
    }

    pub fn analyze(bytes: &[u8]) -> Self {
        Self::from_features(&audio::extract_audio_features(bytes))
    }

    /// Shape returned when the recording could not be read at all.
    pub fn uncertain() -> Self {
        Self {
            emotion: "uncertain".into(),
            label: None,
            intensity: 0,
            energy: "moderate".into(),
            stress: "normal".into(),
            confidence: 0,
            details: VoiceDetails {
                avg_amplitude: 0,
                peak_amplitude: 0,
                duration: 0.0,
                voice_quality: "Unable to analyze".into(),
                emotional_tone: "Uncertain".into(),
                variability: 0,
            },
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Image
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    pub face_detected: bool,
    pub brightness: u8,
    pub color_tone: String,
    pub facial_cues: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub emotions: Vec<String>,
    pub dominant_emotion: String,
    pub mental_state: String,
    pub confidence: u8,
    /// Lighting/tone classification, absent in the fallback report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionClassification>,
    pub details: ImageDetails,
}

struct SceneRule {
    matches: fn(&ImageFeatures) -> bool,
    emotions: [&'static str; 3],
    dominant: &'static str,
    mental_state: &'static str,
    confidence: u8,
}

static SCENE_RULES: &[SceneRule] = &[
    SceneRule {
        matches: |f| f.brightness > 160.0 && f.color_tone == ColorTone::Warm,
        emotions: ["happy", "energetic", "positive"],
        dominant: "happy",
        mental_state: "Appears energetic and in good spirits - bright environment and warm tones suggest positive mood",
        confidence: 78,
    },
    SceneRule {
        matches: |f| f.brightness > 140.0 && f.color_variance > 50.0,
        emotions: ["excited", "anxious", "alert"],
        dominant: "anxious",
        mental_state: "High energy detected - may be excited or experiencing some anxiety",
        confidence: 72,
    },
    SceneRule {
        matches: |f| f.brightness < 75.0 && (f.color_tone == ColorTone::Cool || f.dark_fraction > 0.6),
        emotions: ["sad", "withdrawn", "low-energy"],
        dominant: "sad",
        mental_state: "Low energy environment - may indicate sadness, fatigue, or withdrawal",
        confidence: 75,
    },
    SceneRule {
        matches: |f| f.brightness < 90.0 && f.color_tone == ColorTone::Warm,
        emotions: ["tired", "seeking-comfort", "relaxed"],
        dominant: "tired",
        mental_state: "Subdued environment with warm tones - may be seeking rest or comfort",
        confidence: 70,
    },
    SceneRule {
        matches: |f| f.brightness > 100.0 && f.brightness < 150.0 && f.color_tone == ColorTone::Balanced,
        emotions: ["calm", "content", "balanced"],
        dominant: "content",
        mental_state: "Balanced environment - appears calm and emotionally stable",
        confidence: 68,
    },
    SceneRule {
        matches: |f| f.color_tone == ColorTone::Cool && f.brightness > 90.0,
        emotions: ["thoughtful", "contemplative", "focused"],
        dominant: "thoughtful",
        mental_state: "Cool, clear environment - may be in reflective or focused state",
        confidence: 66,
    },
    SceneRule {
        matches: |f| f.dark_fraction > 0.3 && f.bright_fraction > 0.3,
        emotions: ["intense", "conflicted", "emotionally-charged"],
        dominant: "conflicted",
        mental_state: "High contrast suggests emotional intensity or internal conflict",
        confidence: 64,
    },
];

static NEUTRAL_SCENE: SceneRule = SceneRule {
    matches: |_| true,
    emotions: ["neutral", "stable", "balanced"],
    dominant: "neutral",
    mental_state: "Neutral emotional state - appears stable and balanced",
    confidence: 60,
};

impl ImageReport {
    pub fn from_features(features: &ImageFeatures) -> Self {
        let scene = SCENE_RULES
            .iter()
            .find(|rule| (rule.matches)(features))
            .unwrap_or(&NEUTRAL_SCENE);
        let face_detected = visual::face_likely(features);
        let facial_cues = if face_detected {
            "Face-like lighting patterns detected - analysis based on environmental and lighting cues"
        } else {
            "No clear facial features detected - analysis based on environmental context"
        };
        Self {
            emotions: scene.emotions.iter().map(|e| e.to_string()).collect(),
            dominant_emotion: scene.dominant.to_string(),
            mental_state: scene.mental_state.to_string(),
            confidence: scene.confidence,
            emotion: Some(visual::classify_visual(features)),
            details: ImageDetails {
                face_detected,
                brightness: features.brightness.round().clamp(0.0, 255.0) as u8,
                color_tone: features.color_tone.as_str().to_string(),
                facial_cues: facial_cues.to_string(),
                body_language: Some(format!(
                    "Environmental analysis suggests {}",
                    scene.mental_state.to_lowercase()
                )),
            },
        }
    }

    pub fn analyze(rgba: &[u8]) -> Self {
        Self::from_features(&visual::extract_image_features(rgba))
    }

    /// Low-confidence report used when the pixels could not be decoded.
    /// Only the size of the data URL is available.
    pub fn fallback(data_url_len: usize) -> Self {
        let (dominant, mental_state) = if data_url_len > DETAILED_CAPTURE_CHARS {
            ("engaged", "Detailed capture suggests engagement")
        } else {
            ("neutral", "Unable to perform detailed analysis")
        };
        Self {
            emotions: vec!["neutral".into(), "uncertain".into()],
            dominant_emotion: dominant.into(),
            mental_state: mental_state.into(),
            confidence: FALLBACK_IMAGE_CONFIDENCE,
            emotion: None,
            details: ImageDetails {
                face_detected: false,
                brightness: 128,
                color_tone: "unknown".into(),
                facial_cues: "Limited analysis available".into(),
                body_language: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_audio_reports_neutral() {
        let r = VoiceReport::analyze(&[0u8; 16_000]);
        assert_eq!(r.emotion, "neutral");
        assert_eq!(r.label, Some(EmotionLabel::Neutral));
        assert_eq!(r.intensity, 20);
        assert_eq!(r.confidence, NEUTRAL_VOICE_CONFIDENCE);
        assert_eq!(r.details.duration, 1.0);
    }

    #[test]
    fn empty_audio_is_uncertain() {
        let r = VoiceReport::analyze(&[]);
        assert_eq!(r.emotion, "uncertain");
        assert_eq!(r.confidence, 0);
        assert_eq!(r.label, None);
    }

    #[test]
    fn loud_steady_audio_reports_rule_fields() {
        // Every sampled byte is -80 → amplitude 0.625, no variance.
        let bytes = vec![(-80i8) as u8; 5_000];
        let r = VoiceReport::analyze(&bytes);
        assert_eq!(r.emotion, "excited or happy");
        assert_eq!(r.energy, "high");
        assert_eq!(r.stress, "low");
        assert_eq!(r.confidence, 75);
        assert_eq!(r.details.avg_amplitude, 63);
        assert_eq!(r.details.variability, 0);
    }

    #[test]
    fn warm_bright_scene_is_happy() {
        let rgba = [230u8, 170, 150, 255].repeat(64);
        let r = ImageReport::analyze(&rgba);
        assert_eq!(r.dominant_emotion, "happy");
        assert_eq!(r.confidence, 78);
        assert_eq!(r.emotions, vec!["happy", "energetic", "positive"]);
        assert_eq!(r.emotion.map(|e| e.label), Some(EmotionLabel::Happy));
        assert_eq!(r.details.color_tone, "warm");
    }

    #[test]
    fn dark_scene_is_sad_without_face() {
        let rgba = [20u8, 20, 25, 255].repeat(64);
        let r = ImageReport::analyze(&rgba);
        assert_eq!(r.dominant_emotion, "sad");
        assert!(!r.details.face_detected);
    }

    #[test]
    fn fallback_depends_on_payload_size() {
        assert_eq!(ImageReport::fallback(1_000).dominant_emotion, "neutral");
        let big = ImageReport::fallback(60_000);
        assert_eq!(big.dominant_emotion, "engaged");
        assert_eq!(big.confidence, 40);
        assert!(big.emotion.is_none());
    }
}
