// ── Fusion Engine ──────────────────────────────────────────────────────────
//
// Combines the per-modality classifications into one estimate.
//
//   intensity = Σ wᵢ · intensityᵢ over the modalities present, with the
//               text/voice/visual weights renormalised to sum to 1.
//   label     = text label, replaced by voice when voice beats text by more
//               than OVERRIDE_MARGIN, then by visual under the same test.
//               Visual is checked last so it wins when both qualify.
//
// Indicators are never measured independently; they are a pure function of
// the fused (label, intensity) pair.

use crate::emotion::{clamp_intensity, EmotionClassification, EmotionLabel};
use serde::{Deserialize, Serialize};

const TEXT_WEIGHT: f32 = 0.5;
const VOICE_WEIGHT: f32 = 0.3;
const VISUAL_WEIGHT: f32 = 0.2;
const OVERRIDE_MARGIN: u8 = 20;

/// Baseline wellbeing reported for labels that say nothing about it.
const WELLBEING_BASELINE: f32 = 30.0;
const DEPRESSION_FACTOR: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MentalHealthIndicators {
    pub stress: f32,
    pub anxiety: f32,
    pub depression: f32,
    pub wellbeing: f32,
}

impl MentalHealthIndicators {
    /// `intensity` is the unrounded 0..=100 fused score.
    pub fn derive(label: EmotionLabel, intensity: f32) -> Self {
        let i = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 100.0) };
        let stress = match label {
            EmotionLabel::Stress | EmotionLabel::Overwhelmed => i,
            _ => 0.0,
        };
        let anxiety = match label {
            EmotionLabel::Anxiety => i,
            _ => 0.0,
        };
        let depression = match label {
            EmotionLabel::Hopeless | EmotionLabel::Sad => DEPRESSION_FACTOR * i,
            _ => 0.0,
        };
        let wellbeing = match label {
            EmotionLabel::Happy | EmotionLabel::Calm | EmotionLabel::Motivated => i,
            _ => WELLBEING_BASELINE,
        };
        Self {
            stress,
            anxiety,
            depression,
            wellbeing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusedAnalysis {
    pub text: EmotionClassification,
    pub voice: Option<EmotionClassification>,
    pub visual: Option<EmotionClassification>,
    #[serde(rename = "fusedEmotion")]
    pub fused: EmotionClassification,
    #[serde(rename = "mentalHealthIndicators")]
    pub indicators: MentalHealthIndicators,
}

pub fn fuse(
    text: EmotionClassification,
    voice: Option<EmotionClassification>,
    visual: Option<EmotionClassification>,
) -> FusedAnalysis {
    let mut weighted = TEXT_WEIGHT * text.intensity as f32;
    let mut total_weight = TEXT_WEIGHT;
    if let Some(v) = &voice {
        weighted += VOICE_WEIGHT * v.intensity as f32;
        total_weight += VOICE_WEIGHT;
    }
    if let Some(v) = &visual {
        weighted += VISUAL_WEIGHT * v.intensity as f32;
        total_weight += VISUAL_WEIGHT;
    }
    let raw = weighted / total_weight;
    let intensity = clamp_intensity(raw);

    let threshold = text.intensity.saturating_add(OVERRIDE_MARGIN);
    let mut label = text.label;
    if let Some(v) = voice.as_ref().filter(|v| v.intensity > threshold) {
        label = v.label;
    }
    if let Some(v) = visual.as_ref().filter(|v| v.intensity > threshold) {
        label = v.label;
    }

    let modalities = 1 + voice.is_some() as usize + visual.is_some() as usize;
    let fused = EmotionClassification::new(
        label,
        intensity as f32,
        format!("Fused {modalities} modality signal(s); dominant emotion {label}"),
    );
    let indicators = MentalHealthIndicators::derive(fused.label, raw);

    FusedAnalysis {
        text,
        voice,
        visual,
        fused,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(label: EmotionLabel, intensity: u8) -> EmotionClassification {
        EmotionClassification::new(label, intensity as f32, "test")
    }

    #[test]
    fn text_only_passes_through() {
        let f = fuse(c(EmotionLabel::Hopeless, 40), None, None);
        assert_eq!(f.fused.label, EmotionLabel::Hopeless);
        assert_eq!(f.fused.intensity, 40);
        assert_eq!(f.indicators.depression, 32.0);
    }

    #[test]
    fn weights_renormalise_over_present_modalities() {
        // (0.5·40 + 0.3·80) / 0.8 = 55
        let f = fuse(c(EmotionLabel::Sad, 40), Some(c(EmotionLabel::Sad, 80)), None);
        assert_eq!(f.fused.intensity, 55);
        // (0.5·40 + 0.3·80 + 0.2·70) / 1.0 = 58
        let f = fuse(
            c(EmotionLabel::Sad, 40),
            Some(c(EmotionLabel::Sad, 80)),
            Some(c(EmotionLabel::Sad, 70)),
        );
        assert_eq!(f.fused.intensity, 58);
    }

    #[test]
    fn indicators_use_unrounded_score() {
        // (0.5·41 + 0.3·42) / 0.8 = 41.375
        let f = fuse(c(EmotionLabel::Stress, 41), Some(c(EmotionLabel::Stress, 42)), None);
        assert_eq!(f.fused.intensity, 41);
        assert!((f.indicators.stress - 41.375).abs() < 1e-3, "{}", f.indicators.stress);
    }

    #[test]
    fn voice_overrides_only_beyond_margin() {
        let f = fuse(c(EmotionLabel::Neutral, 20), Some(c(EmotionLabel::Anxiety, 82)), None);
        assert_eq!(f.fused.label, EmotionLabel::Anxiety);

        let f = fuse(c(EmotionLabel::Sad, 60), Some(c(EmotionLabel::Anxiety, 80)), None);
        assert_eq!(f.fused.label, EmotionLabel::Sad, "exactly +20 is not enough");
    }

    #[test]
    fn visual_override_takes_final_precedence() {
        let f = fuse(
            c(EmotionLabel::Neutral, 20),
            Some(c(EmotionLabel::Stress, 78)),
            Some(c(EmotionLabel::Happy, 75)),
        );
        assert_eq!(f.fused.label, EmotionLabel::Happy);
    }

    #[test]
    fn indicators_follow_fused_label() {
        let i = MentalHealthIndicators::derive(EmotionLabel::Overwhelmed, 70.0);
        assert_eq!((i.stress, i.anxiety, i.depression, i.wellbeing), (70.0, 0.0, 0.0, 30.0));

        let i = MentalHealthIndicators::derive(EmotionLabel::Anxiety, 64.0);
        assert_eq!((i.stress, i.anxiety), (0.0, 64.0));

        let i = MentalHealthIndicators::derive(EmotionLabel::Calm, 76.0);
        assert_eq!(i.wellbeing, 76.0);

        for label in EmotionLabel::ALL {
            let i = MentalHealthIndicators::derive(label, 50.0);
            let stressful = matches!(label, EmotionLabel::Stress | EmotionLabel::Overwhelmed);
            assert_eq!(i.stress != 0.0, stressful, "{label}");
        }
    }

    #[test]
    fn fused_intensity_stays_in_range() {
        let f = fuse(
            c(EmotionLabel::Angry, 100),
            Some(c(EmotionLabel::Angry, 100)),
            Some(c(EmotionLabel::Angry, 100)),
        );
        assert_eq!(f.fused.intensity, 100);
        let f = fuse(c(EmotionLabel::Neutral, 0), Some(c(EmotionLabel::Neutral, 0)), None);
        assert_eq!(f.fused.intensity, 0);
    }
}
