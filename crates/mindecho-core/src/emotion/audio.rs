// ── Emotion: Audio Feature Extraction & Classification ─────────────────────
//
// Amplitude statistics over a raw byte buffer. No decoding: every 50th byte
// is read as a signed 8-bit sample, which is enough for the coarse energy /
// variability / transient signals the rules below need.
//
// Rules are evaluated top to bottom and the first match wins.

use super::{EmotionClassification, EmotionLabel};
use serde::{Deserialize, Serialize};

const SAMPLE_STRIDE: usize = 50;
const SPIKE_THRESHOLD: f32 = 0.3;
/// Bytes per second assumed when estimating duration.
const BYTES_PER_SECOND: f32 = 16_000.0;

// ═════════════════════════════════════════════════════════════════════════════
// Features
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFeatures {
    pub sample_count: usize,
    pub avg_amplitude: f32,
    pub peak_amplitude: f32,
    /// Root-mean-square deviation from the mean (a standard deviation).
    pub variance: f32,
    /// Fraction of adjacent sample pairs that jump by more than 0.3.
    pub spike_rate: f32,
    pub spectral_centroid: f32,
    pub duration_secs: f32,
}

pub fn extract_audio_features(bytes: &[u8]) -> AudioFeatures {
    let samples: Vec<f32> = bytes
        .iter()
        .step_by(SAMPLE_STRIDE)
        .map(|&b| (b as i8).unsigned_abs() as f32 / 128.0)
        .collect();

    let duration_secs = bytes.len() as f32 / BYTES_PER_SECOND;

    if samples.is_empty() {
        return AudioFeatures {
            sample_count: 0,
            avg_amplitude: 0.0,
            peak_amplitude: 0.0,
            variance: 0.0,
            spike_rate: 0.0,
            spectral_centroid: 0.0,
            duration_secs,
        };
    }

    let n = samples.len() as f32;
    let avg_amplitude = samples.iter().sum::<f32>() / n;
    let peak_amplitude = samples.iter().copied().fold(0.0_f32, f32::max);
    let variance = (samples
        .iter()
        .map(|s| (s - avg_amplitude).powi(2))
        .sum::<f32>()
        / n)
        .sqrt();

    let pairs = samples.len() - 1;
    let spike_rate = if pairs == 0 {
        0.0
    } else {
        let spikes = samples
            .windows(2)
            .filter(|w| (w[1] - w[0]).abs() > SPIKE_THRESHOLD)
            .count();
        spikes as f32 / pairs as f32
    };

    AudioFeatures {
        sample_count: samples.len(),
        avg_amplitude,
        peak_amplitude,
        variance,
        spike_rate,
        spectral_centroid: (avg_amplitude + variance * 0.5).min(1.0),
        duration_secs,
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Rules
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Energy {
    pub fn as_str(self) -> &'static str {
        match self {
            Energy::VeryLow => "very low",
            Energy::Low => "low",
            Energy::Moderate => "moderate",
            Energy::High => "high",
            Energy::VeryHigh => "very high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Normal,
    Elevated,
    High,
}

impl StressLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Normal => "normal",
            StressLevel::Elevated => "elevated",
            StressLevel::High => "high",
        }
    }

    pub fn is_tense(self) -> bool {
        matches!(self, StressLevel::Elevated | StressLevel::High)
    }
}

/// One threshold rule. `descriptor` is the human wording reported to clients.
pub struct VoiceRule {
    pub matches: fn(&AudioFeatures) -> bool,
    pub label: EmotionLabel,
    pub intensity: u8,
    pub descriptor: &'static str,
    pub energy: Energy,
    pub stress: StressLevel,
    pub quality: &'static str,
    pub tone: &'static str,
}

pub static VOICE_RULES: &[VoiceRule] = &[
    VoiceRule {
        matches: |f| f.avg_amplitude > 0.6 && f.variance > 0.2 && f.spike_rate > 0.15,
        label: EmotionLabel::Anxiety,
        intensity: 82,
        descriptor: "anxious",
        energy: Energy::High,
        stress: StressLevel::High,
        quality: "tense, rapid fluctuations",
        tone: "Anxious or highly stressed - voice shows tension and rapid intensity changes",
    },
    VoiceRule {
        matches: |f| f.peak_amplitude > 0.75 && f.avg_amplitude > 0.45 && f.avg_amplitude < 0.6,
        label: EmotionLabel::Stress,
        intensity: 78,
        descriptor: "stressed",
        energy: Energy::High,
        stress: StressLevel::Elevated,
        quality: "strained with peaks",
        tone: "Under stress but maintaining some control - occasional intensity spikes",
    },
    VoiceRule {
        matches: |f| f.avg_amplitude > 0.65 && f.peak_amplitude > 0.85,
        label: EmotionLabel::Angry,
        intensity: 80,
        descriptor: "angry or frustrated",
        energy: Energy::VeryHigh,
        stress: StressLevel::High,
        quality: "loud and forceful",
        tone: "Strong emotions present - anger or intense frustration detected",
    },
    VoiceRule {
        matches: |f| f.avg_amplitude > 0.55 && f.avg_amplitude < 0.7 && f.variance < 0.15,
        label: EmotionLabel::Excited,
        intensity: 75,
        descriptor: "excited or happy",
        energy: Energy::High,
        stress: StressLevel::Low,
        quality: "energetic and steady",
        tone: "Positive energy - excitement or happiness with consistent tone",
    },
    VoiceRule {
        matches: |f| f.spike_rate > 0.18 && f.avg_amplitude > 0.5,
        label: EmotionLabel::Stress,
        intensity: 75,
        descriptor: "pressured",
        energy: Energy::High,
        stress: StressLevel::Elevated,
        quality: "clipped, frequent jumps",
        tone: "Pressured delivery - frequent sharp changes in loudness",
    },
    VoiceRule {
        matches: |f| f.avg_amplitude < 0.3 && f.variance < 0.1,
        label: EmotionLabel::Calm,
        intensity: 76,
        descriptor: "calm",
        energy: Energy::Low,
        stress: StressLevel::Low,
        quality: "soft and steady",
        tone: "Calm and peaceful - low, steady voice indicates relaxation",
    },
    VoiceRule {
        matches: |f| f.avg_amplitude < 0.3,
        label: EmotionLabel::Sad,
        intensity: 74,
        descriptor: "sad or tired",
        energy: Energy::VeryLow,
        stress: StressLevel::Low,
        quality: "subdued",
        tone: "Low energy with some variation - may indicate sadness or fatigue",
    },
    VoiceRule {
        matches: |f| f.avg_amplitude < 0.35 && f.variance < 0.1,
        label: EmotionLabel::Tired,
        intensity: 65,
        descriptor: "tired",
        energy: Energy::Low,
        stress: StressLevel::Normal,
        quality: "quiet and flat",
        tone: "Quiet, flat delivery - may indicate fatigue",
    },
    VoiceRule {
        matches: |f| f.avg_amplitude > 0.35 && f.avg_amplitude < 0.5 && f.variance < 0.12,
        label: EmotionLabel::Calm,
        intensity: 72,
        descriptor: "content",
        energy: Energy::Moderate,
        stress: StressLevel::Normal,
        quality: "steady and balanced",
        tone: "Emotionally balanced - consistent, moderate tone suggests contentment",
    },
    VoiceRule {
        matches: |f| f.variance > 0.25,
        label: EmotionLabel::Confusion,
        intensity: 68,
        descriptor: "emotionally varied",
        energy: Energy::Moderate,
        stress: StressLevel::Elevated,
        quality: "fluctuating",
        tone: "Experiencing mixed emotions - voice shows significant variation",
    },
];

/// Used when no rule fires and for silent recordings.
pub static NEUTRAL_VOICE_RULE: VoiceRule = VoiceRule {
    matches: |_| true,
    label: EmotionLabel::Neutral,
    intensity: 20,
    descriptor: "neutral",
    energy: Energy::Moderate,
    stress: StressLevel::Normal,
    quality: "normal",
    tone: "Neutral emotional state - balanced voice characteristics",
};

/// First matching rule, or the neutral rule. Silence (peak of zero) carries
/// no voice signal and always reads as neutral.
pub fn match_voice_rule(features: &AudioFeatures) -> &'static VoiceRule {
    if features.sample_count == 0 || features.peak_amplitude == 0.0 {
        return &NEUTRAL_VOICE_RULE;
    }
    VOICE_RULES
        .iter()
        .find(|rule| (rule.matches)(features))
        .unwrap_or(&NEUTRAL_VOICE_RULE)
}

pub fn classify_voice(features: &AudioFeatures) -> EmotionClassification {
    if features.sample_count == 0 {
        return EmotionClassification::neutral(0.0, "No audio samples to analyze");
    }
    let rule = match_voice_rule(features);
    EmotionClassification::new(
        rule.label,
        rule.intensity as f32,
        format!("Voice analysis detected {} from tone and speech patterns", rule.descriptor),
    )
}

pub fn analyze_voice_emotion(bytes: &[u8]) -> EmotionClassification {
    classify_voice(&extract_audio_features(bytes))
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer whose sampled bytes (every 50th) are exactly `values`.
    fn sampled(values: &[i8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(values.len() * SAMPLE_STRIDE);
        for &v in values {
            out.push(v as u8);
            out.extend(std::iter::repeat(0u8).take(SAMPLE_STRIDE - 1));
        }
        out
    }

    #[test]
    fn empty_buffer_is_neutral_zero_without_nan() {
        let f = extract_audio_features(&[]);
        assert_eq!(f.sample_count, 0);
        assert!(!f.avg_amplitude.is_nan());
        let c = classify_voice(&f);
        assert_eq!(c.label, EmotionLabel::Neutral);
        assert_eq!(c.intensity, 0);
    }

    #[test]
    fn all_zero_bytes_are_neutral_twenty() {
        let f = extract_audio_features(&vec![0u8; 16_000]);
        assert_eq!(f.avg_amplitude, 0.0);
        assert_eq!(f.variance, 0.0);
        assert_eq!(f.spike_rate, 0.0);
        let c = classify_voice(&f);
        assert_eq!(c.label, EmotionLabel::Neutral);
        assert_eq!(c.intensity, 20);
    }

    #[test]
    fn most_negative_byte_normalizes_to_one() {
        let f = extract_audio_features(&sampled(&[-128]));
        assert_eq!(f.peak_amplitude, 1.0);
        assert_eq!(f.sample_count, 1);
        assert_eq!(f.spike_rate, 0.0);
    }

    #[test]
    fn spike_rate_counts_adjacent_pairs() {
        // 0 → 64 (0.5 jump) → 64 → 0 (0.5 jump): 2 of 3 pairs spike.
        let f = extract_audio_features(&sampled(&[0, 64, 64, 0]));
        assert!((f.spike_rate - 2.0 / 3.0).abs() < 1e-6, "spike_rate={}", f.spike_rate);
    }

    #[test]
    fn steady_loud_signal_is_excited() {
        // Constant 0.625 amplitude: avg in (0.55, 0.7), no variance.
        let f = extract_audio_features(&sampled(&[80; 20]));
        let c = classify_voice(&f);
        assert_eq!(c.label, EmotionLabel::Excited);
        assert_eq!(c.intensity, 75);
    }

    #[test]
    fn loud_with_high_peak_is_angry() {
        // ~0.71 average, peak 0.99, small variance.
        let mut values = vec![90i8; 10];
        values.push(127);
        values.push(60);
        let f = extract_audio_features(&sampled(&values));
        assert!(f.avg_amplitude > 0.65 && f.peak_amplitude > 0.85);
        assert_eq!(classify_voice(&f).label, EmotionLabel::Angry);
    }

    #[test]
    fn quiet_steady_signal_is_calm_and_quiet_varied_is_sad() {
        let calm = extract_audio_features(&sampled(&[10; 10]));
        assert_eq!(classify_voice(&calm).label, EmotionLabel::Calm);

        let varied = extract_audio_features(&sampled(&[0, 60, 0, 60, 0, 60, 0, 2]));
        assert!(varied.avg_amplitude < 0.3 && varied.variance >= 0.1);
        assert_eq!(classify_voice(&varied).label, EmotionLabel::Sad);
    }

    #[test]
    fn intensity_always_in_range() {
        for seed in 0u8..=255 {
            let bytes: Vec<u8> = (0..2_000u32).map(|i| (i as u8).wrapping_mul(seed)).collect();
            let c = analyze_voice_emotion(&bytes);
            assert!(c.intensity <= 100);
        }
    }
}
