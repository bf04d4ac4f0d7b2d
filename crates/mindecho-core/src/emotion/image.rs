// ── Emotion: Image Feature Extraction & Classification ─────────────────────
//
// Brightness, channel balance and contrast over decoded RGBA pixels.
// The classifier reads lighting and color tone, not faces; the face-likely
// flag is a separate midtone heuristic reported alongside the label.

use super::{EmotionClassification, EmotionLabel};
use serde::{Deserialize, Serialize};

const TONE_MARGIN: f32 = 15.0;
const DARK_BELOW: f32 = 70.0;
const BRIGHT_ABOVE: f32 = 185.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTone {
    Warm,
    Cool,
    Balanced,
}

impl ColorTone {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorTone::Warm => "warm",
            ColorTone::Cool => "cool",
            ColorTone::Balanced => "balanced",
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Features
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFeatures {
    pub pixel_count: usize,
    /// Mean of (R+G+B)/3, 0..=255.
    pub brightness: f32,
    /// (max brightness − min brightness) / 255.
    pub contrast: f32,
    pub red_avg: f32,
    pub green_avg: f32,
    pub blue_avg: f32,
    pub color_tone: ColorTone,
    pub dark_fraction: f32,
    pub bright_fraction: f32,
    pub midtone_fraction: f32,
    /// Mean of |r−g| + |g−b| + |b−r| per pixel.
    pub color_variance: f32,
}

/// `rgba` is a packed RGBA8 buffer; a trailing partial pixel is ignored.
pub fn extract_image_features(rgba: &[u8]) -> ImageFeatures {
    let mut total_brightness = 0.0_f64;
    let (mut red, mut green, mut blue) = (0.0_f64, 0.0_f64, 0.0_f64);
    let (mut min_b, mut max_b) = (255.0_f32, 0.0_f32);
    let (mut dark, mut bright, mut midtone) = (0usize, 0usize, 0usize);
    let mut color_variance = 0.0_f64;
    let mut count = 0usize;

    for px in rgba.chunks_exact(4) {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        let brightness = (r + g + b) / 3.0;

        total_brightness += brightness as f64;
        red += r as f64;
        green += g as f64;
        blue += b as f64;
        min_b = min_b.min(brightness);
        max_b = max_b.max(brightness);

        if brightness < DARK_BELOW {
            dark += 1;
        } else if brightness > BRIGHT_ABOVE {
            bright += 1;
        } else {
            midtone += 1;
        }

        color_variance += ((r - g).abs() + (g - b).abs() + (b - r).abs()) as f64;
        count += 1;
    }

    if count == 0 {
        return ImageFeatures {
            pixel_count: 0,
            brightness: 0.0,
            contrast: 0.0,
            red_avg: 0.0,
            green_avg: 0.0,
            blue_avg: 0.0,
            color_tone: ColorTone::Balanced,
            dark_fraction: 0.0,
            bright_fraction: 0.0,
            midtone_fraction: 0.0,
            color_variance: 0.0,
        };
    }

    let n = count as f64;
    let red_avg = (red / n) as f32;
    let green_avg = (green / n) as f32;
    let blue_avg = (blue / n) as f32;

    ImageFeatures {
        pixel_count: count,
        brightness: (total_brightness / n) as f32,
        contrast: (max_b - min_b) / 255.0,
        red_avg,
        green_avg,
        blue_avg,
        color_tone: color_tone(red_avg, green_avg, blue_avg),
        dark_fraction: dark as f32 / count as f32,
        bright_fraction: bright as f32 / count as f32,
        midtone_fraction: midtone as f32 / count as f32,
        color_variance: (color_variance / n) as f32,
    }
}

fn color_tone(r: f32, g: f32, b: f32) -> ColorTone {
    if r > g + TONE_MARGIN && r > b + TONE_MARGIN {
        ColorTone::Warm
    } else if b > r + TONE_MARGIN && b > g + TONE_MARGIN {
        ColorTone::Cool
    } else {
        ColorTone::Balanced
    }
}

/// Midtone-heavy frames in a mid brightness band usually contain a lit face.
pub fn face_likely(features: &ImageFeatures) -> bool {
    features.brightness > 70.0 && features.brightness < 210.0 && features.midtone_fraction > 0.4
}

// ═════════════════════════════════════════════════════════════════════════════
// Classification
// ═════════════════════════════════════════════════════════════════════════════

struct VisualRule {
    matches: fn(&ImageFeatures) -> bool,
    label: EmotionLabel,
    intensity: u8,
}

// Ordered by intensity so the first match is also the strongest signal.
static VISUAL_RULES: &[VisualRule] = &[
    VisualRule {
        matches: |f| f.contrast > 0.7 && f.color_tone == ColorTone::Warm,
        label: EmotionLabel::Angry,
        intensity: 80,
    },
    VisualRule {
        matches: |f| f.brightness > 150.0 && f.color_tone == ColorTone::Warm,
        label: EmotionLabel::Happy,
        intensity: 75,
    },
    VisualRule {
        matches: |f| f.brightness < 80.0 && f.color_tone == ColorTone::Cool,
        label: EmotionLabel::Sad,
        intensity: 70,
    },
    VisualRule {
        matches: |f| f.brightness > 120.0 && f.brightness < 180.0 && f.color_tone == ColorTone::Balanced,
        label: EmotionLabel::Calm,
        intensity: 70,
    },
    VisualRule {
        matches: |f| f.brightness > 100.0 && f.brightness < 160.0 && f.contrast > 0.5,
        label: EmotionLabel::Anxiety,
        intensity: 65,
    },
];

pub fn classify_visual(features: &ImageFeatures) -> EmotionClassification {
    if features.pixel_count == 0 {
        return EmotionClassification::neutral(0.0, "Unable to analyze facial expression");
    }
    let (label, intensity) = VISUAL_RULES
        .iter()
        .find(|rule| (rule.matches)(features))
        .map(|rule| (rule.label, rule.intensity))
        .unwrap_or((EmotionLabel::Neutral, 20));
    EmotionClassification::new(
        label,
        intensity as f32,
        format!("Facial analysis detected {label} from expression and appearance"),
    )
}

pub fn analyze_visual_emotion(rgba: &[u8]) -> EmotionClassification {
    classify_visual(&extract_image_features(rgba))
}
