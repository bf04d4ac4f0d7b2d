// ── Emotion: Text Feature Extraction & Classification ──────────────────────
//
// Keyword scoring over the lower-cased message. Each category scores 20 per
// matched keyword plus 10 per repeat occurrence, capped at 100, then a global
// intensity multiplier from adverbs is applied to the non-zero scores.
// No model required: one pass per keyword, deterministic apart from the
// explanation string, which comes from the injected RNG.

use super::{clamp_intensity, EmotionClassification, EmotionLabel};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Scores below this collapse to neutral.
const MIN_DOMINANT_SCORE: f32 = 15.0;
const NEUTRAL_FALLBACK_SCORE: f32 = 20.0;
const KEYWORD_BASE_SCORE: f32 = 20.0;
const KEYWORD_REPEAT_SCORE: f32 = 10.0;

const HIGH_INTENSITY_MULTIPLIER: f32 = 1.5;
const LOW_INTENSITY_MULTIPLIER: f32 = 0.6;

/// Adverbs that amplify every detected emotion.
const HIGH_MODIFIERS: &[&str] = &[
    "very",
    "extremely",
    "so",
    "really",
    "incredibly",
    "absolutely",
    "totally",
    "completely",
    "utterly",
];

/// Hedges that dampen every detected emotion. Checked after the high list,
/// so a hedge wins when both appear.
const LOW_MODIFIERS: &[&str] = &["a bit", "slightly", "a little", "kind of", "sort of", "maybe"];

/// General-purpose lexicon reported alongside the category scores.
const POSITIVE_LEXICON: &[&str] = &[
    "good",
    "great",
    "happy",
    "love",
    "wonderful",
    "amazing",
    "excellent",
    "positive",
    "joy",
    "glad",
];

const NEGATIVE_LEXICON: &[&str] = &[
    "bad", "terrible", "hate", "sad", "awful", "horrible", "negative", "pain", "hurt", "wrong",
];

// ═════════════════════════════════════════════════════════════════════════════
// Per-label tables
// ═════════════════════════════════════════════════════════════════════════════

/// Substring patterns for each category. Some are stems ("depress", "frustrat").
pub fn keywords(label: EmotionLabel) -> &'static [&'static str] {
    match label {
        EmotionLabel::Happy => &[
            "happy", "joy", "glad", "wonderful", "amazing", "great", "fantastic", "love",
            "delighted", "cheerful",
        ],
        EmotionLabel::Sad => &[
            "sad", "depress", "down", "miserable", "unhappy", "cry", "tears", "heartbr", "sorrow",
            "grief",
        ],
        EmotionLabel::Angry => &[
            "angry",
            "mad",
            "furious",
            "rage",
            "hate",
            "pissed",
            "irritat",
            "frustrat",
            "done with",
            "leave me alone",
        ],
        EmotionLabel::Fear => &["afraid", "scared", "terrif", "panic", "dread", "frighten", "horror"],
        EmotionLabel::Disgust => &["disgust", "repuls", "gross", "sick of", "nauseating", "revolting"],
        EmotionLabel::Surprise => &[
            "surprise",
            "shock",
            "amazed",
            "unexpected",
            "didn't see",
            "wow",
            "can't believe",
        ],
        EmotionLabel::Neutral => &[
            "fine",
            "okay",
            "whatever",
            "neutral",
            "nothing special",
            "meh",
            "alright",
        ],
        EmotionLabel::Stress => &[
            "stress",
            "pressure",
            "overwhelm",
            "burden",
            "too much",
            "can't handle",
            "breaking point",
            "stretched thin",
        ],
        EmotionLabel::Anxiety => &[
            "anxious",
            "worry",
            "nervous",
            "panic",
            "overthink",
            "can't stop thinking",
            "racing thoughts",
            "restless",
            "uneasy",
            "chest feels heavy",
        ],
        EmotionLabel::Confusion => &[
            "confus",
            "don't understand",
            "lost",
            "unclear",
            "mixed up",
            "don't know what",
            "puzzled",
        ],
        EmotionLabel::Lonely => &[
            "lonely",
            "alone",
            "isolated",
            "nobody",
            "no one",
            "by myself",
            "disconnected",
            "abandoned",
        ],
        EmotionLabel::Excited => &[
            "excited",
            "thrilled",
            "pumped",
            "can't wait",
            "enthusiastic",
            "eager",
            "hyped",
            "energized",
        ],
        EmotionLabel::Tired => &[
            "tired",
            "exhausted",
            "weary",
            "drained",
            "fatigued",
            "worn out",
            "sleepy",
            "long day",
        ],
        EmotionLabel::Hopeless => &[
            "hopeless",
            "pointless",
            "nothing is going right",
            "give up",
            "no point",
            "can't see a way",
            "meaningless",
            "defeated",
        ],
        EmotionLabel::Overwhelmed => &[
            "overwhelm",
            "too much",
            "can't cope",
            "drowning",
            "buried",
            "swamped",
            "flooded",
        ],
        EmotionLabel::Calm => &[
            "calm", "peace", "relaxed", "tranquil", "serene", "composed", "centered", "balanced",
        ],
        EmotionLabel::Motivated => &[
            "motivated",
            "driven",
            "determined",
            "inspired",
            "goal",
            "push",
            "commit",
            "focused",
        ],
    }
}

pub fn explanations(label: EmotionLabel) -> &'static [&'static str; 3] {
    match label {
        EmotionLabel::Happy => &[
            "The user openly expresses joy and positive feelings",
            "Positive language indicates happiness and contentment",
            "The user's words reflect a cheerful and optimistic state",
        ],
        EmotionLabel::Sad => &[
            "The user expresses sadness and emotional pain",
            "Language suggests feelings of unhappiness and sorrow",
            "The user indicates they are experiencing sadness",
        ],
        EmotionLabel::Angry => &[
            "Aggressive language indicates strong anger",
            "The user expresses frustration and irritation",
            "Words suggest anger and frustration with the situation",
        ],
        EmotionLabel::Fear => &[
            "The user expresses fear and apprehension",
            "Language indicates anxiety about a threatening situation",
            "The user shows signs of being afraid or scared",
        ],
        EmotionLabel::Disgust => &[
            "The user expresses disgust or revulsion",
            "Language suggests strong negative reaction",
            "Words indicate feelings of disgust",
        ],
        EmotionLabel::Surprise => &[
            "The user expresses unexpected surprise",
            "Language indicates shock or amazement",
            "Words reflect an unexpected situation",
        ],
        EmotionLabel::Neutral => &[
            "The user expresses an emotionally flat state",
            "Language suggests a neutral or balanced mood",
            "No strong emotions are evident in the message",
        ],
        EmotionLabel::Stress => &[
            "The user reports feeling pressured and stressed",
            "Language indicates high stress and overwhelm",
            "Words suggest the user is under significant pressure",
        ],
        EmotionLabel::Anxiety => &[
            "Physical and mental tension indicate high anxiety",
            "The user expresses worry and nervous thoughts",
            "Language suggests anxious overthinking and restlessness",
        ],
        EmotionLabel::Confusion => &[
            "The user expresses confusion and uncertainty",
            "Language indicates lack of clarity or understanding",
            "Words suggest the user feels lost or unclear",
        ],
        EmotionLabel::Lonely => &[
            "The user expresses feelings of isolation and loneliness",
            "Language suggests disconnection from others",
            "Words indicate the user feels alone and isolated",
        ],
        EmotionLabel::Excited => &[
            "The user openly expresses excitement and enthusiasm",
            "Language reflects high energy and anticipation",
            "Words indicate the user is thrilled about something",
        ],
        EmotionLabel::Tired => &[
            "The user reports mild fatigue without distress",
            "Language suggests physical and mental exhaustion",
            "Words indicate the user is feeling drained or weary",
        ],
        EmotionLabel::Hopeless => &[
            "The user expresses a loss of optimism and discouragement",
            "Language indicates feelings of defeat and hopelessness",
            "Words suggest the user sees no positive outcome",
        ],
        EmotionLabel::Overwhelmed => &[
            "The user feels buried under too many demands",
            "Language indicates inability to cope with current load",
            "Words suggest the user is drowning in responsibilities",
        ],
        EmotionLabel::Calm => &[
            "The user expresses peace and tranquility",
            "Language reflects a balanced and centered state",
            "Words indicate the user feels relaxed and composed",
        ],
        EmotionLabel::Motivated => &[
            "The user expresses determination and drive",
            "Language reflects goal-oriented thinking",
            "Words indicate the user feels inspired and focused",
        ],
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Feature extraction
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFeatures {
    /// Final per-category scores (multiplier applied), in `EmotionLabel::ALL` order.
    pub scores: Vec<(EmotionLabel, f32)>,
    pub intensity_multiplier: f32,
    pub word_count: usize,
    pub sentence_count: usize,
    pub question_count: usize,
    pub exclamation_count: usize,
    pub capital_ratio: f32,
    pub positive_word_count: usize,
    pub negative_word_count: usize,
}

impl TextFeatures {
    pub fn score(&self, label: EmotionLabel) -> f32 {
        self.scores
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, s)| *s)
            .unwrap_or(0.0)
    }

    /// Highest-scoring category; the earliest label wins ties.
    pub fn dominant(&self) -> (EmotionLabel, f32) {
        let mut best = (EmotionLabel::Neutral, 0.0_f32);
        for &(label, score) in &self.scores {
            if score > best.1 {
                best = (label, score);
            }
        }
        if best.1 < MIN_DOMINANT_SCORE {
            (EmotionLabel::Neutral, NEUTRAL_FALLBACK_SCORE)
        } else {
            best
        }
    }
}

pub fn extract_text_features(text: &str) -> TextFeatures {
    let lower = text.to_lowercase();

    let multiplier = intensity_multiplier(&lower);

    let scores = EmotionLabel::ALL
        .iter()
        .map(|&label| {
            let raw = keyword_score(&lower, keywords(label));
            let scaled = if raw > 0.0 { (raw * multiplier).min(100.0) } else { 0.0 };
            (label, scaled)
        })
        .collect();

    let char_count = text.chars().count();
    let capitals = text.chars().filter(|c| c.is_uppercase()).count();

    TextFeatures {
        scores,
        intensity_multiplier: multiplier,
        word_count: text.split_whitespace().count(),
        sentence_count: text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count(),
        question_count: text.matches('?').count(),
        exclamation_count: text.matches('!').count(),
        capital_ratio: if char_count == 0 { 0.0 } else { capitals as f32 / char_count as f32 },
        positive_word_count: count_present(&lower, POSITIVE_LEXICON),
        negative_word_count: count_present(&lower, NEGATIVE_LEXICON),
    }
}

fn keyword_score(lower: &str, patterns: &[&str]) -> f32 {
    let mut score = 0.0;
    for pattern in patterns {
        let occurrences = lower.matches(pattern).count();
        if occurrences > 0 {
            score += KEYWORD_BASE_SCORE + (occurrences - 1) as f32 * KEYWORD_REPEAT_SCORE;
        }
    }
    score.min(100.0)
}

fn intensity_multiplier(lower: &str) -> f32 {
    let mut multiplier = 1.0;
    if HIGH_MODIFIERS.iter().any(|m| lower.contains(m)) {
        multiplier = HIGH_INTENSITY_MULTIPLIER;
    }
    if LOW_MODIFIERS.iter().any(|m| lower.contains(m)) {
        multiplier = LOW_INTENSITY_MULTIPLIER;
    }
    multiplier
}

fn count_present(lower: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| lower.contains(**w)).count()
}

// ═════════════════════════════════════════════════════════════════════════════
// Classification
// ═════════════════════════════════════════════════════════════════════════════

/// Classify a message. The RNG only selects the explanation sentence.
pub fn analyze_text_emotion<R: Rng + ?Sized>(text: &str, rng: &mut R) -> EmotionClassification {
    let features = extract_text_features(text);
    classify_text(&features, rng)
}

pub fn classify_text<R: Rng + ?Sized>(features: &TextFeatures, rng: &mut R) -> EmotionClassification {
    let (label, score) = features.dominant();
    let explanation = explanations(label)
        .choose(rng)
        .copied()
        .unwrap_or("No strong emotions are evident in the message");
    EmotionClassification {
        label,
        intensity: clamp_intensity(score),
        explanation: explanation.to_string(),
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════
