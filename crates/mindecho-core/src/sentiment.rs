// ── Sentiment & Crisis Gate ────────────────────────────────────────────────
//
// Keyword tables here are maintained independently of `emotion::text`.
// The two overlap but neither is derived from the other; each is tested
// on its own.
//
// Gate order: crisis keyword or indicator ceiling → fixed crisis message.
// Otherwise positive/negative hit counts decide the coarse sentiment.

use crate::fusion::MentalHealthIndicators;
use crate::mood::MoodEntry;
use serde::{Deserialize, Serialize};

pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "no reason to live",
    "hurt myself",
    "self harm",
    "better off dead",
    "can't go on",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad", "depressed", "anxious", "worried", "scared", "angry", "frustrated", "overwhelmed",
    "stressed", "tired", "exhausted", "lonely", "isolated", "hopeless", "worthless", "failure",
    "can't", "struggling", "difficult", "pain", "hurt", "crying", "awful", "terrible", "miserable",
    "hate",
];

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "happy", "good", "great", "better", "improving", "grateful", "thankful", "proud",
    "accomplished", "excited", "hopeful", "optimistic", "calm", "peaceful", "relaxed", "content",
    "joy", "love", "wonderful", "amazing",
];

const DEPRESSION_CEILING: f32 = 85.0;
const ANXIETY_CEILING: f32 = 90.0;

pub const CRISIS_RESPONSE: &str = "I'm really concerned about what you're sharing. Your life matters, \
and there are people who want to help you right now. Please reach out to a crisis helpline immediately:

**National Suicide Prevention Lifeline:** 988 or 1-800-273-8255
**Crisis Text Line:** Text HOME to 741741
**International Association for Suicide Prevention:** https://www.iasp.info/resources/Crisis_Centres/

You don't have to face this alone. Professional support is available 24/7. Please reach out now.";

// ═════════════════════════════════════════════════════════════════════════════
// Types
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Crisis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportType {
    Validation,
    Coping,
    Encouragement,
    Crisis,
    Exploration,
}

/// Keyword families used to pick a coping strategy. Declaration order is
/// detection order, so the first detected concern is the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernCategory {
    Anxiety,
    Depression,
    Anger,
    Loneliness,
    Overwhelm,
    Grief,
}

impl ConcernCategory {
    pub const ALL: [ConcernCategory; 6] = [
        ConcernCategory::Anxiety,
        ConcernCategory::Depression,
        ConcernCategory::Anger,
        ConcernCategory::Loneliness,
        ConcernCategory::Overwhelm,
        ConcernCategory::Grief,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ConcernCategory::Anxiety => &["anxious", "worried", "nervous", "panic", "fear", "scared", "stress"],
            ConcernCategory::Depression => &["sad", "depressed", "empty", "hopeless", "worthless", "numb"],
            ConcernCategory::Anger => &["angry", "frustrated", "furious", "irritated", "mad", "annoyed"],
            ConcernCategory::Loneliness => &["lonely", "isolated", "alone", "abandoned", "disconnected"],
            ConcernCategory::Overwhelm => &["overwhelmed", "too much", "can't handle", "exhausted", "burned out"],
            ConcernCategory::Grief => &["loss", "grieving", "miss", "died", "gone", "mourning"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodConcern {
    #[serde(rename = "persistent low mood")]
    PersistentLowMood,
    #[serde(rename = "declining mood trend")]
    DecliningTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    pub concerns: Vec<ConcernCategory>,
    pub mood_concerns: Vec<MoodConcern>,
    pub support_type: SupportType,
}

impl SentimentReport {
    pub fn is_crisis(&self) -> bool {
        self.sentiment == Sentiment::Crisis
    }

    pub fn primary_concern(&self) -> Option<ConcernCategory> {
        self.concerns.first().copied()
    }

    pub fn has_mood_concern(&self, concern: MoodConcern) -> bool {
        self.mood_concerns.contains(&concern)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Gate
// ═════════════════════════════════════════════════════════════════════════════

pub fn contains_crisis_keyword(message: &str) -> bool {
    let lower = message.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn count_hits(lower: &str, table: &[&str]) -> usize {
    table.iter().filter(|k| lower.contains(*k)).count()
}

pub fn detect_concerns(message: &str) -> Vec<ConcernCategory> {
    let lower = message.to_lowercase();
    ConcernCategory::ALL
        .into_iter()
        .filter(|c| c.keywords().iter().any(|k| lower.contains(k)))
        .collect()
}

/// Mood-pattern concerns over a chronological window. Needs at least three
/// entries.
pub fn mood_concerns(recent: &[MoodEntry]) -> Vec<MoodConcern> {
    let mut out = Vec::new();
    if recent.len() < 3 {
        return out;
    }

    let mean = recent.iter().map(|m| m.intensity as f32).sum::<f32>() / recent.len() as f32;
    let negatives = recent.iter().filter(|m| m.mood.is_negative()).count();
    if mean <= 3.0 && negatives >= 2 {
        out.push(MoodConcern::PersistentLowMood);
    }

    let never_rises = recent.windows(2).all(|w| w[1].intensity <= w[0].intensity);
    let last_low = recent.last().is_some_and(|m| m.intensity < 4);
    if never_rises && last_low {
        out.push(MoodConcern::DecliningTrend);
    }
    out
}

pub fn analyze_sentiment(
    message: &str,
    indicators: &MentalHealthIndicators,
    recent: &[MoodEntry],
) -> SentimentReport {
    let lower = message.to_lowercase();

    if contains_crisis_keyword(&lower)
        || indicators.depression > DEPRESSION_CEILING
        || indicators.anxiety > ANXIETY_CEILING
    {
        log::warn!("[sentiment] Crisis gate triggered");
        return SentimentReport {
            sentiment: Sentiment::Crisis,
            concerns: Vec::new(),
            mood_concerns: Vec::new(),
            support_type: SupportType::Crisis,
        };
    }

    let negative = count_hits(&lower, NEGATIVE_KEYWORDS);
    let positive = count_hits(&lower, POSITIVE_KEYWORDS);
    let sentiment = match negative.cmp(&positive) {
        std::cmp::Ordering::Greater => Sentiment::Negative,
        std::cmp::Ordering::Less => Sentiment::Positive,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };

    let concerns = detect_concerns(&lower);
    let support_type = if lower.contains('?') {
        SupportType::Exploration
    } else if sentiment == Sentiment::Positive {
        SupportType::Encouragement
    } else if !concerns.is_empty() {
        SupportType::Coping
    } else {
        SupportType::Validation
    };

    log::debug!(
        "[sentiment] {:?} (neg={} pos={}) support={:?} concerns={:?}",
        sentiment,
        negative,
        positive,
        support_type,
        concerns
    );

    SentimentReport {
        sentiment,
        concerns,
        mood_concerns: mood_concerns(recent),
        support_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{MoodEntry, MoodLabel};

    fn calm() -> MentalHealthIndicators {
        MentalHealthIndicators::default()
    }

    fn moods(seq: &[(MoodLabel, u8)]) -> Vec<MoodEntry> {
        seq.iter()
            .map(|(mood, intensity)| MoodEntry::new(*mood, Some(*intensity), None).unwrap())
            .collect()
    }

    #[test]
    fn crisis_keyword_any_case() {
        let r = analyze_sentiment("Sometimes I want to KILL MYSELF", &calm(), &[]);
        assert!(r.is_crisis());
        assert_eq!(r.support_type, SupportType::Crisis);
    }

    #[test]
    fn indicator_ceiling_triggers_crisis() {
        let anxious = MentalHealthIndicators {
            anxiety: 91.0,
            ..Default::default()
        };
        assert!(analyze_sentiment("hello there", &anxious, &[]).is_crisis());

        let at_ceiling = MentalHealthIndicators {
            anxiety: 90.0,
            depression: 85.0,
            ..Default::default()
        };
        assert!(!analyze_sentiment("hello there", &at_ceiling, &[]).is_crisis());
    }

    #[test]
    fn hit_counts_decide_sentiment() {
        assert_eq!(
            analyze_sentiment("I'm sad and tired", &calm(), &[]).sentiment,
            Sentiment::Negative
        );
        assert_eq!(
            analyze_sentiment("I feel grateful and calm", &calm(), &[]).sentiment,
            Sentiment::Positive
        );
        assert_eq!(
            analyze_sentiment("sad but grateful", &calm(), &[]).sentiment,
            Sentiment::Neutral
        );
    }

    #[test]
    fn support_type_precedence() {
        let r = analyze_sentiment("am I happy?", &calm(), &[]);
        assert_eq!(r.support_type, SupportType::Exploration);

        let r = analyze_sentiment("I feel great", &calm(), &[]);
        assert_eq!(r.support_type, SupportType::Encouragement);

        let r = analyze_sentiment("I'm so worried about work", &calm(), &[]);
        assert_eq!(r.support_type, SupportType::Coping);
        assert_eq!(r.primary_concern(), Some(ConcernCategory::Anxiety));

        let r = analyze_sentiment("nothing is going right", &calm(), &[]);
        assert_eq!(r.support_type, SupportType::Validation);
    }

    #[test]
    fn concerns_keep_declaration_order() {
        let found = detect_concerns("I miss her and I'm so lonely and sad");
        assert_eq!(
            found,
            vec![
                ConcernCategory::Depression,
                ConcernCategory::Loneliness,
                ConcernCategory::Grief
            ]
        );
    }

    #[test]
    fn persistent_low_mood_detected() {
        let recent = moods(&[
            (MoodLabel::Terrible, 1),
            (MoodLabel::Bad, 2),
            (MoodLabel::Terrible, 1),
            (MoodLabel::Bad, 2),
        ]);
        let found = mood_concerns(&recent);
        assert!(found.contains(&MoodConcern::PersistentLowMood));
        assert!(!found.contains(&MoodConcern::DecliningTrend));
    }

    #[test]
    fn declining_trend_detected() {
        let recent = moods(&[(MoodLabel::Good, 4), (MoodLabel::Okay, 3), (MoodLabel::Okay, 3)]);
        assert_eq!(mood_concerns(&recent), vec![MoodConcern::DecliningTrend]);
    }

    #[test]
    fn fewer_than_three_moods_yield_nothing() {
        let recent = moods(&[(MoodLabel::Terrible, 1), (MoodLabel::Terrible, 1)]);
        assert!(mood_concerns(&recent).is_empty());
    }
}
