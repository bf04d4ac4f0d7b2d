// ── Response Generator ─────────────────────────────────────────────────────
//
// Assembles the assistant reply from fixed template pools, in order:
//
//   a. modality acknowledgment (voice / expression cues)
//   b. validation keyed by sentiment, with topic / progress prefixes
//   c. mood-trend observations and mood-pattern concerns
//   d. one coping strategy for the primary concern
//   e. encouragement (positive turns) and a follow-up question
//
// Pure string construction. The only nondeterminism is the injected RNG,
// so a seeded generator reproduces a reply byte for byte.

pub mod context;
pub mod templates;

pub use context::{ChatMessage, ConversationContext, JourneyStep, Role};

use crate::emotion::audio::StressLevel;
use crate::fusion::FusedAnalysis;
use crate::mood::MoodEntry;
use crate::sentiment::{
    ConcernCategory, MoodConcern, Sentiment, SentimentReport, SupportType, CRISIS_RESPONSE,
};
use rand::seq::SliceRandom;
use rand::Rng;
use templates::*;

/// Voice cue as reported by the voice analysis: the human descriptor and
/// the stress level when known.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCue {
    pub descriptor: String,
    pub stress: Option<StressLevel>,
}

/// Non-text signals available for the acknowledgment sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalityCues {
    pub voice: Option<VoiceCue>,
    /// Dominant expression descriptor from the image analysis.
    pub visual: Option<String>,
}

impl ModalityCues {
    fn voice_stress(&self) -> Option<StressLevel> {
        self.voice.as_ref().and_then(|v| v.stress)
    }
}

pub struct ResponseInput<'a> {
    pub message: &'a str,
    pub analysis: &'a FusedAnalysis,
    pub sentiment: &'a SentimentReport,
    pub history: &'a [ChatMessage],
    /// Chronological, oldest first.
    pub recent_moods: &'a [MoodEntry],
    pub cues: &'a ModalityCues,
}

fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub fn generate_response<R: Rng + ?Sized>(input: &ResponseInput<'_>, rng: &mut R) -> String {
    if input.sentiment.is_crisis() {
        return CRISIS_RESPONSE.to_string();
    }

    let ctx = ConversationContext::from_history(input.history);
    let mut parts: Vec<String> = Vec::new();

    // a.
    if let Some(ack) = acknowledge_modalities(input.cues) {
        parts.push(ack);
    }

    // b.
    let sentiment = input.sentiment.sentiment;
    match sentiment {
        Sentiment::Negative if ctx.session_length > 3 => {
            if let Some(topic) = ctx.revisited_topic(input.message) {
                parts.push(format!("I remember you mentioned {topic} earlier."));
            }
        }
        Sentiment::Positive if ctx.has_improved() => parts.push(POSITIVE_SHIFT.to_string()),
        _ => {}
    }
    parts.push(pick(validation_pool(sentiment), rng).to_string());

    // c.
    parts.extend(mood_trend(input.recent_moods).into_iter().map(str::to_string));
    if input.sentiment.has_mood_concern(MoodConcern::PersistentLowMood) {
        parts.push(PERSISTENT_LOW_MOOD.to_string());
    }
    if input.sentiment.has_mood_concern(MoodConcern::DecliningTrend) {
        parts.push(DECLINING_MOOD.to_string());
    }

    // d.
    let topic = input
        .sentiment
        .primary_concern()
        .or_else(|| coping_topic(input.analysis.fused.label));
    if let Some(topic) = topic {
        parts.push(pick(coping_strategies(topic), rng).to_string());
        if topic == ConcernCategory::Anxiety && input.cues.voice_stress() == Some(StressLevel::High) {
            parts.push(DIAPHRAGMATIC_TIP.to_string());
        }
    }

    // e.
    if sentiment == Sentiment::Positive && input.sentiment.support_type == SupportType::Encouragement {
        parts.push(pick(ENCOURAGEMENTS, rng).to_string());
    }
    parts.push(follow_up(&ctx, rng));

    parts.join(" ").trim().to_string()
}

fn acknowledge_modalities(cues: &ModalityCues) -> Option<String> {
    match (&cues.voice, &cues.visual) {
        (Some(voice), Some(face)) if !voice.descriptor.eq_ignore_ascii_case(face) => Some(format!(
            "I notice something interesting - your voice suggests {}, but your expression shows {}. \
             Sometimes we feel one way internally but show another externally. \
             It's okay to have complex, layered emotions.",
            voice.descriptor, face
        )),
        (Some(voice), _) => {
            let tense = voice.stress.is_some_and(StressLevel::is_tense);
            Some(if tense {
                format!("I can hear {} in your voice, and I notice some tension there.", voice.descriptor)
            } else {
                format!("I can hear {} in your voice.", voice.descriptor)
            })
        }
        (None, Some(face)) => Some(format!("I can see {face} in your expression.")),
        (None, None) => None,
    }
}

/// Observation over the 1..=5 scale of the recent moods. Needs three.
fn mood_trend(recent: &[MoodEntry]) -> Vec<&'static str> {
    let mut out = Vec::new();
    if recent.len() < 3 {
        return out;
    }
    let values: Vec<f32> = recent.iter().map(|m| m.mood.scale() as f32).collect();
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let last_three = &values[values.len() - 3..];
    let improving = last_three[2] > last_three[0];
    let declining = last_three[2] < last_three[0];

    if mean < 2.5 {
        out.push(TREND_TOUGH);
        if improving {
            out.push(TREND_RESILIENCE);
        }
    } else if mean > 3.8 {
        out.push(TREND_POSITIVE);
    } else if declining && mean < 3.5 {
        out.push(TREND_HARDER);
    }
    out
}

fn follow_up<R: Rng + ?Sized>(ctx: &ConversationContext, rng: &mut R) -> String {
    if ctx.session_length < 3 {
        return pick(QUESTIONS_EARLY, rng).to_string();
    }
    match ctx.topics.first() {
        Some(topic) => pick(QUESTIONS_TOPIC, rng).replace("{}", topic),
        None => pick(QUESTIONS_DEEPER, rng).to_string(),
    }
}
