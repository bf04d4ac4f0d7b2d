// Fixed sentence pools for reply assembly. Selection is done by the caller
// with an injected RNG; nothing here is random.

use crate::emotion::EmotionLabel;
use crate::sentiment::{ConcernCategory, Sentiment};

// ── Validation ─────────────────────────────────────────────────────────────

pub const VALIDATION_NEGATIVE: &[&str] = &[
    "It's completely understandable to feel this way given what you're going through.",
    "What you're feeling is valid, and I'm here to support you through this.",
    "I hear you, and your feelings make sense. Thank you for trusting me with this.",
    "These feelings are real and important. You're not alone in experiencing them.",
];

pub const VALIDATION_POSITIVE: &[&str] = &[
    "I'm genuinely glad to hear there's some brightness in your day.",
    "It's wonderful that you're experiencing these positive feelings. That matters.",
    "That's really great to hear! It's important to recognize and celebrate these moments.",
];

pub const VALIDATION_NEUTRAL: &[&str] = &[
    "Thank you for sharing that with me. I'm here to listen and support you.",
    "I appreciate you opening up about this. Your thoughts and feelings matter.",
];

pub fn validation_pool(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Negative => VALIDATION_NEGATIVE,
        Sentiment::Positive => VALIDATION_POSITIVE,
        Sentiment::Neutral | Sentiment::Crisis => VALIDATION_NEUTRAL,
    }
}

pub const POSITIVE_SHIFT: &str = "I'm noticing a positive shift from our earlier conversation.";

// ── Mood trend ─────────────────────────────────────────────────────────────

pub const TREND_TOUGH: &str = "I've been noticing you've been having a really tough time lately.";
pub const TREND_RESILIENCE: &str =
    "Though I do see some slight improvement, which shows your resilience.";
pub const TREND_POSITIVE: &str = "I'm glad to see you've been feeling more positive recently.";
pub const TREND_HARDER: &str = "I notice things have been feeling a bit harder lately.";

pub const PERSISTENT_LOW_MOOD: &str = "I've noticed you've been struggling for a while. Have you \
considered talking to a mental health professional? They can provide specialized support.";
pub const DECLINING_MOOD: &str = "I'm noticing your mood has been declining. It's important to \
reach out for support when things feel like they're getting harder.";

// ── Coping ─────────────────────────────────────────────────────────────────

/// Coping topic for a fused label. Labels with no distress signal map to
/// `None` and get no strategy.
pub fn coping_topic(label: EmotionLabel) -> Option<ConcernCategory> {
    match label {
        EmotionLabel::Sad | EmotionLabel::Hopeless => Some(ConcernCategory::Depression),
        EmotionLabel::Fear | EmotionLabel::Anxiety => Some(ConcernCategory::Anxiety),
        EmotionLabel::Angry | EmotionLabel::Disgust => Some(ConcernCategory::Anger),
        EmotionLabel::Lonely => Some(ConcernCategory::Loneliness),
        EmotionLabel::Stress | EmotionLabel::Overwhelmed | EmotionLabel::Tired => {
            Some(ConcernCategory::Overwhelm)
        }
        EmotionLabel::Happy
        | EmotionLabel::Surprise
        | EmotionLabel::Neutral
        | EmotionLabel::Confusion
        | EmotionLabel::Excited
        | EmotionLabel::Calm
        | EmotionLabel::Motivated => None,
    }
}

pub fn coping_strategies(topic: ConcernCategory) -> &'static [&'static str] {
    match topic {
        ConcernCategory::Anxiety => &[
            "Try the 5-4-3-2-1 grounding technique: Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, and 1 you taste.",
            "Take a few deep breaths: Breathe in for 4 counts, hold for 4, out for 4. This activates your body's calm response.",
            "Remember: anxiety is temporary. This feeling will pass, and you're safe right now.",
            "Try 4-7-8 breathing: breathe in for 4 counts, hold for 7, exhale slowly for 8. This can help calm your mind.",
        ],
        ConcernCategory::Depression => &[
            "Even small steps count. Can you do one tiny thing today that brings you comfort?",
            "Your feelings are valid, and it's okay to not be okay. Be gentle with yourself.",
            "Consider reaching out to someone you trust, or try a short walk outside. Movement can help shift mood.",
        ],
        ConcernCategory::Anger => &[
            "Your anger is valid. Can you identify what's underneath it - hurt, fear, or frustration?",
            "Try taking a pause before responding. Count to 10, take deep breaths, or step away for a moment.",
            "Physical release can help: try a quick workout, punch a pillow, or write out your feelings.",
        ],
        ConcernCategory::Loneliness => &[
            "Loneliness is painful, and your need for connection is important. You deserve to feel supported.",
            "Consider reaching out to someone - even a brief message can help. Or join an online community around your interests.",
            "Sometimes being kind to yourself is a form of connection. What would you say to a friend feeling this way?",
        ],
        ConcernCategory::Overwhelm => &[
            "When everything feels like too much, focus on just the next small step. What's one thing you can do right now?",
            "It's okay to say no and set boundaries. You don't have to do everything at once.",
            "Try writing down your tasks, then pick just one. Breaking things down makes them manageable.",
        ],
        ConcernCategory::Grief => &[
            "Grief is love with nowhere to go. Your feelings honor what you've lost.",
            "There's no timeline for grief. Allow yourself to feel whatever comes up, without judgment.",
            "Consider journaling about memories, or creating a small ritual to honor your loss.",
        ],
    }
}

pub const DIAPHRAGMATIC_TIP: &str = "I also notice tension in your voice. Try placing one hand on \
your chest and one on your belly, and focus on making your belly rise with each breath. This shifts \
you from chest breathing to diaphragmatic breathing.";

// ── Closing ────────────────────────────────────────────────────────────────

pub const ENCOURAGEMENTS: &[&str] = &[
    "Keep nurturing these positive moments - they're so important for your wellbeing.",
    "You're doing great. Remember to acknowledge your progress, no matter how small.",
    "This is wonderful progress. Keep doing what helped you get here.",
];

pub const QUESTIONS_EARLY: &[&str] = &[
    "How are you feeling right now?",
    "Is there anything specific you'd like to talk about?",
    "What would feel most supportive for you right now?",
    "I'm here to listen. What's on your mind?",
];

/// `{}` is replaced by the first topic of the conversation.
pub const QUESTIONS_TOPIC: &[&str] = &[
    "How is the {} situation affecting you today?",
    "Would you like to talk more about {}?",
    "What's been the hardest part about {} lately?",
    "Is there anything else about {} you'd like to explore?",
];

pub const QUESTIONS_DEEPER: &[&str] = &[
    "What do you need most right now?",
    "How can I best support you in this moment?",
    "What would make today feel a little bit better?",
    "Is there something specific that's weighing on you?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pool_is_populated() {
        for topic in ConcernCategory::ALL {
            assert!(!coping_strategies(topic).is_empty(), "{topic:?}");
        }
        for s in [Sentiment::Negative, Sentiment::Positive, Sentiment::Neutral] {
            assert!(!validation_pool(s).is_empty());
        }
        assert!(QUESTIONS_TOPIC.iter().all(|q| q.contains("{}")));
    }

    #[test]
    fn distress_labels_have_coping_topics() {
        assert_eq!(coping_topic(EmotionLabel::Hopeless), Some(ConcernCategory::Depression));
        assert_eq!(coping_topic(EmotionLabel::Overwhelmed), Some(ConcernCategory::Overwhelm));
        assert_eq!(coping_topic(EmotionLabel::Happy), None);
    }
}
