// ── Chat pipeline ──────────────────────────────────────────────────────────
//
// One chat turn: text classification → fusion with any voice/visual
// summaries the client forwarded → crisis/sentiment gate → reply assembly.
//
// Voice and video summaries arrive in the loose shape the analysis reports
// were returned in. Fields that do not parse are dropped, never rejected;
// a descriptor with no emotion ("uncertain", "engaged") is not acknowledged.

use crate::emotion::audio::StressLevel;
use crate::emotion::text::analyze_text_emotion;
use crate::emotion::{EmotionClassification, EmotionLabel};
use crate::error::{CoreError, CoreResult};
use crate::fusion::{fuse, FusedAnalysis};
use crate::mood::MoodEntry;
use crate::response::{generate_response, ChatMessage, ModalityCues, ResponseInput, VoiceCue};
use crate::sentiment::{analyze_sentiment, SentimentReport};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Malformed entries are skipped, never rejected.
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Vec<ChatMessage>,
    #[serde(default, deserialize_with = "lenient")]
    pub emotion_data: Option<EmotionData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmotionData {
    #[serde(default, deserialize_with = "lenient")]
    pub voice: Option<VoiceSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub video: Option<VideoSummary>,
}

// ── Lenient decoding ───────────────────────────────────────────────────
// Client-echoed context must never cost the user a reply.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<ChatMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Array(items)) => {
            items.iter().filter_map(ChatMessage::from_value).collect()
        }
        _ => Vec::new(),
    })
}

/// Classification object as a client may echo it back. Intensity is taken
/// as a raw number and re-clamped.
#[derive(Debug, Deserialize)]
struct EchoedClassification {
    #[serde(alias = "label")]
    emotion: String,
    intensity: f32,
    #[serde(default)]
    explanation: Option<String>,
}

/// Voice analysis as echoed back by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VoiceSummary {
    /// Descriptor such as "anxious" or "angry or frustrated".
    pub emotion: Option<String>,
    pub label: Option<String>,
    /// Numeric intensity, or a coarse word ("high", "low") from older clients.
    pub intensity: Option<serde_json::Value>,
    pub confidence: Option<f32>,
    pub stress: Option<String>,
    pub energy: Option<String>,
}

/// Image analysis as echoed back by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSummary {
    pub dominant_emotion: Option<String>,
    pub confidence: Option<f32>,
    /// Full classification object when the client kept it.
    pub emotion: Option<serde_json::Value>,
}

fn coarse_intensity(value: &serde_json::Value) -> Option<f32> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map(|v| v as f32),
        serde_json::Value::String(s) => match s.to_lowercase().as_str() {
            "very high" => Some(90.0),
            "high" => Some(80.0),
            "moderate" | "medium" => Some(50.0),
            "low" => Some(30.0),
            "very low" => Some(15.0),
            _ => None,
        },
        _ => None,
    }
}

fn parse_stress(raw: &str) -> Option<StressLevel> {
    match raw.trim().to_lowercase().as_str() {
        "low" => Some(StressLevel::Low),
        "normal" => Some(StressLevel::Normal),
        "elevated" => Some(StressLevel::Elevated),
        "high" => Some(StressLevel::High),
        _ => None,
    }
}

impl VoiceSummary {
    pub fn classification(&self) -> Option<EmotionClassification> {
        let label = self
            .label
            .as_deref()
            .and_then(EmotionLabel::from_loose)
            .or_else(|| self.emotion.as_deref().and_then(EmotionLabel::from_loose))?;
        let intensity = self
            .intensity
            .as_ref()
            .and_then(coarse_intensity)
            .or(self.confidence)?;
        Some(EmotionClassification::new(
            label,
            intensity,
            format!("Voice analysis reported {label}"),
        ))
    }

    pub fn cue(&self) -> Option<VoiceCue> {
        let descriptor = self.emotion.clone().or_else(|| self.label.clone())?;
        EmotionLabel::from_loose(&descriptor)?;
        Some(VoiceCue {
            descriptor,
            stress: self.stress.as_deref().and_then(parse_stress),
        })
    }
}

impl VideoSummary {
    pub fn classification(&self) -> Option<EmotionClassification> {
        if let Some(full) = self
            .emotion
            .clone()
            .and_then(|v| serde_json::from_value::<EchoedClassification>(v).ok())
            .and_then(|echo| {
                let label = EmotionLabel::from_loose(&echo.emotion)?;
                let explanation = echo
                    .explanation
                    .unwrap_or_else(|| format!("Facial analysis reported {label}"));
                Some(EmotionClassification::new(label, echo.intensity, explanation))
            })
        {
            return Some(full);
        }
        let label = self.dominant_emotion.as_deref().and_then(EmotionLabel::from_loose)?;
        let intensity = self.confidence?;
        Some(EmotionClassification::new(
            label,
            intensity,
            format!("Facial analysis reported {label}"),
        ))
    }

    pub fn cue(&self) -> Option<String> {
        self.dominant_emotion
            .clone()
            .filter(|d| EmotionLabel::from_loose(d).is_some())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub reply: String,
    pub crisis: bool,
    pub analysis: FusedAnalysis,
    pub sentiment: SentimentReport,
}

/// Run one chat turn. `recent_moods` is chronological (oldest first).
/// Fails only on an empty message.
pub fn respond<R: Rng + ?Sized>(
    request: &ChatRequest,
    recent_moods: &[MoodEntry],
    rng: &mut R,
) -> CoreResult<ChatTurn> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(CoreError::invalid("Message is required"));
    }

    let emotion_data = request.emotion_data.clone().unwrap_or_default();
    let voice = emotion_data.voice.as_ref();
    let video = emotion_data.video.as_ref();

    let text = analyze_text_emotion(message, rng);
    let analysis = fuse(
        text,
        voice.and_then(VoiceSummary::classification),
        video.and_then(VideoSummary::classification),
    );
    let sentiment = analyze_sentiment(message, &analysis.indicators, recent_moods);

    let cues = ModalityCues {
        voice: voice.and_then(VoiceSummary::cue),
        visual: video.and_then(VideoSummary::cue),
    };
    let reply = generate_response(
        &ResponseInput {
            message,
            analysis: &analysis,
            sentiment: &sentiment,
            history: &request.history,
            recent_moods,
            cues: &cues,
        },
        rng,
    );

    log::info!(
        "[chat] {} (intensity {}) sentiment={:?} crisis={} history={}",
        analysis.fused.label,
        analysis.fused.intensity,
        sentiment.sentiment,
        sentiment.is_crisis(),
        request.history.len()
    );

    Ok(ChatTurn {
        reply,
        crisis: sentiment.is_crisis(),
        analysis,
        sentiment,
    })
}
