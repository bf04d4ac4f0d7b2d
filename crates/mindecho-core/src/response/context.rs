use crate::sentiment::{NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Case-insensitive, with the aliases chat clients commonly send.
    pub fn from_loose(raw: &str) -> Option<Role> {
        match raw.trim().to_lowercase().as_str() {
            "user" | "human" => Some(Role::User),
            "assistant" | "bot" | "ai" | "model" => Some(Role::Assistant),
            "system" => Some(Role::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    /// Salvage one history element. Needs a known role and string content;
    /// an unreadable timestamp is dropped rather than the message.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let role = Role::from_loose(value.get("role")?.as_str()?)?;
        let content = value.get("content")?.as_str()?.to_string();
        let timestamp = value
            .get("timestamp")
            .and_then(|t| serde_json::from_value::<DateTime<Utc>>(t.clone()).ok());
        Some(Self {
            role,
            content,
            timestamp,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyStep {
    Struggling,
    Improving,
}

/// Topic tag and the substrings that raise it, in detection order.
const TOPICS: &[(&str, &[&str])] = &[
    ("work", &["work", "job"]),
    ("family", &["family", "parent", "sibling"]),
    ("relationships", &["relationship", "partner", "dating"]),
    ("education", &["school", "university", "study"]),
];

/// Rebuilt from the history on every turn; never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    /// First-seen order, no duplicates.
    pub topics: Vec<&'static str>,
    pub emotional_journey: Vec<JourneyStep>,
    pub session_length: usize,
}

impl ConversationContext {
    pub fn from_history(history: &[ChatMessage]) -> Self {
        let mut ctx = ConversationContext {
            session_length: history.len(),
            ..Default::default()
        };

        for msg in history.iter().filter(|m| m.role == Role::User) {
            let lower = msg.content.to_lowercase();

            if NEGATIVE_KEYWORDS.iter().any(|w| lower.contains(w)) {
                ctx.emotional_journey.push(JourneyStep::Struggling);
            } else if POSITIVE_KEYWORDS.iter().any(|w| lower.contains(w)) {
                ctx.emotional_journey.push(JourneyStep::Improving);
            }

            for (topic, cues) in TOPICS {
                if cues.iter().any(|c| lower.contains(c)) && !ctx.topics.contains(topic) {
                    ctx.topics.push(*topic);
                }
            }
        }
        ctx
    }

    /// The first known topic the message mentions again, if any.
    pub fn revisited_topic(&self, message: &str) -> Option<&'static str> {
        let lower = message.to_lowercase();
        self.topics.iter().copied().find(|t| lower.contains(t))
    }

    /// The last two journey steps went struggling → improving.
    pub fn has_improved(&self) -> bool {
        matches!(
            self.emotional_journey.as_slice(),
            [.., JourneyStep::Struggling, JourneyStep::Improving]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[(Role, &str)]) -> Vec<ChatMessage> {
        lines
            .iter()
            .map(|(role, text)| ChatMessage {
                role: *role,
                content: text.to_string(),
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn history_element_salvage() {
        let msg = ChatMessage::from_value(&serde_json::json!({
            "role": "Bot", "content": "hello", "timestamp": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.timestamp.is_some());

        let msg = ChatMessage::from_value(&serde_json::json!({
            "role": "user", "content": "hi", "timestamp": 1700000000
        }))
        .unwrap();
        assert_eq!(msg.timestamp, None);

        assert!(ChatMessage::from_value(&serde_json::json!({"role": "narrator", "content": "x"})).is_none());
        assert!(ChatMessage::from_value(&serde_json::json!({"role": "user", "content": 5})).is_none());
    }

    #[test]
    fn topics_are_ordered_and_deduplicated() {
        let h = history(&[
            (Role::User, "My job is draining"),
            (Role::Assistant, "Tell me about your family"),
            (Role::User, "my partner and my parents"),
            (Role::User, "work again"),
        ]);
        let ctx = ConversationContext::from_history(&h);
        assert_eq!(ctx.topics, vec!["work", "family", "relationships"]);
        assert_eq!(ctx.session_length, 4);
    }

    #[test]
    fn journey_tracks_struggle_then_improvement() {
        let h = history(&[
            (Role::User, "I'm so stressed"),
            (Role::Assistant, "I hear you"),
            (Role::User, "feeling calm now"),
        ]);
        let ctx = ConversationContext::from_history(&h);
        assert_eq!(
            ctx.emotional_journey,
            vec![JourneyStep::Struggling, JourneyStep::Improving]
        );
        assert!(ctx.has_improved());
    }

    #[test]
    fn revisited_topic_requires_literal_tag() {
        let h = history(&[(Role::User, "my job")]);
        let ctx = ConversationContext::from_history(&h);
        assert_eq!(ctx.revisited_topic("Work is awful"), Some("work"));
        assert_eq!(ctx.revisited_topic("my job is awful"), None);
    }

    #[test]
    fn history_deserializes_from_wire_shape() {
        let raw = r#"[{"role":"user","content":"hi","timestamp":"2025-01-02T03:04:05.000Z"},
                      {"role":"assistant","content":"hello"}]"#;
        let parsed: Vec<ChatMessage> = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].timestamp.is_some());
        assert_eq!(parsed[1].role, Role::Assistant);
    }
}
