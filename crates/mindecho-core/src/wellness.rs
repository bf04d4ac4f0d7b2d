// Wellness score over the stored mood log.
//
// score = mean(scale) / 5 × 100 over the last WINDOW_DAYS, or over the last
// FALLBACK_ENTRIES entries when nothing falls in that window. Trend compares
// the means of the two halves of the window.

use crate::mood::{mean_scale, MoodEntry};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const WINDOW_DAYS: i64 = 7;
const FALLBACK_ENTRIES: usize = 7;
const TREND_MARGIN: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessScore {
    pub score: u8,
    pub trend: Trend,
    pub message: String,
}

/// `entries` must be chronological (oldest first).
pub fn wellness_score(entries: &[MoodEntry], now: DateTime<Utc>) -> WellnessScore {
    if entries.is_empty() {
        return WellnessScore {
            score: 50,
            trend: Trend::Stable,
            message: "Start tracking to see your score".into(),
        };
    }

    let cutoff = now - Duration::days(WINDOW_DAYS);
    let in_window: Vec<MoodEntry> = entries.iter().filter(|e| e.timestamp >= cutoff).cloned().collect();
    let window: &[MoodEntry] = if in_window.is_empty() {
        &entries[entries.len().saturating_sub(FALLBACK_ENTRIES)..]
    } else {
        &in_window
    };

    let mean = mean_scale(window).unwrap_or(3.0);
    // Truncates like an integer percentage.
    let score = ((mean / 5.0) * 100.0).clamp(0.0, 100.0) as u8;

    let trend = if window.len() >= 3 {
        let (first, second) = window.split_at(window.len() / 2);
        let first = mean_scale(first).unwrap_or(mean);
        let second = mean_scale(second).unwrap_or(mean);
        if second > first + TREND_MARGIN {
            Trend::Improving
        } else if second < first - TREND_MARGIN {
            Trend::Declining
        } else {
            Trend::Stable
        }
    } else {
        Trend::Stable
    };

    let message = match score {
        80..=u8::MAX => "Excellent! Keep up the great work!",
        60..=79 => "You're doing well. Keep taking care of yourself.",
        40..=59 => "Things are okay. Remember to practice self-care.",
        _ => "It's been tough. Consider reaching out for support.",
    };

    WellnessScore {
        score,
        trend,
        message: message.into(),
    }
}
