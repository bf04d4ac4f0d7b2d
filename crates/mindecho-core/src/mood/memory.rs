use super::{MoodEntry, MoodRepository};
use crate::error::CoreResult;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Process-local mood log. Entries are lost on restart.
#[derive(Default)]
pub struct InMemoryMoodStore {
    entries: Mutex<Vec<MoodEntry>>,
}

impl InMemoryMoodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoodRepository for InMemoryMoodStore {
    fn append(&self, entry: MoodEntry) -> CoreResult<MoodEntry> {
        self.entries.lock().push(entry.clone());
        Ok(entry)
    }

    fn list_recent(&self, n: usize) -> CoreResult<Vec<MoodEntry>> {
        let entries = self.entries.lock();
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }

    fn list_since(&self, since: DateTime<Utc>) -> CoreResult<Vec<MoodEntry>> {
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|e| e.timestamp >= since)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> CoreResult<Vec<MoodEntry>> {
        Ok(self.entries.lock().clone())
    }

    fn count(&self) -> CoreResult<usize> {
        Ok(self.entries.lock().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodLabel;
    use chrono::Duration;

    fn entry(mood: MoodLabel, age_days: i64) -> MoodEntry {
        MoodEntry::at(mood, None, None, Utc::now() - Duration::days(age_days)).unwrap()
    }

    #[test]
    fn recent_is_chronological_tail() {
        let store = InMemoryMoodStore::new();
        for mood in [MoodLabel::Great, MoodLabel::Good, MoodLabel::Okay, MoodLabel::Bad] {
            store.append(MoodEntry::new(mood, None, None).unwrap()).unwrap();
        }
        let recent: Vec<_> = store.list_recent(2).unwrap().into_iter().map(|e| e.mood).collect();
        assert_eq!(recent, vec![MoodLabel::Okay, MoodLabel::Bad]);
        assert_eq!(store.list_recent(10).unwrap().len(), 4);
        assert_eq!(store.count().unwrap(), 4);
    }

    #[test]
    fn since_filters_by_timestamp() {
        let store = InMemoryMoodStore::new();
        store.append(entry(MoodLabel::Sad, 40)).unwrap();
        store.append(entry(MoodLabel::Calm, 3)).unwrap();
        store.append(entry(MoodLabel::Happy, 0)).unwrap();
        let window = store.list_since(Utc::now() - Duration::days(30)).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].mood, MoodLabel::Calm);
    }
}
