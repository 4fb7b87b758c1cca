//! Append-only narration of engine events.
use std::time::{SystemTime, UNIX_EPOCH};

/// Category used by hosts to style an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MessageCategory {
    #[default]
    Normal,
    Action,
    Info,
    Combat,
    Success,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageEntry {
    pub text: String,
    pub category: MessageCategory,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, category: MessageCategory, timestamp: u64) -> Self {
        Self {
            text: text.into(),
            category,
            timestamp,
        }
    }
}

/// Message log owned by the engine. Hosts decide how much to show; only the
/// engine's rollback ever shortens it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MessageLog {
    entries: Vec<MessageEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.entries
            .push(MessageEntry::new(text, category, now_millis()));
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.last()
    }

    /// Most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries pushed after the log had `len` of them.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_is_newest_first() {
        let mut log = MessageLog::new();
        log.push("one", MessageCategory::Info);
        log.push("two", MessageCategory::Action);
        log.push("three", MessageCategory::Error);

        let texts: Vec<_> = log.recent(2).map(|entry| entry.text.as_str()).collect();
        assert_eq!(texts, ["three", "two"]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.last().map(|entry| entry.category), Some(MessageCategory::Error));
    }

    #[test]
    fn truncate_drops_only_newer_entries() {
        let mut log = MessageLog::new();
        log.push("kept", MessageCategory::Info);
        log.push("dropped", MessageCategory::Combat);

        log.truncate(1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|entry| entry.text.as_str()), Some("kept"));

        log.truncate(5);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn entries_are_timestamped() {
        let mut log = MessageLog::new();
        log.push("hello", MessageCategory::Normal);
        assert!(log.entries()[0].timestamp > 0);
    }
}
