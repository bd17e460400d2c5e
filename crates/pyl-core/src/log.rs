//! The player-facing event log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of entries the log keeps.
pub const MAX_LOG_ENTRIES: usize = 8;

/// Bounded list of recent event descriptions, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    entries: VecDeque<String>,
    #[serde(skip)]
    written: u64,
}

impl PartialEq for GameLog {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for GameLog {}

impl GameLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding a single entry.
    pub fn with_entry(entry: impl Into<String>) -> Self {
        let mut log = Self::new();
        log.push(entry);
        log
    }

    /// Prepend an entry, dropping the oldest once over capacity.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        self.entries.truncate(MAX_LOG_ENTRIES);
        self.written += 1;
    }

    /// Total entries ever pushed, including ones since dropped.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Whether any entry contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.contains(needle))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
