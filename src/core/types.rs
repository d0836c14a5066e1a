// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Number of times a normalized word has been seen. Always at least 1 for a stored word.
pub type Count = u64;

/// A (normalized word, count) pair as handed out by the sorted views.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub count: Count,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, count: Count) -> Self {
        Self { word: word.into(), count }
    }
}

impl From<(&String, &Count)> for WordEntry {
    fn from((word, count): (&String, &Count)) -> Self {
        Self { word: word.clone(), count: *count }
    }
}
