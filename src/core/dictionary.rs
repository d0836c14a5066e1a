// File: src/core/dictionary.rs
use crate::core::normalize::{is_normalized, normalize};
use crate::core::types::{Count, WordEntry};
use crate::error::DictionaryError;
use crate::logging::LogSink;
use crate::persistence;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// A word-frequency dictionary.
///
/// Keys are always normalized (see [`normalize`]) and counts are always at
/// least 1. Sorted views are rebuilt from the map on every call, so they
/// reflect every mutation made before them. The dictionary is not
/// synchronized; share it across threads only behind an external lock.
pub struct Dictionary {
    entries: HashMap<String, Count>,
    log: Arc<LogSink>,
}

impl Dictionary {
    /// Creates an empty dictionary with its own, uninitialized log sink.
    pub fn new() -> Self {
        Self::with_log(Arc::new(LogSink::new()))
    }

    /// Creates an empty dictionary that reports to `log`.
    pub fn with_log(log: Arc<LogSink>) -> Self {
        log.info("Dictionary created");
        Self { entries: HashMap::new(), log }
    }

    /// Counts one occurrence of `token`. Tokens that normalize to nothing are ignored.
    pub fn add_word(&mut self, token: &str) {
        self.add_occurrences(token, 1);
    }

    /// Reads all of `reader` and adds every whitespace-separated token.
    /// Returns the number of tokens processed, including ones that normalized to nothing.
    ///
    /// Nothing is added if reading fails partway.
    pub fn add_words_from_reader<R: Read>(&mut self, mut reader: R) -> Result<usize, DictionaryError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| self.report(DictionaryError::Read { source }))?;
        let processed = self.add_words_from_text(&String::from_utf8_lossy(&bytes));
        self.log.info(&format!("Source processed, words added: {}", processed));
        Ok(processed)
    }

    /// Adds every token of the text file at `path` on top of the current counts.
    pub fn add_words_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let text = persistence::read_text_file(path).map_err(|e| self.report(e))?;
        let processed = self.add_words_from_text(&text);
        self.log.info(&format!(
            "File processed: {}, words added: {}",
            path.display(),
            processed
        ));
        Ok(processed)
    }

    /// Writes every entry as `word count`, one per line, replacing any existing file.
    /// Returns the number of entries written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let written =
            persistence::save_entries_file(&self.entries, path).map_err(|e| self.report(e))?;
        self.log.info(&format!(
            "Dictionary saved to file: {}, total words: {}",
            path.display(),
            written
        ));
        Ok(written)
    }

    /// Replaces the whole dictionary with the contents of a saved dictionary file.
    ///
    /// Words are normalized on the way in; lines that are malformed or whose
    /// word normalizes to nothing are skipped. When two lines share a key the
    /// later count wins. On error the current contents are left untouched.
    /// Returns the number of lines accepted.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let parsed = persistence::read_entries_file(path).map_err(|e| self.report(e))?;

        self.clear();
        let mut loaded = 0;
        for entry in parsed.entries {
            let word = normalize(&entry.word);
            if word.is_empty() {
                continue;
            }
            if !is_normalized(&entry.word) {
                self.log.debug(&format!("Normalized '{}' to '{}' on load", entry.word, word));
            }
            self.entries.insert(word, entry.count);
            loaded += 1;
        }

        self.log_skipped(path, parsed.skipped);
        self.log.info(&format!(
            "Dictionary loaded from file: {}, total words: {}",
            path.display(),
            loaded
        ));
        Ok(loaded)
    }

    /// Adds the counts of a saved dictionary file on top of the current ones.
    /// Returns the number of lines merged.
    pub fn merge_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let parsed = persistence::read_entries_file(path).map_err(|e| self.report(e))?;

        let mut merged = 0;
        for entry in &parsed.entries {
            if self.add_occurrences(&entry.word, entry.count) {
                merged += 1;
            }
        }

        self.log_skipped(path, parsed.skipped);
        self.log.info(&format!(
            "Dictionary merged from file: {}, words merged: {}",
            path.display(),
            merged
        ));
        Ok(merged)
    }

    /// Writes a binary snapshot of the dictionary.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), DictionaryError> {
        let path = path.as_ref();
        persistence::save_snapshot(&self.entries, path).map_err(|e| self.report(e))?;
        self.log.info(&format!(
            "Snapshot saved to file: {}, total words: {}",
            path.display(),
            self.entries.len()
        ));
        Ok(())
    }

    /// Replaces the dictionary with a binary snapshot. Returns the number of entries restored.
    pub fn load_snapshot(&mut self, path: impl AsRef<Path>) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let restored = persistence::load_snapshot(path).map_err(|e| self.report(e))?;

        self.clear();
        for (word, count) in restored {
            let word = normalize(&word);
            if !word.is_empty() && count > 0 {
                self.entries.insert(word, count);
            }
        }

        self.log.info(&format!(
            "Snapshot loaded from file: {}, total words: {}",
            path.display(),
            self.entries.len()
        ));
        Ok(self.entries.len())
    }

    /// All entries in ascending byte order of the word.
    pub fn words_alphabetically(&self) -> Vec<WordEntry> {
        let mut words: Vec<WordEntry> = self.entries.iter().map(WordEntry::from).collect();
        words.sort_unstable_by(|a, b| a.word.cmp(&b.word));

        self.log.debug("Retrieved alphabetically sorted word list");
        words
    }

    /// All entries by descending count; equal counts are ordered alphabetically.
    pub fn words_by_frequency(&self) -> Vec<WordEntry> {
        let mut words: Vec<WordEntry> = self.entries.iter().map(WordEntry::from).collect();
        words.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));

        self.log.debug("Retrieved frequency sorted word list");
        words
    }

    /// Count for `token` after normalization, if present.
    pub fn count_of(&self, token: &str) -> Option<Count> {
        self.entries.get(&normalize(token)).copied()
    }

    /// Sum of all counts.
    pub fn total_occurrences(&self) -> Count {
        self.entries.values().sum()
    }

    pub fn clear(&mut self) {
        let old_size = self.entries.len();
        self.entries.clear();
        self.log.info(&format!("Dictionary cleared, previous size: {}", old_size));
    }

    /// Number of distinct words.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_words_from_text(&mut self, text: &str) -> usize {
        let mut processed = 0;
        for token in text.split_whitespace() {
            self.add_word(token);
            processed += 1;
        }
        processed
    }

    /// Returns false when the token normalized to nothing.
    fn add_occurrences(&mut self, token: &str, occurrences: Count) -> bool {
        if token.is_empty() {
            return false;
        }
        let word = normalize(token);
        if word.is_empty() {
            return false;
        }

        self.log.debug(&format!("Added word: {}", word));
        let count = self.entries.entry(word).or_insert(0);
        *count = count.saturating_add(occurrences);
        true
    }

    fn log_skipped(&self, path: &Path, skipped: usize) {
        if skipped > 0 {
            self.log.debug(&format!(
                "Skipped {} malformed lines in {}",
                skipped,
                path.display()
            ));
        }
    }

    fn report(&self, error: DictionaryError) -> DictionaryError {
        self.log.error(&error.to_string());
        error
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Dictionary {
    fn drop(&mut self) {
        self.log.info("Dictionary destroyed");
    }
}

#[cfg(test)]
#[path = "dictionary_test.rs"]
mod tests;
