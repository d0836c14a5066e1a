// File: src/persistence.rs
//! On-disk formats for the dictionary.
//!
//! The text format is one `word count` pair per line, in no particular
//! order. The snapshot format is a bincode dump of the same map. Both are
//! written through a temp file in the destination directory and then renamed
//! over the target, so an interrupted save never leaves a truncated file.

use crate::core::types::{Count, WordEntry};
use crate::error::DictionaryError;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The serializable state of a dictionary.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct SerializableState {
    entries: HashMap<String, Count>,
}

/// Result of reading a text dictionary file.
#[derive(Debug, Default)]
pub struct ParsedEntries {
    /// Accepted pairs, in file order. Words are exactly as written in the file.
    pub entries: Vec<WordEntry>,
    /// Non-blank lines that did not parse as `word count`.
    pub skipped: usize,
}

/// Parses one line of the text format.
///
/// Reads a word and a count and ignores anything after them. The count is
/// the leading run of digits of the second token (an optional `+` is
/// allowed), so `12x` reads as 12. It must be positive and fit in a `u64`.
pub fn parse_line(line: &str) -> Option<(&str, Count)> {
    let mut tokens = line.split_whitespace();
    let word = tokens.next()?;
    let count = parse_count_prefix(tokens.next()?)?;
    (count > 0).then_some((word, count))
}

fn parse_count_prefix(token: &str) -> Option<Count> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

pub fn parse_entries(content: &str) -> ParsedEntries {
    let mut parsed = ParsedEntries::default();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            Some((word, count)) => parsed.entries.push(WordEntry::new(word, count)),
            None => parsed.skipped += 1,
        }
    }
    parsed
}

/// Writes `entries` in the text format and returns the number of lines written.
pub fn write_entries<'a, W, I>(writer: &mut W, entries: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = (&'a String, &'a Count)>,
{
    let mut written = 0;
    for (word, count) in entries {
        writeln!(writer, "{} {}", word, count)?;
        written += 1;
    }
    Ok(written)
}

/// Checks that `path` is an existing regular file and reads it as text.
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_text_file(path: &Path) -> Result<String, DictionaryError> {
    let bytes = read_file(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn read_entries_file(path: &Path) -> Result<ParsedEntries, DictionaryError> {
    Ok(parse_entries(&read_text_file(path)?))
}

pub fn save_entries_file(
    entries: &HashMap<String, Count>,
    path: &Path,
) -> Result<usize, DictionaryError> {
    let mut written = 0;
    write_atomically(path, |writer| {
        written = write_entries(writer, entries)?;
        Ok(())
    })
    .map_err(|e| DictionaryError::io(path, e))?;
    Ok(written)
}

pub fn save_snapshot(entries: &HashMap<String, Count>, path: &Path) -> Result<(), DictionaryError> {
    let state = SerializableState { entries: entries.clone() };
    let bytes = bincode::serialize(&state)
        .map_err(|source| DictionaryError::Snapshot { path: path.to_path_buf(), source })?;

    write_atomically(path, |writer| writer.write_all(&bytes))
        .map_err(|e| DictionaryError::io(path, e))
}

pub fn load_snapshot(path: &Path) -> Result<HashMap<String, Count>, DictionaryError> {
    let bytes = read_file(path)?;
    let state: SerializableState = bincode::deserialize_from(bytes.as_slice())
        .map_err(|source| DictionaryError::Snapshot { path: path.to_path_buf(), source })?;
    Ok(state.entries)
}

fn read_file(path: &Path) -> Result<Vec<u8>, DictionaryError> {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(DictionaryError::NotReadable { path: path.to_path_buf() });
    }

    let file = File::open(path).map_err(|e| DictionaryError::io(path, e))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| DictionaryError::io(path, e))?;
    Ok(bytes)
}

fn write_atomically<F>(path: &Path, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> std::io::Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
