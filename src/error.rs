// File: src/error.rs
use std::path::PathBuf;

/// Failures surfaced by the dictionary's file operations.
/// The dictionary itself is never left half-updated when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The path does not name an existing, readable regular file.
    #[error("cannot open file: {}", .path.display())]
    NotReadable { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an in-memory or streamed source failed.
    #[error("failed to read source: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot error on {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

impl DictionaryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to create directory for log file {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}' (expected debug, info, warning or error)")]
pub struct ParseLevelError(pub String);
