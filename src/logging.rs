// File: src/logging.rs
use crate::error::{LogError, ParseLevelError};
use parking_lot::Mutex;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

const SESSION_SEPARATOR: &str = "===============================================";

/// Severity of a log line. Ordering is `Debug < Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

struct SinkState {
    file: Option<File>,
    level: LogLevel,
}

/// An append-only, leveled text log shared between components.
///
/// One sink is created per process (or per test) and handed out as
/// `Arc<LogSink>`; every method takes `&self`, so it can be called from any
/// thread. Each written line is `<timestamp> [<LEVEL>] <message>`.
///
/// Logging is best-effort: while the sink has no open file, messages are
/// mirrored to stderr, and write failures are reported there instead of
/// being returned to the caller.
pub struct LogSink {
    state: Mutex<SinkState>,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState { file: None, level: LogLevel::default() }),
        }
    }

    /// Opens `path` for appending, creating missing parent directories.
    /// Re-initializing closes the previous file first.
    pub fn init(&self, path: impl AsRef<Path>) -> Result<(), LogError> {
        let path = path.as_ref();
        let mut state = self.state.lock();
        state.file = None;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::Open { path: path.to_path_buf(), source })?;

        let header = format!(
            "{}\n{}",
            SESSION_SEPARATOR,
            format_line(LogLevel::Info, "Logging started")
        );
        file.write_all(header.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| LogError::Open { path: path.to_path_buf(), source })?;

        state.file = Some(file);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().file.is_some()
    }

    /// Writes one line if `level` passes the current threshold.
    pub fn log(&self, level: LogLevel, message: &str) {
        let mut state = self.state.lock();
        if level < state.level {
            return;
        }
        let line = format_line(level, message);
        match state.file.as_mut() {
            Some(file) => write_line(file, &line),
            None => eprint!("{}", line),
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Changes the threshold for subsequent calls and records the change in the file.
    pub fn set_level(&self, level: LogLevel) {
        let mut state = self.state.lock();
        state.level = level;
        if let Some(file) = state.file.as_mut() {
            let line = format_line(LogLevel::Info, &format!("Log level changed to: {}", level));
            write_line(file, &line);
        }
    }

    pub fn level(&self) -> LogLevel {
        self.state.lock().level
    }

    /// Writes the session-end marker and releases the file. No-op when not initialized.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if let Some(mut file) = state.file.take() {
            write_line(&mut file, &format_line(LogLevel::Info, "Logging ended"));
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        self.close();
    }
}

/// Appends and flushes one line; failures go to stderr.
fn write_line(file: &mut File, line: &str) {
    if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
        eprintln!("Failed to write log line: {}", e);
    }
}

fn format_line(level: LogLevel, message: &str) -> String {
    format!(
        "{} [{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        message
    )
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;
