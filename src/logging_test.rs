// Tests for LogSink
// Test cases:
// - init creates the file (and missing directories) and writes the session-start marker
// - close writes the session-end marker and is a no-op when not initialized
// - threshold filters lower levels; all levels pass at Debug
// - concurrent logging from several threads keeps every line intact
// - a failed write is reported to stderr, not returned or panicked on

use super::*;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_init_creates_file_and_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("logs").join("test_log.log");

    let sink = LogSink::new();
    sink.init(&path).unwrap();
    assert!(sink.is_initialized());

    let content = read(&path);
    assert!(content.starts_with(SESSION_SEPARATOR));
    assert!(content.contains("[INFO] Logging started"));
}

#[test]
fn test_close_writes_end_marker() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_log.log");

    let sink = LogSink::new();
    sink.init(&path).unwrap();
    sink.close();
    assert!(!sink.is_initialized());
    assert!(read(&path).contains("Logging ended"));

    // Second close must not write anything
    let before = read(&path);
    sink.close();
    assert_eq!(before, read(&path));
}

#[test]
fn test_close_without_init_is_noop() {
    let sink = LogSink::new();
    sink.close();
    assert!(!sink.is_initialized());
}

#[test]
fn test_all_levels_written_at_debug() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_log.log");

    let sink = LogSink::new();
    sink.init(&path).unwrap();
    sink.set_level(LogLevel::Debug);

    sink.debug("Debug message");
    sink.info("Info message");
    sink.warning("Warning message");
    sink.error("Error message");
    sink.close();

    let content = read(&path);
    assert!(content.contains("[DEBUG] Debug message"));
    assert!(content.contains("[INFO] Info message"));
    assert!(content.contains("[WARNING] Warning message"));
    assert!(content.contains("[ERROR] Error message"));
}

#[test]
fn test_threshold_filters_lower_levels() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_log.log");

    let sink = LogSink::new();
    sink.init(&path).unwrap();
    sink.set_level(LogLevel::Warning);
    assert_eq!(sink.level(), LogLevel::Warning);

    sink.debug("Debug message");
    sink.info("Info message");
    sink.warning("Warning message");
    sink.error("Error message");

    let content = read(&path);
    assert!(!content.contains("Debug message"));
    assert!(!content.contains("Info message"));
    assert!(content.contains("Warning message"));
    assert!(content.contains("Error message"));
    assert!(content.contains("Log level changed to: WARNING"));
}

#[test]
fn test_line_format_has_millisecond_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_log.log");

    let sink = LogSink::new();
    sink.init(&path).unwrap();
    sink.info("hello");

    let content = read(&path);
    let line = content.lines().find(|l| l.ends_with("[INFO] hello")).unwrap();
    // "YYYY-MM-DD HH:MM:SS.mmm [INFO] hello"
    let (timestamp, _) = line.split_once(" [").unwrap();
    assert_eq!(timestamp.len(), 23);
    assert_eq!(&timestamp[19..20], ".");
    assert!(timestamp[20..].chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_reinit_appends_new_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_log.log");

    let sink = LogSink::new();
    sink.init(&path).unwrap();
    sink.info("first session");
    sink.init(&path).unwrap();
    sink.info("second session");

    let content = read(&path);
    assert_eq!(content.matches("Logging started").count(), 2);
    assert!(content.contains("first session"));
    assert!(content.contains("second session"));
}

#[test]
fn test_multithreaded_logging_keeps_every_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_log.log");

    let sink = Arc::new(LogSink::new());
    sink.init(&path).unwrap();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for j in 0..20 {
                    sink.info(&format!("Thread {} message {}", i, j));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    sink.close();

    let content = read(&path);
    for i in 0..5 {
        for j in 0..20 {
            let expected = format!("[INFO] Thread {} message {}", i, j);
            assert_eq!(
                content.lines().filter(|l| l.ends_with(&expected)).count(),
                1,
                "missing or duplicated: {}",
                expected
            );
        }
    }
}

#[test]
fn test_level_parsing() {
    assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
    assert!("verbose".parse::<LogLevel>().is_err());
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Warning < LogLevel::Error);
}

#[test]
fn test_write_failure_is_swallowed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("read_only.log");
    fs::write(&path, "existing\n").unwrap();

    // A read-only handle makes every write fail
    let mut file = File::open(&path).unwrap();
    write_line(&mut file, &format_line(LogLevel::Info, "Logging ended"));

    assert_eq!(read(&path), "existing\n");
}
