use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Days, Local};
use strum::IntoEnumIterator;
use tempfile::tempdir;

use crate::config::LogConfig;
use crate::logger::{Level, Logger};
use crate::sink::LogSink;
use crate::writer::FileWriter;
use crate::DEFAULT_TAG;

#[derive(Debug, Clone)]
struct SinkEntry {
    level: Level,
    tag: String,
    message: String,
    had_error: bool,
}

#[derive(Debug, Clone, Default)]
struct RecordingSink {
    entries: Arc<Mutex<Vec<SinkEntry>>>,
}

impl RecordingSink {
    fn recorded(&self) -> Vec<SinkEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, level: Level, tag: &str, message: &str, error: Option<&(dyn std::error::Error + 'static)>) {
        self.entries.lock().unwrap().push(SinkEntry {
            level,
            tag: tag.into(),
            message: message.into(),
            had_error: error.is_some(),
        });
    }
}

fn test_config(root: &Path) -> LogConfig {
    LogConfig {
        enabled: true,
        persist_to_file: true,
        storage_root: Some(root.to_path_buf()),
        app_id: "com.example.app".into(),
        file_base_name: "Log".into(),
    }
}

fn build(config: &LogConfig) -> (Logger, RecordingSink) {
    let sink = RecordingSink::default();
    (Logger::new(config, Box::new(sink.clone())), sink)
}

fn log_at(logger: &Logger, level: Level, tag: &str, message: &str) {
    match level {
        Level::Verbose => logger.v(tag, message),
        Level::Debug => logger.d(tag, message),
        Level::Info => logger.i(tag, message),
        Level::Warn => logger.w(tag, message),
        Level::Error => logger.e(tag, message),
    }
}

fn todays_file(config: &LogConfig) -> PathBuf {
    let writer = FileWriter::new(config.log_dir().unwrap(), config.file_base_name.clone());
    writer.file_path(Local::now().date_naive())
}

fn file_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_owned).collect()
}

#[test]
fn level_codes_and_persistence_matrix() {
    let codes: Vec<&str> = Level::iter().map(|level| level.code()).collect();
    assert_eq!(codes, ["V", "D", "I", "W", "E"]);
    let persisting: Vec<Level> = Level::iter().filter(|level| level.persists()).collect();
    assert_eq!(persisting, [Level::Debug, Level::Error]);
}

#[test]
fn disabled_logger_does_nothing() {
    let root = tempdir().unwrap();
    let mut config = test_config(root.path());
    config.enabled = false;
    let (logger, sink) = build(&config);

    for level in Level::iter() {
        log_at(&logger, level, "Net", "dropped");
    }

    assert!(sink.recorded().is_empty());
    assert!(!config.log_dir().unwrap().exists());
}

#[test]
fn only_debug_and_error_reach_the_file() {
    let root = tempdir().unwrap();
    let config = test_config(root.path());
    let (logger, sink) = build(&config);

    for level in Level::iter() {
        log_at(&logger, level, "Net", "entry");
    }

    // Every level reaches the sink exactly once.
    assert_eq!(sink.recorded().len(), 5);

    let lines = file_lines(&todays_file(&config));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(":D:Net:"));
    assert!(lines[1].contains(":E:Net:"));
}

#[test]
fn persist_switch_gates_file_writes_at_runtime() {
    let root = tempdir().unwrap();
    let mut config = test_config(root.path());
    config.persist_to_file = false;
    let (logger, sink) = build(&config);

    logger.e("Net", "sink only");
    assert_eq!(sink.recorded().len(), 1);
    assert!(!todays_file(&config).exists());

    logger.set_persist_to_file(true);
    logger.e("Net", "persisted");
    assert_eq!(file_lines(&todays_file(&config)).len(), 1);

    logger.set_persist_to_file(false);
    logger.e("Net", "sink only again");
    assert_eq!(file_lines(&todays_file(&config)).len(), 1);
}

#[test]
fn empty_tag_substitutes_default() {
    let root = tempdir().unwrap();
    let config = test_config(root.path());
    let (logger, sink) = build(&config);

    logger.e("", "boom");

    assert_eq!(sink.recorded()[0].tag, DEFAULT_TAG);
    let lines = file_lines(&todays_file(&config));
    assert!(lines[0].contains(&format!(":E:{DEFAULT_TAG}:")));
}

#[test]
fn missing_storage_root_keeps_sink_working() {
    let mut config = test_config(Path::new("/unused"));
    config.storage_root = None;
    let (logger, sink) = build(&config);

    // No resolved directory: the file write is skipped silently and
    // nothing escapes.
    logger.e("Net", "boom");

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, Level::Error);
    assert!(recorded[0].message.ends_with("boom"));
}

#[test]
fn long_message_truncates_across_sink_and_file() {
    let root = tempdir().unwrap();
    let config = test_config(root.path());
    let (logger, sink) = build(&config);

    let message = "a".repeat(5000);
    logger.e("Net", &message);

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 3);

    let lines = file_lines(&todays_file(&config));
    assert_eq!(lines.len(), 3);
    let payloads: Vec<&str> = lines
        .iter()
        .map(|line| {
            let marker = ":E:Net:";
            let at = line.find(marker).unwrap();
            &line[at + marker.len()..]
        })
        .collect();
    let lengths: Vec<usize> = payloads.iter().map(|p| p.chars().count()).collect();
    assert_eq!(lengths, vec![1998, 1998, 1004]);
    assert_eq!(payloads.concat(), message);
}

#[test]
fn call_prefix_decorates_sink_but_not_file() {
    let root = tempdir().unwrap();
    let config = test_config(root.path());
    let (logger, sink) = build(&config);

    logger.e("Net", "needle");

    let recorded = sink.recorded();
    assert!(recorded[0].message.starts_with('['));
    assert!(recorded[0].message.contains("logger_test.rs"));
    assert!(recorded[0].message.ends_with("]--needle"));

    let lines = file_lines(&todays_file(&config));
    assert!(lines[0].ends_with(":needle"));
    assert!(!lines[0].contains("]--"));
}

#[test]
fn error_reaches_sink_and_file_line() {
    let root = tempdir().unwrap();
    let config = test_config(root.path());
    let (logger, sink) = build(&config);

    let error = std::io::Error::other("disk full");
    logger.e_err("Net", "boom", &error);

    assert!(sink.recorded()[0].had_error);
    let lines = file_lines(&todays_file(&config));
    // Chain text directly after the message, no separator.
    assert!(lines[0].ends_with(":boomdisk full"));
}

#[test]
fn construction_prunes_the_expired_file() {
    let root = tempdir().unwrap();
    let config = test_config(root.path());
    let writer = FileWriter::new(config.log_dir().unwrap(), config.file_base_name.clone());
    let stale = Local::now().date_naive().checked_sub_days(Days::new(7)).unwrap();
    writer.append(stale, "old entry").unwrap();

    let (_logger, _sink) = build(&config);

    assert!(!writer.file_path(stale).exists());
}
