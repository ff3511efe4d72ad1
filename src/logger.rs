use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use strum::{EnumIter, IntoStaticStr};

use crate::config::LogConfig;
use crate::format::{self, CallSite};
use crate::sink::LogSink;
use crate::truncate;
use crate::writer::FileWriter;
use crate::DEFAULT_TAG;

/// Severity of a log entry. Determines platform sink routing and whether the
/// entry is mirrored to the daily file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_static_str(&self) -> &'static str {
        self.into()
    }

    /// Single-letter code used in persisted lines.
    pub fn code(&self) -> &'static str {
        &self.as_static_str()[..1]
    }

    /// Only debug and error entries are ever written to file.
    pub fn persists(&self) -> bool {
        matches!(self, Level::Debug | Level::Error)
    }
}

/// Severity-keyed logging facade.
///
/// Every entry goes to the platform sink; debug and error entries are
/// additionally appended to the current day's log file while the
/// persist-to-file switch is on. Calls never fail and never panic on storage
/// problems; writer failures are reported on the diagnostic channel and
/// swallowed.
pub struct Logger {
    enabled: bool,
    persist_to_file: AtomicBool,
    sink: Box<dyn LogSink>,
    writer: Option<FileWriter>,
}

impl Logger {
    /// Builds a logger from a config resolved once by the host.
    ///
    /// Without a storage root the logger runs sink-only: persisting levels
    /// skip the file write silently. Retention pruning runs here, once per
    /// construction.
    pub fn new(config: &LogConfig, sink: Box<dyn LogSink>) -> Self {
        let writer = config.log_dir().map(|dir| FileWriter::new(dir, config.file_base_name.clone()));
        if let Some(writer) = &writer {
            writer.prune_old(Local::now().date_naive());
        }
        Self {
            enabled: config.enabled,
            persist_to_file: AtomicBool::new(config.persist_to_file),
            sink,
            writer,
        }
    }

    pub fn set_persist_to_file(&self, persist: bool) {
        self.persist_to_file.store(persist, Ordering::Release);
    }

    /// Deletes the log file that fell out of the retention window today.
    /// Also runs automatically on construction.
    pub fn prune_old(&self) {
        if let Some(writer) = &self.writer {
            writer.prune_old(Local::now().date_naive());
        }
    }

    /// Verbose entry. An empty `tag` substitutes [`DEFAULT_TAG`]; the same
    /// holds for every other entry point.
    #[track_caller]
    pub fn v(&self, tag: &str, message: &str) {
        self.log(tag, message, None, Level::Verbose);
    }

    #[track_caller]
    pub fn v_err(&self, tag: &str, message: &str, error: &(dyn Error + 'static)) {
        self.log(tag, message, Some(error), Level::Verbose);
    }

    #[track_caller]
    pub fn d(&self, tag: &str, message: &str) {
        self.log(tag, message, None, Level::Debug);
    }

    #[track_caller]
    pub fn d_err(&self, tag: &str, message: &str, error: &(dyn Error + 'static)) {
        self.log(tag, message, Some(error), Level::Debug);
    }

    #[track_caller]
    pub fn i(&self, tag: &str, message: &str) {
        self.log(tag, message, None, Level::Info);
    }

    #[track_caller]
    pub fn i_err(&self, tag: &str, message: &str, error: &(dyn Error + 'static)) {
        self.log(tag, message, Some(error), Level::Info);
    }

    #[track_caller]
    pub fn w(&self, tag: &str, message: &str) {
        self.log(tag, message, None, Level::Warn);
    }

    #[track_caller]
    pub fn w_err(&self, tag: &str, message: &str, error: &(dyn Error + 'static)) {
        self.log(tag, message, Some(error), Level::Warn);
    }

    #[track_caller]
    pub fn e(&self, tag: &str, message: &str) {
        self.log(tag, message, None, Level::Error);
    }

    #[track_caller]
    pub fn e_err(&self, tag: &str, message: &str, error: &(dyn Error + 'static)) {
        self.log(tag, message, Some(error), Level::Error);
    }

    #[track_caller]
    fn log(&self, tag: &str, message: &str, error: Option<&(dyn Error + 'static)>, level: Level) {
        // Disabled logging must stay cheap: bail before any string work.
        if !self.enabled {
            return;
        }
        let site = CallSite::here();
        let tag = if tag.is_empty() { DEFAULT_TAG } else { tag };
        for chunk in truncate::chunks(tag, message) {
            self.sink.write(level, tag, &format!("{}{}", format::call_prefix(&site), chunk), error);
            if level.persists() && self.persist_to_file.load(Ordering::Acquire) {
                self.persist(level, tag, chunk, error);
            }
        }
    }

    fn persist(&self, level: Level, tag: &str, chunk: &str, error: Option<&(dyn Error + 'static)>) {
        let Some(writer) = &self.writer else {
            tracing::debug!(message_id = "ohNgae2k", "file persistence requested without a resolved log directory");
            return;
        };
        // One timestamp feeds both the file name and the line, so an entry
        // logged at midnight can't straddle two days.
        let now = Local::now();
        let line = format::file_line(now, level, tag, chunk, error);
        if let Err(error) = writer.append(now.date_naive(), &line) {
            tracing::error!(message_id = "Aih3eB0u", ?error, "failed to append log entry to file");
        }
    }
}
