use std::fs;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Days, NaiveDate};
use static_assertions::const_assert;
use thiserror::Error;

/// Days a daily log file is kept before it becomes eligible for pruning.
pub const RETENTION_DAYS: u64 = 7;

const_assert!(RETENTION_DAYS > 0);

const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum AppendError {
    #[error("could not create log directory: {0}")]
    CreateDir(std::io::Error),
    #[error("could not open log file: {0}")]
    Open(std::io::Error),
    #[error("could not write log file: {0}")]
    Write(std::io::Error),
}

/// Append-only writer for the per-day log files of one directory.
///
/// The internal lock covers the whole create-open-append sequence, so lines
/// from concurrent callers land whole and in one piece.
#[derive(Debug)]
pub struct FileWriter {
    dir: PathBuf,
    base_name: String,
    append_lock: Mutex<()>,
}

impl FileWriter {
    pub fn new(dir: PathBuf, base_name: String) -> Self {
        Self { dir, base_name, append_lock: Mutex::new(()) }
    }

    /// Path of the log file for `date`: `<base name><yyyy-MM-dd>`, date
    /// suffix appended with no separator.
    pub fn file_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}{}", self.base_name, date.format(FILE_DATE_FORMAT)))
    }

    /// Appends `line` and a trailing newline to the file for `date`,
    /// creating missing directories on demand.
    pub fn append(&self, date: NaiveDate, line: &str) -> Result<(), AppendError> {
        let _guard = self.append_lock.lock().unwrap();
        fs::create_dir_all(&self.dir).map_err(AppendError::CreateDir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_path(date))
            .map_err(AppendError::Open)?;
        // Single write call, so an entry can't be torn apart even by an
        // appender this lock doesn't know about.
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes()).map_err(AppendError::Write)
    }

    /// Removes the log file dated exactly `RETENTION_DAYS` before `today`,
    /// if it exists. Files of any other date are never touched.
    pub fn prune_old(&self, today: NaiveDate) {
        let Some(stale) = today.checked_sub_days(Days::new(RETENTION_DAYS)) else {
            return;
        };
        let path = self.file_path(stale);
        match fs::remove_file(&path) {
            Ok(()) => tracing::info!(message_id = "xooY2wie", path =? path, "removed expired log file"),
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => tracing::error!(message_id = "Eequ1ohR", ?error, path =? path, "failed to remove expired log file"),
        }
    }
}
