use std::error::Error;
use std::panic::Location;

use chrono::{DateTime, Local};

use crate::logger::Level;

const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted log line. The error chain, when present, is appended
/// directly after the message with no separator.
pub(crate) fn file_line(at: DateTime<Local>, level: Level, tag: &str, message: &str, error: Option<&(dyn Error + 'static)>) -> String {
    let mut line = format!("{}:{}:{}:{}", at.format(LINE_TIMESTAMP_FORMAT), level.code(), tag, message);
    if let Some(error) = error {
        line.push_str(&error_chain(error));
    }
    line
}

/// Renders an error and its `source()` chain on a single line, keeping the
/// one-entry-per-line file layout intact.
pub(crate) fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Application call site of a facade entry point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    #[track_caller]
    pub fn here() -> Self {
        let location = Location::caller();
        Self { file: location.file(), line: location.line() }
    }
}

/// Call-site decoration for platform sink emission. Never part of the
/// persisted line.
pub(crate) fn call_prefix(site: &CallSite) -> String {
    let thread = std::thread::current();
    format!("[{}({}):{}:{}]--", thread.name().unwrap_or("unnamed"), thread_id_value(), site.file, site.line)
}

// `ThreadId` only exposes its integral value through `Debug` on stable.
fn thread_id_value() -> String {
    let id = format!("{:?}", std::thread::current().id());
    id.trim_start_matches("ThreadId(").trim_end_matches(')').to_string()
}
