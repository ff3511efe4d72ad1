use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Logging configuration, constructed once by the host and handed to
/// `Logger::new`. Only the persist-to-file switch can change afterwards,
/// through `Logger::set_persist_to_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Master switch. Off means every facade call is a no-op.
    pub enabled: bool,
    /// Initial state of the persist-to-file switch for debug/error entries.
    pub persist_to_file: bool,
    /// Storage root the log directory lives under. `None` leaves file
    /// persistence unavailable; the platform sink still receives entries.
    pub storage_root: Option<PathBuf>,
    /// Application identifier, the per-app subdirectory under the root.
    pub app_id: String,
    /// Base name the date suffix is appended to.
    pub file_base_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            persist_to_file: !cfg!(debug_assertions),
            storage_root: None,
            app_id: String::new(),
            file_base_name: "Log".into(),
        }
    }
}

impl LogConfig {
    pub fn new(storage_root: PathBuf, app_id: impl Into<String>) -> Self {
        Self { storage_root: Some(storage_root), app_id: app_id.into(), ..Default::default() }
    }

    /// Resolved log directory: `<storage root>/<app id>`.
    pub fn log_dir(&self) -> Option<PathBuf> {
        let root = self.storage_root.as_ref()?;
        if self.app_id.is_empty() {
            return Some(root.clone());
        }
        Some(root.join(&self.app_id))
    }
}
