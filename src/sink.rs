use std::error::Error;

use crate::logger::Level;

/// Capability the facade needs from the host platform's log facility.
pub trait LogSink: Send + Sync {
    fn write(&self, level: Level, tag: &str, message: &str, error: Option<&(dyn Error + 'static)>);
}

/// Default sink: forwards entries as `tracing` events to whatever subscriber
/// the host installed (see `platform::init`).
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: Level, tag: &str, message: &str, error: Option<&(dyn Error + 'static)>) {
        // https://github.com/tokio-rs/tracing/issues/372
        match level {
            Level::Verbose => tracing::event!(target: "applog", tracing::Level::TRACE, tag, ?error, "{message}"),
            Level::Debug => tracing::event!(target: "applog", tracing::Level::DEBUG, tag, ?error, "{message}"),
            Level::Info => tracing::event!(target: "applog", tracing::Level::INFO, tag, ?error, "{message}"),
            Level::Warn => tracing::event!(target: "applog", tracing::Level::WARN, tag, ?error, "{message}"),
            Level::Error => tracing::event!(target: "applog", tracing::Level::ERROR, tag, ?error, "{message}"),
        }
    }
}
