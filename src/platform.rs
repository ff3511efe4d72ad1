use thiserror::Error;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt as _,
    registry, Layer, Registry,
};

#[derive(Debug, Error)]
pub enum PlatformInitError {
    #[error("could not build platform log layer: {0}")]
    Layer(#[from] std::io::Error),
    #[error(transparent)]
    SetSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs the global subscriber that `TracingSink` emits into, using the
/// log facility native to this platform. Call at most once per process,
/// before the first log entry.
#[cfg(target_os = "android")]
pub fn init(subsystem: &str) -> Result<(), PlatformInitError> {
    install(tracing_android::layer(subsystem)?)
}

/// Installs the global subscriber that `TracingSink` emits into, using the
/// log facility native to this platform. Call at most once per process,
/// before the first log entry.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn init(subsystem: &str) -> Result<(), PlatformInitError> {
    install(tracing_oslog::OsLogger::new(subsystem, "default"))
}

/// Desktop development fallback: plain stderr formatting.
#[cfg(not(any(target_os = "android", target_os = "macos", target_os = "ios")))]
pub fn init(_subsystem: &str) -> Result<(), PlatformInitError> {
    install(tracing_subscriber::fmt::layer())
}

fn install(layer: impl Layer<Registry> + Send + Sync) -> Result<(), PlatformInitError> {
    // The facade owns level gating; the backend filter stays wide open
    // unless the host narrows it via RUST_LOG.
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::TRACE.into());
    let registry = registry().with(layer.with_filter(filter));
    tracing::subscriber::set_global_default(registry)?;
    tracing::info!("platform logging initialized");
    Ok(())
}
