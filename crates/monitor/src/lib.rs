//! Frame Loop Driver
//!
//! Owns the run/stop lifecycle of a detection session: acquires the camera
//! stream, requests one detection cycle per refresh tick, feeds each result
//! through geometry -> classification -> debouncing, and forwards outcomes
//! to the render, status, and sound sinks.

pub mod config;
pub mod session;
pub mod sinks;

pub use config::MonitorConfig;
pub use session::{MonitorError, MonitorSession, SessionHandle, SessionState};
pub use sinks::{OverlayFrame, RenderSink, SoundSink, StatusSink, StatusUpdate};

use tracing_subscriber::FmtSubscriber;

/// Initialize logging (call once at startup)
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
