//! FaceWatch - Main Entry Point

use camera::{CameraProvider, SyntheticCamera};
use face_landmarks::SyntheticDetector;
use monitor::sinks::{LogSoundSink, LogStatusSink, NullRenderSink};
use monitor::{init_logging, MonitorConfig, MonitorSession};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== FaceWatch v{} ===", env!("CARGO_PKG_VERSION"));

    let config = match MonitorConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Falling back to default configuration: {}", e);
            MonitorConfig::default()
        }
    };

    let camera = SyntheticCamera::default();
    let devices = camera.list_devices()?;
    info!("Video input devices: {}", serde_json::to_string(&devices)?);

    // No real landmark model is wired into this build; the synthetic
    // detector exercises the pipeline end to end with a tilted face.
    let mut detector = SyntheticDetector::default();
    detector.set_roll_degrees(-8.0);

    let mut session = MonitorSession::new(
        camera,
        detector,
        NullRenderSink,
        LogStatusSink::default(),
        LogSoundSink,
        config,
    );

    session.start()?;
    let handle = session.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping detection");
            handle.stop();
        }
    });

    session.run().await;
    session.stop();

    Ok(())
}
