//! Monitor configuration
//!
//! Layered: defaults, then an optional `facewatch.toml` next to the binary,
//! then `FACEWATCH_*` environment variables.

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::MonitorError;

/// Monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Camera device to open; `None` picks the provider's default
    pub device_id: Option<String>,

    /// Detection cycles per second (display refresh rate)
    pub refresh_rate_hz: u32,

    /// Tilt detection enabled at session start
    pub tilt_enabled: bool,

    /// Mouth detection enabled at session start
    pub mouth_enabled: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device_id: None,
            refresh_rate_hz: 60,
            tilt_enabled: true,
            mouth_enabled: true,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from file and environment, over defaults
    pub fn load() -> Result<Self, MonitorError> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("refresh_rate_hz", defaults.refresh_rate_hz as i64)?
            .set_default("tilt_enabled", defaults.tilt_enabled)?
            .set_default("mouth_enabled", defaults.mouth_enabled)?
            .add_source(File::with_name("facewatch").required(false))
            .add_source(Environment::with_prefix("FACEWATCH"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Interval between detection cycles
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.refresh_rate_hz.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_refresh_interval_is_one_sixtieth() {
        let cfg = MonitorConfig::default();
        let interval = cfg.refresh_interval();
        assert!((interval.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn zero_rate_does_not_divide_by_zero() {
        let cfg = MonitorConfig {
            refresh_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(cfg.refresh_interval(), std::time::Duration::from_secs(1));
    }
}
