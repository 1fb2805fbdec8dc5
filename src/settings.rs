//! Runtime settings
//!
//! Game rules are fixed in `consts`; settings only cover presentation and
//! the headless demo. Missing fields fall back to their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Present with vsync
    pub vsync: bool,
    /// Largest elapsed time fed to a single update (seconds)
    pub max_frame_dt: f32,

    // === Headless demo ===
    /// Frames simulated by the native demo
    pub demo_frames: u32,
    /// Elapsed time per demo frame (seconds)
    pub demo_frame_dt: f32,
    /// Seed for the autopilot's aim error
    pub autopilot_seed: u64,
    /// Maximum angular aim error (radians)
    pub autopilot_aim_error: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: true,
            max_frame_dt: 0.1,

            demo_frames: 3600,
            demo_frame_dt: 1.0 / 60.0,
            autopilot_seed: 0x5eed,
            autopilot_aim_error: 0.3,
        }
    }
}

/// Failure to load settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Replace non-positive or non-finite time values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            log::warn!("Ignoring max_frame_dt {}", self.max_frame_dt);
            self.max_frame_dt = defaults.max_frame_dt;
        }
        if !(self.demo_frame_dt.is_finite() && self.demo_frame_dt > 0.0) {
            log::warn!("Ignoring demo_frame_dt {}", self.demo_frame_dt);
            self.demo_frame_dt = defaults.demo_frame_dt;
        }
        if !self.autopilot_aim_error.is_finite() {
            self.autopilot_aim_error = defaults.autopilot_aim_error;
        }
        self.autopilot_aim_error = self.autopilot_aim_error.abs();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_json(r#"{ "vsync": false, "demo_frames": 10 }"#).unwrap();
        assert!(!settings.vsync);
        assert_eq!(settings.demo_frames, 10);
        assert_eq!(settings.max_frame_dt, 0.1);
    }

    #[test]
    fn test_bad_times_fall_back() {
        let settings =
            Settings::from_json(r#"{ "max_frame_dt": -1.0, "demo_frame_dt": 0.0, "autopilot_aim_error": -0.2 }"#)
                .unwrap();
        assert_eq!(settings.max_frame_dt, 0.1);
        assert_eq!(settings.demo_frame_dt, 1.0 / 60.0);
        assert_eq!(settings.autopilot_aim_error, 0.2);
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_json("{ vsync: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings JSON"));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_from_path("/nonexistent/arc-pong/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
