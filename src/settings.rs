//! Demo settings
//!
//! Settings are read from `~/.config/ordinal/settings.toml`, or from a path
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use ordinal_ecs::ScheduleConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schedule: ScheduleConfig,
    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig {
                stages: vec![0, 1, 2],
                ..Default::default()
            },
            demo: DemoSettings::default(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ordinal"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Particle demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Number of frames to simulate
    pub frames: u32,
    /// Particles alive at any time
    pub particles: u32,
    /// Raw frame time fed to the clock, in seconds
    pub frame_time: f32,
    /// Particle lifetime in seconds
    pub lifetime: f32,
    /// Log a report every this many frames
    pub report_interval: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            particles: 64,
            frame_time: 1.0 / 60.0,
            lifetime: 2.0,
            report_interval: 120,
        }
    }
}
