//! Simulation settings with persistence
//!
//! Settings are read from the path given on the command line, or from
//! `~/.config/sentinel/settings.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use sentinel_ai::{EnemyConfig, NavigatorConfig};
use sentinel_core::TimeConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Level};

/// All simulation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub log: LogSettings,
    pub time: TimeConfig,
    pub arena: ArenaSettings,
    pub enemy: EnemyConfig,
    pub navigator: NavigatorConfig,
}

impl SimulationSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sentinel"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path`, or the default location when `None`.
    ///
    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::settings_path() else {
                    warn!("Could not determine config directory");
                    return Self::default();
                };
                path
            }
        };

        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
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

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LogSettings {
    /// Parsed log level, INFO when unrecognized
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}

/// Headless arena setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Simulated seconds to run
    pub duration_secs: f32,
    /// Raw length of one outer frame fed to the clock, before scaling and clamping
    pub frame_secs: f32,
    /// Enemy start, capsule center
    pub enemy_start: Vec3,
    /// Center of the circle the target walks
    pub target_center: Vec3,
    /// Radius of the target's circle; zero keeps it standing
    pub target_radius: f32,
    /// Target walking speed in meters per second
    pub target_speed: f32,
    /// Seconds the target walks before resting
    pub target_walk_secs: f32,
    /// Seconds the target rests before walking again
    pub target_rest_secs: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            frame_secs: 1.0 / 60.0,
            enemy_start: Vec3::new(0.0, 0.9, 0.0),
            target_center: Vec3::new(0.0, 0.9, 0.0),
            target_radius: 6.0,
            target_speed: 2.0,
            target_walk_secs: 4.0,
            target_rest_secs: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("sentinel-missing-settings.toml");
        let settings = SimulationSettings::load(Some(&path));
        assert_eq!(settings.enemy, EnemyConfig::default());
        assert_eq!(settings.log.max_level(), Level::INFO);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let path = std::env::temp_dir().join("sentinel-malformed-settings.toml");
        fs::write(&path, "enemy = 12").unwrap();

        let settings = SimulationSettings::load(Some(&path));
        assert_eq!(settings.arena.duration_secs, 60.0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join("sentinel-settings-test")
            .join("settings.toml");
        let mut settings = SimulationSettings::default();
        settings.enemy.melee_range = 2.0;
        settings.log.level = "debug".to_string();

        settings.save_to(&path).unwrap();
        let loaded = SimulationSettings::load(Some(&path));

        assert_eq!(loaded.enemy.melee_range, 2.0);
        assert_eq!(loaded.log.max_level(), Level::DEBUG);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let log = LogSettings {
            level: "loud".to_string(),
        };
        assert_eq!(log.max_level(), Level::INFO);
    }
}
