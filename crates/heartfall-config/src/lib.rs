//! Configuration for heartfall.
//!
//! Settings are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory (or an explicit path)
//! 3. Environment variables: `HEARTFALL_FPS`, `HEARTFALL_LOG`,
//!    `HEARTFALL_LOG_FILE`
//!
//! Command-line overrides are applied by the binary on top of the result.

mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use heartfall_core::SceneSettings;
use log::debug;
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};

/// Largest frame rate accepted.
pub const MAX_FPS: u32 = 240;

/// Terminal display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames (and scene ticks) per second.
    pub fps: u32,
    /// Logical units covered by one rendered pixel.
    pub pixel_scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            pixel_scale: 4.0,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter string, e.g. `info` or `heartfall_scene=debug`.
    pub level: String,
    /// File receiving log output. Logging is off when unset.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scene: SceneSettings,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// With `path` set the file must exist. Without it the default location
    /// is tried and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                Some(path) => {
                    debug!("No config at {}, using defaults", path.display());
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without applying overrides.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Platform config file location, e.g. `~/.config/heartfall/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "heartfall").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides looked up through `var`.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(fps) = var("HEARTFALL_FPS") {
            self.display.fps = fps.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "HEARTFALL_FPS",
                reason: format!("expected a whole number, got {fps:?}"),
            })?;
        }
        if let Some(level) = var("HEARTFALL_LOG") {
            self.log.level = level;
        }
        if let Some(file) = var("HEARTFALL_LOG_FILE") {
            self.log.file = Some(PathBuf::from(file));
        }
        Ok(())
    }

    /// Reject values the scene or renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let scene = &self.scene;
        if scene.initial_spawn_interval == 0 {
            return Err(invalid("scene.initial_spawn_interval", "must be at least 1"));
        }
        if scene.spawn_interval_min == 0 {
            return Err(invalid("scene.spawn_interval_min", "must be at least 1"));
        }
        if scene.spawn_interval_min > scene.spawn_interval_max {
            return Err(invalid(
                "scene.spawn_interval_max",
                format!(
                    "must not be below spawn_interval_min ({})",
                    scene.spawn_interval_min
                ),
            ));
        }
        if !(scene.heart_size > 0.0) {
            return Err(invalid("scene.heart_size", "must be positive"));
        }
        if !(0.0..1.0).contains(&scene.ground_fraction) {
            return Err(invalid("scene.ground_fraction", "must be in [0, 1)"));
        }
        if !(1..=MAX_FPS).contains(&self.display.fps) {
            return Err(invalid(
                "display.fps",
                format!("must be between 1 and {MAX_FPS}"),
            ));
        }
        if !(self.display.pixel_scale > 0.0) {
            return Err(invalid("display.pixel_scale", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "heartfall_config_test_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scene.background_hearts, 200);
        assert_eq!(config.scene.roses, 50);
        assert_eq!(config.display.fps, 60);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [scene]
            roses = 10
            recompute_ground_on_resize = true

            [display]
            fps = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.scene.roses, 10);
        assert!(config.scene.recompute_ground_on_resize);
        assert_eq!(config.scene.background_hearts, 200);
        assert_eq!(config.scene.spawn_interval_max, 200);
        assert_eq!(config.display.fps, 30);
        assert_eq!(config.display.pixel_scale, 4.0);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_explicit_file() {
        let path = temp_config(
            "explicit",
            r#"
            [log]
            level = "debug"
            file = "/tmp/heartfall.log"
            "#,
        );
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/heartfall.log")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("heartfall_definitely_missing.toml");
        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let path = temp_config("broken", "[scene\nroses = ");
        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            "[scene]\ninitial_spawn_interval = 0",
            "[scene]\nspawn_interval_min = 0",
            "[scene]\nspawn_interval_min = 300",
            "[scene]\nheart_size = 0.0",
            "[scene]\nground_fraction = 1.5",
            "[display]\nfps = 0",
            "[display]\nfps = 1000",
            "[display]\npixel_scale = -1.0",
        ];
        for case in cases {
            let err = Config::from_toml(case).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { .. }),
                "{case:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HEARTFALL_FPS", "24"),
            ("HEARTFALL_LOG", "trace"),
            ("HEARTFALL_LOG_FILE", "/tmp/hearts.log"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.display.fps, 24);
        assert_eq!(config.log.level, "trace");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/hearts.log")));

        let mut config = Config::default();
        let err = config
            .apply_env_overrides(|key| (key == "HEARTFALL_FPS").then(|| "fast".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "HEARTFALL_FPS", .. }));
    }
}
