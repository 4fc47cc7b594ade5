//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use timber_fell::{DEFAULT_GATHER_RADIUS, DEFAULT_MAX_BREAK_COUNT, FellSettings};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Largest accepted `fell.gather_radius`.
pub const MAX_GATHER_RADIUS: u32 = 64;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tree felling settings.
    pub fell: FellConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Tree felling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FellConfig {
    /// Maximum voxels broken per felled tree, not counting the one the player broke.
    pub max_break_count: u32,
    /// Radius in voxels around each broken voxel to pull drops from.
    pub gather_radius: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "timber_fell=trace").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for FellConfig {
    fn default() -> Self {
        Self {
            max_break_count: DEFAULT_MAX_BREAK_COUNT,
            gather_radius: DEFAULT_GATHER_RADIUS,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl FellConfig {
    /// Settings handed to each fell job.
    pub fn settings(&self) -> FellSettings {
        FellSettings {
            max_break_count: self.max_break_count,
            gather_radius: self.gather_radius,
        }
    }
}

/// Platform config directory for timber (`~/.config/timber` on Linux).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("timber"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects settings the feller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fell.max_break_count == 0 {
            return Err(ConfigError::Invalid {
                field: "fell.max_break_count",
                reason: "must be at least 1",
            });
        }
        if self.fell.gather_radius == 0 {
            return Err(ConfigError::Invalid {
                field: "fell.gather_radius",
                reason: "must be at least 1",
            });
        }
        if self.fell.gather_radius > MAX_GATHER_RADIUS {
            return Err(ConfigError::Invalid {
                field: "fell.gather_radius",
                reason: "must be at most 64",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("max_break_count: 300"));
        assert!(ron_str.contains("gather_radius: 4"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.fell.max_break_count = 64;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(fell: (max_break_count: 50))").unwrap();
        assert_eq!(config.fell.max_break_count, 50);
        assert_eq!(config.fell.gather_radius, DEFAULT_GATHER_RADIUS);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_settings_conversion() {
        let config = FellConfig {
            max_break_count: 12,
            gather_radius: 2,
        };
        let settings = config.settings();
        assert_eq!(settings.max_break_count, 12);
        assert_eq!(settings.gather_radius, 2);
        assert_eq!(FellConfig::default().settings(), FellSettings::default());
    }

    #[test]
    fn test_validate_bounds_gather_radius() {
        let mut config = Config::default();
        config.fell.gather_radius = MAX_GATHER_RADIUS;
        assert!(config.validate().is_ok());
        config.fell.gather_radius = 4_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "fell.gather_radius",
                reason: "must be at most 64",
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.fell.max_break_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "fell.max_break_count",
                ..
            })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.fell.max_break_count = 1000;
        config.debug.log_level = "timber_fell=trace".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "(fell: (gather_radius: 0))").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.fell.max_break_count = 20;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.fell.max_break_count), Some(20));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
