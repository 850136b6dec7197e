//! Configuration file support for bac-sim.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bac-sim/config.toml`.

use crate::scenario::ProfileEntry;
use crate::timeline::MAX_WINDOW_HOURS;
use crate::{Error, Profile, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// Profile used when a scenario does not carry one
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_sex")]
    pub sex: String,

    #[serde(default = "default_weight_lbs")]
    pub weight_lbs: f64,

    #[serde(default = "default_age")]
    pub age: u32,

    #[serde(default)]
    pub chronic_drinker: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            sex: default_sex(),
            weight_lbs: default_weight_lbs(),
            age: default_age(),
            chronic_drinker: false,
        }
    }
}

impl ProfileConfig {
    pub fn to_profile(&self) -> Result<Profile> {
        let entry = ProfileEntry {
            sex: self.sex.clone(),
            weight_lbs: self.weight_lbs,
            age: self.age,
            chronic_drinker: self.chronic_drinker,
            medications: Vec::new(),
        };
        entry
            .to_profile()
            .map_err(|e| Error::Config(format!("[profile] {}", e)))
    }
}

/// Report window settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_hours")]
    pub hours: i64,

    #[serde(default)]
    pub sobriety_threshold: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            hours: default_hours(),
            sobriety_threshold: 0.0,
        }
    }
}

// Default value functions
fn default_sex() -> String {
    "male".into()
}

fn default_weight_lbs() -> f64 {
    180.0
}

fn default_age() -> u32 {
    30
}

fn default_hours() -> i64 {
    6
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the simulator cannot use
    pub fn validate(&self) -> Result<()> {
        if self.timeline.hours <= 0 || self.timeline.hours > MAX_WINDOW_HOURS {
            return Err(Error::Config(format!(
                "[timeline] hours must be between 1 and {}, got {}",
                MAX_WINDOW_HOURS, self.timeline.hours
            )));
        }
        if self.timeline.sobriety_threshold < 0.0 {
            return Err(Error::Config(format!(
                "[timeline] sobriety_threshold must not be negative, got {}",
                self.timeline.sobriety_threshold
            )));
        }
        self.profile.to_profile()?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("bac-sim").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sex;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.profile.sex, "male");
        assert_eq!(config.profile.weight_lbs, 180.0);
        assert_eq!(config.timeline.hours, 6);
        assert_eq!(config.timeline.sobriety_threshold, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profile.sex = "female".into();
        config.profile.weight_lbs = 135.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let profile = loaded.profile.to_profile().unwrap();
        assert_eq!(profile.sex, Sex::Female);
        assert_eq!(profile.weight_lbs, 135.0);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[profile]
weight_lbs = 150.0
chronic_drinker = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profile.weight_lbs, 150.0);
        assert!(config.profile.chronic_drinker);
        assert_eq!(config.profile.sex, "male"); // default
        assert_eq!(config.timeline.hours, 6); // default
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[profile]\nweight_lbs = 0.0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[timeline]\nhours = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_window_cap() {
        let mut config = Config::default();
        config.timeline.hours = MAX_WINDOW_HOURS;
        assert!(config.validate().is_ok());

        config.timeline.hours = MAX_WINDOW_HOURS + 1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.timeline.hours = i64::MAX / 30;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
