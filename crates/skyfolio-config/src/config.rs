//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skyfolio_scene::{Section, WeatherKind};
use tracing::info;

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Motion and accessibility settings.
    pub motion: MotionConfig,
    /// Initial selections of the session.
    pub session: SessionConfig,
    /// Recycled scenery pools.
    pub environment: EnvironmentConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport size used to normalize the pointer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
}

/// Motion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Start with reduced motion on, before the platform reports a preference.
    pub reduced_motion: bool,
    /// Delay between "start flight" and the camera leaving home, in ms.
    pub start_delay_ms: u64,
}

/// Initial session selections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Section shown first.
    pub start_section: Section,
    /// Initial weather preset.
    pub weather: WeatherKind,
    /// Start in free-flight mode.
    pub free_flight: bool,
}

/// Environment pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Seed for every placement RNG.
    pub seed: u64,
    /// Number of cloud clusters.
    pub cloud_pool: usize,
    /// Number of ground chunks.
    pub chunk_pool: usize,
    /// Number of precipitation particles.
    pub particle_pool: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            start_delay_ms: 800,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_section: Section::Home,
            weather: WeatherKind::Midnight,
            free_flight: false,
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cloud_pool: 24,
            chunk_pool: 16,
            particle_pool: 600,
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

/// `<platform config dir>/skyfolio`, or `./skyfolio` when the platform has none.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skyfolio")
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects settings the animation core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pools = [
            ("environment.cloud_pool", self.environment.cloud_pool),
            ("environment.chunk_pool", self.environment.chunk_pool),
            ("environment.particle_pool", self.environment.particle_pool),
        ];
        for (field, size) in pools {
            if size == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "pool must hold at least one element".to_string(),
                });
            }
        }
        if self.motion.start_delay_ms >= 1000 {
            return Err(ConfigError::InvalidValue {
                field: "motion.start_delay_ms",
                reason: format!("{} ms is not under one second", self.motion.start_delay_ms),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }
}
