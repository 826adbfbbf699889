//! Command-line argument parsing for Skyfolio.

use std::path::PathBuf;

use clap::Parser;
use skyfolio_scene::{Section, WeatherKind};

use crate::{Config, ConfigError};

/// Skyfolio command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyfolio", about = "Skyfolio animated portfolio scene")]
pub struct CliArgs {
    /// Weather preset (day, sunset, midnight, rainy, sakura).
    #[arg(long)]
    pub weather: Option<String>,

    /// Section shown first (home, experience, skills, projects, contact).
    #[arg(long)]
    pub section: Option<String>,

    /// Start in free-flight mode.
    #[arg(long)]
    pub free_flight: Option<bool>,

    /// Force the reduced-motion preference.
    #[arg(long)]
    pub reduced_motion: Option<bool>,

    /// Seed for environment placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Fails on an unknown section or weather tag, leaving `self` untouched.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        let weather = args
            .weather
            .as_deref()
            .map(str::parse::<WeatherKind>)
            .transpose()
            .map_err(|e| ConfigError::InvalidValue {
                field: "session.weather",
                reason: e.to_string(),
            })?;
        let section = args
            .section
            .as_deref()
            .map(str::parse::<Section>)
            .transpose()
            .map_err(|e| ConfigError::InvalidValue {
                field: "session.start_section",
                reason: e.to_string(),
            })?;

        if let Some(weather) = weather {
            self.session.weather = weather;
        }
        if let Some(section) = section {
            self.session.start_section = section;
        }
        if let Some(free) = args.free_flight {
            self.session.free_flight = free;
        }
        if let Some(reduced) = args.reduced_motion {
            self.motion.reduced_motion = reduced;
        }
        if let Some(seed) = args.seed {
            self.environment.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            weather: Some("Rainy".to_string()),
            section: Some("skills".to_string()),
            seed: Some(9),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.session.weather, WeatherKind::Rainy);
        assert_eq!(config.session.start_section, Section::Skills);
        assert_eq!(config.environment.seed, 9);
        // Non-overridden fields retain defaults
        assert!(!config.session.free_flight);
        assert_eq!(config.motion.start_delay_ms, 800);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default()).unwrap();
        assert_eq!(config, original);
    }

    #[test]
    fn test_unknown_tag_rejected_without_partial_apply() {
        let mut config = Config::default();
        let args = CliArgs {
            weather: Some("day".to_string()),
            section: Some("blog".to_string()),
            ..CliArgs::default()
        };
        let err = config.apply_cli_overrides(&args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "session.start_section", .. }
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parses_flags() {
        let args = CliArgs::parse_from([
            "skyfolio",
            "--weather",
            "sakura",
            "--free-flight",
            "true",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.weather.as_deref(), Some("sakura"));
        assert_eq!(args.free_flight, Some(true));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
